use axum_unihub::schema::{profile_categories, user_profiles, users};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::category::models::Category;

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// User without the password hash, safe to hand back to clients.
#[derive(Queryable, Selectable, Debug, PartialEq, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SafeUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// One per account: personal academic stats for the "for me" button plus
/// contact details.
#[derive(Queryable, Selectable, Debug, PartialEq, Identifiable, Serialize)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: i32,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub planned_year: Option<i32>,
    pub my_gpa: Option<BigDecimal>,
    pub my_ielts: Option<BigDecimal>,
    pub my_ent: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = user_profiles)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: String,
}

#[derive(Deserialize, Validate, AsChangeset)]
#[diesel(table_name = user_profiles)]
pub struct UpdateProfile {
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(range(min = 2000, max = 2100))]
    pub planned_year: Option<i32>,
    pub my_gpa: Option<BigDecimal>,
    pub my_ielts: Option<BigDecimal>,
    #[validate(range(min = 0))]
    pub my_ent: Option<i32>,
}

impl UpdateProfile {
    pub fn has_changes(&self) -> bool {
        self.full_name.is_some()
            || self.phone.is_some()
            || self.planned_year.is_some()
            || self.my_gpa.is_some()
            || self.my_ielts.is_some()
            || self.my_ent.is_some()
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UpdateProfile,
    pub interested_category_ids: Option<Vec<i32>>,
}

#[derive(
    Identifiable, Selectable, Queryable, Insertable, Associations, Debug, Serialize, Deserialize,
)]
#[diesel(belongs_to(Profile))]
#[diesel(belongs_to(Category))]
#[diesel(table_name = profile_categories)]
#[diesel(primary_key(profile_id, category_id))]
pub struct ProfileCategory {
    pub profile_id: i32,
    pub category_id: i32,
}

#[derive(Serialize)]
pub struct ProfileWithCategories {
    #[serde(flatten)]
    pub profile: Profile,
    pub interested_categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_has_no_changes() {
        let payload: UpdateProfilePayload =
            serde_json::from_str(r#"{"interested_category_ids": [1, 2]}"#).unwrap();
        assert!(!payload.profile.has_changes());
        assert_eq!(payload.interested_category_ids, Some(vec![1, 2]));
    }

    #[test]
    fn scores_update_has_changes() {
        let payload: UpdateProfilePayload =
            serde_json::from_str(r#"{"my_gpa": "3.5", "my_ent": 120}"#).unwrap();
        assert!(payload.profile.has_changes());
    }
}
