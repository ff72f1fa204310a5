use axum_unihub::schema::{universities, university_categories};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use validator::{Validate, ValidationError};

use crate::category::models::Category;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Almaty,
    Astana,
    Shymkent,
    Other,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Almaty => "almaty",
            City::Astana => "astana",
            City::Shymkent => "shymkent",
            City::Other => "other",
        }
    }
}

impl ToSql<Text, Pg> for City {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for City {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"almaty" => Ok(City::Almaty),
            b"astana" => Ok(City::Astana),
            b"shymkent" => Ok(City::Shymkent),
            b"other" => Ok(City::Other),
            other => Err(format!(
                "unrecognized city: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum UniType {
    Public,
    Private,
}

impl Default for UniType {
    fn default() -> Self {
        UniType::Public
    }
}

impl UniType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniType::Public => "public",
            UniType::Private => "private",
        }
    }
}

impl ToSql<Text, Pg> for UniType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UniType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"public" => Ok(UniType::Public),
            b"private" => Ok(UniType::Private),
            other => Err(format!(
                "unrecognized university type: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

/// Derived low/mid/high bucket from average annual tuition, used for the
/// heat-map colouring on the front end. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TuitionLevel {
    Low,
    Mid,
    High,
}

pub fn tuition_level(tuition_min: i32, tuition_max: i32) -> TuitionLevel {
    let avg = (tuition_min as i64 + tuition_max as i64) / 2;
    if avg < 1_200_000 {
        TuitionLevel::Low
    } else if avg < 1_800_000 {
        TuitionLevel::Mid
    } else {
        TuitionLevel::High
    }
}

#[derive(Queryable, Selectable, Debug, PartialEq, Identifiable, Serialize)]
#[diesel(table_name = universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct University {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    pub city: City,
    pub uni_type: UniType,
    pub address: String,
    pub website: String,
    pub description: String,
    pub main_image: Option<String>,
    pub tuition_min: i32,
    pub tuition_max: i32,
    pub has_grants: bool,
    pub rating: BigDecimal,
    pub popularity_score: i32,
    pub language_kz: bool,
    pub language_ru: bool,
    pub language_en: bool,
    pub mobility_access: bool,
    pub sign_language: bool,
    pub low_vision_support: bool,
    pub dormitory_available: bool,
    pub gpa_required: Option<BigDecimal>,
    pub ielts_required: Option<BigDecimal>,
    pub ent_required: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl University {
    pub fn tuition_level(&self) -> TuitionLevel {
        tuition_level(self.tuition_min, self.tuition_max)
    }
}

fn validate_rating(rating: &BigDecimal) -> Result<(), ValidationError> {
    if *rating < BigDecimal::from(0) || *rating > BigDecimal::from(5) {
        return Err(ValidationError::new("rating must be between 0 and 5"));
    }
    Ok(())
}

#[derive(Insertable, Deserialize, Validate)]
#[diesel(table_name = universities)]
pub struct NewUniversity {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    pub city: City,
    #[serde(default)]
    pub uni_type: UniType,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    pub main_image: Option<String>,
    #[validate(range(min = 0))]
    pub tuition_min: i32,
    #[validate(range(min = 0))]
    pub tuition_max: i32,
    #[serde(default)]
    pub has_grants: bool,
    #[serde(default)]
    #[validate(custom(function = validate_rating))]
    pub rating: BigDecimal,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub popularity_score: i32,
    #[serde(default)]
    pub language_kz: bool,
    #[serde(default)]
    pub language_ru: bool,
    #[serde(default)]
    pub language_en: bool,
    #[serde(default)]
    pub mobility_access: bool,
    #[serde(default)]
    pub sign_language: bool,
    #[serde(default)]
    pub low_vision_support: bool,
    #[serde(default)]
    pub dormitory_available: bool,
    pub gpa_required: Option<BigDecimal>,
    pub ielts_required: Option<BigDecimal>,
    pub ent_required: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize, Validate, AsChangeset)]
#[diesel(table_name = universities)]
pub struct UpdateUniversity {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub city: Option<City>,
    pub uni_type: Option<UniType>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub main_image: Option<String>,
    #[validate(range(min = 0))]
    pub tuition_min: Option<i32>,
    #[validate(range(min = 0))]
    pub tuition_max: Option<i32>,
    pub has_grants: Option<bool>,
    #[validate(custom(function = validate_rating))]
    pub rating: Option<BigDecimal>,
    #[validate(range(min = 0))]
    pub popularity_score: Option<i32>,
    pub language_kz: Option<bool>,
    pub language_ru: Option<bool>,
    pub language_en: Option<bool>,
    pub mobility_access: Option<bool>,
    pub sign_language: Option<bool>,
    pub low_vision_support: Option<bool>,
    pub dormitory_available: Option<bool>,
    pub gpa_required: Option<BigDecimal>,
    pub ielts_required: Option<BigDecimal>,
    pub ent_required: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(
    Identifiable, Selectable, Queryable, Insertable, Associations, Debug, Serialize, Deserialize,
)]
#[diesel(belongs_to(University))]
#[diesel(belongs_to(Category))]
#[diesel(table_name = university_categories)]
#[diesel(primary_key(university_id, category_id))]
pub struct UniversityCategory {
    pub university_id: i32,
    pub category_id: i32,
}

#[derive(Deserialize)]
pub struct CreateUniversityWithCategories {
    #[serde(flatten)]
    pub university: NewUniversity,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct UniversityWithCategories {
    #[serde(flatten)]
    pub university: University,
    pub tuition_level: TuitionLevel,
    pub categories: Vec<Category>,
}

#[derive(Serialize)]
pub struct UniversityDetail {
    #[serde(flatten)]
    pub university: University,
    pub tuition_level: TuitionLevel,
    pub categories: Vec<Category>,
    pub programs: Vec<crate::program::models::Program>,
}

#[derive(Deserialize, Debug)]
pub struct HomeQuery {
    pub category: Option<String>,
    // Raw string so that junk values can fall back to the default
    // instead of failing extraction.
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub selected_category: Option<Category>,
    pub universities: Vec<UniversityWithCategories>,
    pub total_count: i64,
    pub shown_count: usize,
    pub show_more: bool,
    pub next_limit: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Kz,
    Ru,
    En,
}

#[derive(Deserialize, Debug, Default)]
pub struct UniversityFilter {
    pub city: Option<City>,
    pub uni_type: Option<UniType>,
    pub has_grants: Option<bool>,
    pub language: Option<Language>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuition_level_buckets() {
        // avg 1_000_000
        assert_eq!(tuition_level(800_000, 1_200_000), TuitionLevel::Low);
        // avg exactly 1_200_000 falls into mid
        assert_eq!(tuition_level(1_200_000, 1_200_000), TuitionLevel::Mid);
        assert_eq!(tuition_level(1_199_999, 1_199_999), TuitionLevel::Low);
        // avg exactly 1_800_000 falls into high
        assert_eq!(tuition_level(1_800_000, 1_800_000), TuitionLevel::High);
        assert_eq!(tuition_level(1_500_000, 2_099_999), TuitionLevel::Mid);
        assert_eq!(tuition_level(2_000_000, 3_000_000), TuitionLevel::High);
    }

    #[test]
    fn tuition_level_handles_zero_range() {
        assert_eq!(tuition_level(0, 0), TuitionLevel::Low);
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(&BigDecimal::from(0)).is_ok());
        assert!(validate_rating(&BigDecimal::from(5)).is_ok());
        assert!(validate_rating(&"4.6".parse().unwrap()).is_ok());
        assert!(validate_rating(&"5.1".parse().unwrap()).is_err());
        assert!(validate_rating(&BigDecimal::from(-1)).is_err());
    }

    #[test]
    fn city_round_trips_through_serde() {
        let city: City = serde_json::from_str("\"shymkent\"").unwrap();
        assert_eq!(city, City::Shymkent);
        assert_eq!(serde_json::to_string(&city).unwrap(), "\"shymkent\"");
    }
}
