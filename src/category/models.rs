use axum_unihub::schema::categories;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Subject areas ("IT", "Medicine", ...) used for the directory filter and
/// the navigation chips on the home page.
#[derive(Queryable, Selectable, Debug, PartialEq, Identifiable, Serialize)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl CreateCategory {
    /// Slug is always derived from the name, never supplied by the client.
    pub fn into_new(self) -> NewCategory {
        let slug = slug::slugify(&self.name);
        NewCategory {
            name: self.name,
            slug,
        }
    }
}

#[derive(Deserialize, Validate, AsChangeset)]
#[diesel(table_name = categories)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_name() {
        let new = CreateCategory {
            name: "Computer Science".to_owned(),
        }
        .into_new();
        assert_eq!(new.slug, "computer-science");
    }

    #[test]
    fn slug_strips_punctuation() {
        let new = CreateCategory {
            name: "IT & Data".to_owned(),
        }
        .into_new();
        assert_eq!(new.slug, "it-data");
    }
}
