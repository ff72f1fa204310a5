use axum_unihub::schema::programs;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use validator::Validate;

use crate::university::models::University;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum DegreeType {
    Bachelor,
    Master,
    Phd,
}

impl Default for DegreeType {
    fn default() -> Self {
        DegreeType::Bachelor
    }
}

impl DegreeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeType::Bachelor => "bachelor",
            DegreeType::Master => "master",
            DegreeType::Phd => "phd",
        }
    }
}

impl ToSql<Text, Pg> for DegreeType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for DegreeType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"bachelor" => Ok(DegreeType::Bachelor),
            b"master" => Ok(DegreeType::Master),
            b"phd" => Ok(DegreeType::Phd),
            other => Err(format!(
                "unrecognized degree type: {}",
                String::from_utf8_lossy(other)
            )
            .into()),
        }
    }
}

/// Degree offerings inside a university. Language flags and tuition may
/// override the university-level values.
#[derive(Queryable, Selectable, Debug, PartialEq, Identifiable, Associations, Serialize)]
#[diesel(belongs_to(University))]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Program {
    pub id: i32,
    pub university_id: i32,
    pub name: String,
    pub degree_type: DegreeType,
    pub duration_years: i32,
    pub language_kz: bool,
    pub language_ru: bool,
    pub language_en: bool,
    pub tuition_per_year: Option<i32>,
}

fn default_duration() -> i32 {
    4
}

#[derive(Deserialize, Validate)]
pub struct CreateProgram {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub degree_type: DegreeType,
    #[serde(default = "default_duration")]
    #[validate(range(min = 1))]
    pub duration_years: i32,
    #[serde(default)]
    pub language_kz: bool,
    #[serde(default)]
    pub language_ru: bool,
    #[serde(default)]
    pub language_en: bool,
    #[validate(range(min = 0))]
    pub tuition_per_year: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = programs)]
pub struct NewProgram {
    pub university_id: i32,
    pub name: String,
    pub degree_type: DegreeType,
    pub duration_years: i32,
    pub language_kz: bool,
    pub language_ru: bool,
    pub language_en: bool,
    pub tuition_per_year: Option<i32>,
}

impl CreateProgram {
    pub fn into_new(self, university_id: i32) -> NewProgram {
        NewProgram {
            university_id,
            name: self.name,
            degree_type: self.degree_type,
            duration_years: self.duration_years,
            language_kz: self.language_kz,
            language_ru: self.language_ru,
            language_en: self.language_en,
            tuition_per_year: self.tuition_per_year,
        }
    }
}

#[derive(Deserialize, Validate, AsChangeset)]
#[diesel(table_name = programs)]
pub struct UpdateProgram {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub degree_type: Option<DegreeType>,
    #[validate(range(min = 1))]
    pub duration_years: Option<i32>,
    pub language_kz: Option<bool>,
    pub language_ru: Option<bool>,
    pub language_en: Option<bool>,
    #[validate(range(min = 0))]
    pub tuition_per_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_defaults_to_four_year_bachelor() {
        let created: CreateProgram = serde_json::from_str(r#"{"name": "Data Science"}"#).unwrap();
        assert_eq!(created.degree_type, DegreeType::Bachelor);
        assert_eq!(created.duration_years, 4);
        assert!(created.tuition_per_year.is_none());

        let new = created.into_new(7);
        assert_eq!(new.university_id, 7);
    }

    #[test]
    fn degree_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&DegreeType::Phd).unwrap(),
            "\"phd\""
        );
        let degree: DegreeType = serde_json::from_str("\"master\"").unwrap();
        assert_eq!(degree, DegreeType::Master);
    }
}
