use axum_unihub::schema::saved_universities;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::university::models::{TuitionLevel, University};

/// Membership of a university in a user's saved set. `in_calculator` marks
/// the subset compared side by side in calculator mode.
#[derive(Queryable, Selectable, Debug, PartialEq, Identifiable, Associations, Serialize)]
#[diesel(belongs_to(University))]
#[diesel(table_name = saved_universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedUniversity {
    pub id: i32,
    pub user_id: Uuid,
    pub university_id: i32,
    pub in_calculator: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = saved_universities)]
pub struct NewSavedUniversity {
    pub user_id: Uuid,
    pub university_id: i32,
}

#[derive(Deserialize)]
pub struct ToggleSave {
    pub university_id: i32,
}

#[derive(Serialize)]
pub struct SaveToggle {
    pub university_id: i32,
    pub saved: bool,
    pub in_calculator: bool,
}

#[derive(Serialize)]
pub struct SavedWithUniversity {
    #[serde(flatten)]
    pub saved: SavedUniversity,
    pub university: University,
    pub tuition_level: TuitionLevel,
}
