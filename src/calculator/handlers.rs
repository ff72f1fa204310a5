use super::eligibility::{EligibilityCheck, classify};
use crate::account::models::Profile;
use crate::saved::models::SavedUniversity;
use crate::university::models::{TuitionLevel, University};
use crate::utils::{db_error, internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_unihub::schema::{saved_universities, universities, user_profiles};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct CalculatorEntry {
    pub university: University,
    pub tuition_level: TuitionLevel,
    pub eligibility: EligibilityCheck,
}

#[derive(Serialize)]
pub struct CalculatorResult {
    pub results: Vec<CalculatorEntry>,
    pub eligible_count: usize,
}

/// Side-by-side comparison of the user's calculator-mode subset against
/// their stored GPA/IELTS/ENT scores.
pub async fn calculator_result(
    State(pool): State<Pool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CalculatorResult>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let profile = user_profiles::table
        .filter(user_profiles::user_id.eq(&user_id))
        .select(Profile::as_select())
        .first(&mut conn)
        .await
        .map_err(db_error)?;

    let rows: Vec<(SavedUniversity, University)> = saved_universities::table
        .inner_join(universities::table)
        .filter(saved_universities::user_id.eq(&user_id))
        .filter(saved_universities::in_calculator.eq(true))
        .order(saved_universities::created_at.desc())
        .select((SavedUniversity::as_select(), University::as_select()))
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    let results: Vec<CalculatorEntry> = rows
        .into_iter()
        .map(|(_, university)| CalculatorEntry {
            eligibility: classify(&profile, &university),
            tuition_level: university.tuition_level(),
            university,
        })
        .collect();

    let eligible_count = results.iter().filter(|r| r.eligibility.eligible).count();

    Ok(Json(CalculatorResult {
        results,
        eligible_count,
    }))
}
