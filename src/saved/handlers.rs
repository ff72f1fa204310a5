use super::models::{NewSavedUniversity, SaveToggle, SavedUniversity, SavedWithUniversity, ToggleSave};
use crate::university::models::University;
use crate::utils::{db_error, internal_error, types::Pool};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_unihub::schema::{saved_universities, universities};
use diesel::dsl::not;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

pub async fn get_saved(
    State(pool): State<Pool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SavedWithUniversity>>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let rows: Vec<(SavedUniversity, University)> = saved_universities::table
        .inner_join(universities::table)
        .filter(saved_universities::user_id.eq(&user_id))
        .order(saved_universities::created_at.desc())
        .select((SavedUniversity::as_select(), University::as_select()))
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    let res = rows
        .into_iter()
        .map(|(saved, university)| SavedWithUniversity {
            tuition_level: university.tuition_level(),
            saved,
            university,
        })
        .collect();

    Ok(Json(res))
}

/// Toggles membership: saving an already-saved university removes it, so a
/// double save never produces a duplicate row.
pub async fn toggle_save(
    State(pool): State<Pool>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ToggleSave>,
) -> Result<Json<SaveToggle>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let university_id = payload.university_id;

    let res = conn
        .transaction::<SaveToggle, diesel::result::Error, _>(move |mut conn| {
            Box::pin(async move {
                let existing = saved_universities::table
                    .filter(saved_universities::user_id.eq(&user_id))
                    .filter(saved_universities::university_id.eq(university_id))
                    .select(SavedUniversity::as_select())
                    .first(&mut conn)
                    .await
                    .optional()?;

                match existing {
                    Some(row) => {
                        diesel::delete(saved_universities::table.find(row.id))
                            .execute(&mut conn)
                            .await?;

                        Ok(SaveToggle {
                            university_id,
                            saved: false,
                            in_calculator: false,
                        })
                    }
                    None => {
                        let row = diesel::insert_into(saved_universities::table)
                            .values(NewSavedUniversity {
                                user_id,
                                university_id,
                            })
                            .returning(SavedUniversity::as_returning())
                            .get_result(&mut conn)
                            .await?;

                        Ok(SaveToggle {
                            university_id,
                            saved: true,
                            in_calculator: row.in_calculator,
                        })
                    }
                }
            })
        })
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

/// Flips the calculator-mode flag on an already saved university; 404 when
/// the pair is not in the saved set.
pub async fn toggle_calculator(
    State(pool): State<Pool>,
    Path((user_id, university_id)): Path<(Uuid, i32)>,
) -> Result<Json<SaveToggle>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let row = diesel::update(
        saved_universities::table
            .filter(saved_universities::user_id.eq(&user_id))
            .filter(saved_universities::university_id.eq(university_id)),
    )
    .set(saved_universities::in_calculator.eq(not(saved_universities::in_calculator)))
    .returning(SavedUniversity::as_returning())
    .get_result(&mut conn)
    .await
    .map_err(db_error)?;

    Ok(Json(SaveToggle {
        university_id: row.university_id,
        saved: true,
        in_calculator: row.in_calculator,
    }))
}
