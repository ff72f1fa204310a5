use super::models::{CreateProgram, Program, UpdateProgram};
use crate::utils::{db_error, internal_error, types::Pool, validation_error};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_unihub::schema::{programs, universities};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use validator::Validate;

pub async fn get_programs_for_university(
    State(pool): State<Pool>,
    Path(university_id): Path<i32>,
) -> Result<Json<Vec<Program>>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    // 404 for an unknown university rather than an empty list.
    universities::table
        .find(university_id)
        .select(universities::id)
        .first::<i32>(&mut conn)
        .await
        .map_err(db_error)?;

    let res = programs::table
        .filter(programs::university_id.eq(university_id))
        .order(programs::name.asc())
        .select(Program::as_select())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn create_program(
    State(pool): State<Pool>,
    Path(university_id): Path<i32>,
    Json(payload): Json<CreateProgram>,
) -> Result<Json<Program>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(programs::table)
        .values(payload.into_new(university_id))
        .returning(Program::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn update_program(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProgram>,
) -> Result<Json<Program>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(programs::table.find(id))
        .set(&payload)
        .returning(Program::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn remove_program(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<Program>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(programs::table.find(id))
        .returning(Program::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}
