use super::models::{Category, CreateCategory, UpdateCategory};
use crate::utils::{db_error, internal_error, types::Pool, validation_error};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_unihub::schema::categories;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use validator::Validate;

pub async fn create_category(
    State(pool): State<Pool>,
    Json(payload): Json<CreateCategory>,
) -> Result<Json<Category>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::insert_into(categories::table)
        .values(payload.into_new())
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

/// Ordered by name, the same order the navigation chips are rendered in.
pub async fn get_categories(
    State(pool): State<Pool>,
) -> Result<Json<Vec<Category>>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = categories::table
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn get_category_by_slug(
    State(pool): State<Pool>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = categories::table
        .filter(categories::slug.eq(&slug))
        .select(Category::as_select())
        .first(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn update_category(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<Category>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(categories::table.find(id))
        .set(&payload)
        .returning(Category::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}
