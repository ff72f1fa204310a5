use super::models::{
    LoginUser, NewProfile, NewUser, Profile, ProfileCategory, ProfileWithCategories, RegisterUser,
    SafeUser, UpdateProfilePayload, User,
};
use crate::category::models::Category;
use crate::utils::{db_error, internal_error, types::Pool, validation_error};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_unihub::schema::{categories, profile_categories, user_profiles, users};
use bcrypt::{DEFAULT_COST, hash, verify};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;
use validator::Validate;

/// Creates the account and its empty profile in one transaction; the profile
/// row is what the one-per-user constraint hangs off.
pub async fn register_user(
    State(pool): State<Pool>,
    Json(payload): Json<RegisterUser>,
) -> Result<Json<SafeUser>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let password_hash = create_password_hash(payload.password).await?;

    let user_data = NewUser {
        id: Uuid::new_v4(),
        email: payload.email,
        password_hash,
    };
    let profile_data = NewProfile {
        user_id: user_data.id,
        full_name: payload.full_name.unwrap_or_default(),
        phone: payload.phone.unwrap_or_default(),
    };

    let res = conn
        .transaction::<SafeUser, diesel::result::Error, _>(move |mut conn| {
            Box::pin(async move {
                let user = diesel::insert_into(users::table)
                    .values(&user_data)
                    .returning(SafeUser::as_returning())
                    .get_result(&mut conn)
                    .await?;

                diesel::insert_into(user_profiles::table)
                    .values(&profile_data)
                    .execute(&mut conn)
                    .await?;

                Ok(user)
            })
        })
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn login_user(
    State(pool): State<Pool>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<SafeUser>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let user = users::table
        .filter(users::email.eq(&payload.email))
        .select(User::as_select())
        .first(&mut conn)
        .await
        .map_err(|_| invalid_credentials())?;

    let res = SafeUser {
        id: user.id,
        email: user.email,
    };

    let matches =
        tokio::task::spawn_blocking(move || verify(payload.password, &user.password_hash))
            .await
            .map_err(internal_error)?
            .map_err(internal_error)?;

    if !matches {
        return Err(invalid_credentials());
    }

    Ok(Json(res))
}

pub async fn get_profile(
    State(pool): State<Pool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileWithCategories>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let profile = user_profiles::table
        .filter(user_profiles::user_id.eq(&user_id))
        .select(Profile::as_select())
        .first(&mut conn)
        .await
        .map_err(db_error)?;

    let interested_categories = load_interested_categories(&mut conn, profile.id)
        .await
        .map_err(db_error)?;

    Ok(Json(ProfileWithCategories {
        profile,
        interested_categories,
    }))
}

/// Updates the scalar fields and, when `interested_category_ids` is present,
/// replaces the whole interest set.
pub async fn update_profile(
    State(pool): State<Pool>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<ProfileWithCategories>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = conn
        .transaction::<ProfileWithCategories, diesel::result::Error, _>(move |mut conn| {
            Box::pin(async move {
                let profile = user_profiles::table
                    .filter(user_profiles::user_id.eq(&user_id))
                    .select(Profile::as_select())
                    .first(&mut conn)
                    .await?;

                let profile = if payload.profile.has_changes() {
                    diesel::update(user_profiles::table.find(profile.id))
                        .set(&payload.profile)
                        .returning(Profile::as_returning())
                        .get_result(&mut conn)
                        .await?
                } else {
                    profile
                };

                if let Some(category_ids) = &payload.interested_category_ids {
                    diesel::delete(
                        profile_categories::table
                            .filter(profile_categories::profile_id.eq(profile.id)),
                    )
                    .execute(&mut conn)
                    .await?;

                    let links = category_ids
                        .iter()
                        .map(|category_id| ProfileCategory {
                            profile_id: profile.id,
                            category_id: *category_id,
                        })
                        .collect::<Vec<_>>();

                    if !links.is_empty() {
                        diesel::insert_into(profile_categories::table)
                            .values(&links)
                            .execute(&mut conn)
                            .await?;
                    }
                }

                let interested_categories =
                    load_interested_categories(&mut conn, profile.id).await?;

                Ok(ProfileWithCategories {
                    profile,
                    interested_categories,
                })
            })
        })
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

async fn load_interested_categories(
    conn: &mut AsyncPgConnection,
    profile_id: i32,
) -> Result<Vec<Category>, diesel::result::Error> {
    profile_categories::table
        .inner_join(categories::table)
        .filter(profile_categories::profile_id.eq(profile_id))
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(conn)
        .await
}

fn invalid_credentials() -> (StatusCode, String) {
    (StatusCode::UNAUTHORIZED, "invalid credentials".to_owned())
}

async fn create_password_hash(password: String) -> Result<String, (StatusCode, String)> {
    let hashed_password = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing task failed: {}", e),
            )
        })?
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Hashing error: {}", e),
            )
        })?;

    Ok(hashed_password)
}
