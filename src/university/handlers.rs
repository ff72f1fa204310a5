use super::models::{
    CreateUniversityWithCategories, HomePage, HomeQuery, Language, University, UniversityCategory,
    UniversityDetail, UniversityFilter, UniversityWithCategories, UpdateUniversity,
};
use crate::category::models::Category;
use crate::program::models::Program;
use crate::utils::{db_error, internal_error, types::Pool, validation_error};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use axum_unihub::schema::{categories, programs, universities, university_categories};
use diesel::prelude::*;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use validator::Validate;

const DEFAULT_LIMIT: i64 = 6;
const PAGE_STEP: i64 = 6;

/// The "show more" limit comes straight from the query string; anything that
/// does not parse as a non-negative integer silently falls back to the default.
fn effective_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 0)
        .unwrap_or(DEFAULT_LIMIT)
}

async fn attach_categories(
    conn: &mut AsyncPgConnection,
    unis: Vec<University>,
) -> Result<Vec<UniversityWithCategories>, diesel::result::Error> {
    let rows: Vec<(UniversityCategory, Category)> = UniversityCategory::belonging_to(&unis)
        .inner_join(categories::table)
        .select((UniversityCategory::as_select(), Category::as_select()))
        .load(conn)
        .await?;

    Ok(rows
        .grouped_by(&unis)
        .into_iter()
        .zip(unis)
        .map(|(links, university)| UniversityWithCategories {
            tuition_level: university.tuition_level(),
            categories: links.into_iter().map(|(_, category)| category).collect(),
            university,
        })
        .collect())
}

/// Home page listing: most popular universities first, optionally narrowed
/// to one category, paginated by growing the limit in steps of six.
pub async fn home(
    State(pool): State<Pool>,
    Query(params): Query<HomeQuery>,
) -> Result<Json<HomePage>, (StatusCode, String)> {
    let limit = effective_limit(params.limit.as_deref());

    let mut conn = pool.get().await.map_err(internal_error)?;

    let chips = categories::table
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    // Unknown slug is a 404, not an empty listing.
    let selected_category = match params.category.as_deref() {
        Some(slug) => Some(
            categories::table
                .filter(categories::slug.eq(slug))
                .select(Category::as_select())
                .first(&mut conn)
                .await
                .map_err(db_error)?,
        ),
        None => None,
    };

    let (total_count, unis) = match &selected_category {
        Some(category) => {
            let total = university_categories::table
                .filter(university_categories::category_id.eq(category.id))
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(db_error)?;

            let unis = universities::table
                .inner_join(university_categories::table)
                .filter(university_categories::category_id.eq(category.id))
                .order(universities::popularity_score.desc())
                .limit(limit)
                .select(University::as_select())
                .load(&mut conn)
                .await
                .map_err(db_error)?;

            (total, unis)
        }
        None => {
            let total = universities::table
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(db_error)?;

            let unis = universities::table
                .order(universities::popularity_score.desc())
                .limit(limit)
                .select(University::as_select())
                .load(&mut conn)
                .await
                .map_err(db_error)?;

            (total, unis)
        }
    };

    let universities = attach_categories(&mut conn, unis).await.map_err(db_error)?;

    Ok(Json(HomePage {
        categories: chips,
        selected_category,
        shown_count: universities.len(),
        show_more: total_count > limit,
        next_limit: limit + PAGE_STEP,
        total_count,
        universities,
    }))
}

/// Full list with the admin filters: city, type, grants, language flags and
/// a substring search over name/short name. Ordered by name.
pub async fn get_universities(
    State(pool): State<Pool>,
    Query(filter): Query<UniversityFilter>,
) -> Result<Json<Vec<UniversityWithCategories>>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let mut query = universities::table
        .select(University::as_select())
        .into_boxed();

    if let Some(city) = filter.city {
        query = query.filter(universities::city.eq(city));
    }
    if let Some(uni_type) = filter.uni_type {
        query = query.filter(universities::uni_type.eq(uni_type));
    }
    if let Some(has_grants) = filter.has_grants {
        query = query.filter(universities::has_grants.eq(has_grants));
    }
    if let Some(language) = filter.language {
        query = match language {
            Language::Kz => query.filter(universities::language_kz.eq(true)),
            Language::Ru => query.filter(universities::language_ru.eq(true)),
            Language::En => query.filter(universities::language_en.eq(true)),
        };
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        query = query.filter(
            universities::name
                .ilike(pattern.clone())
                .or(universities::short_name.ilike(pattern)),
        );
    }

    let unis = query
        .order(universities::name.asc())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    let res = attach_categories(&mut conn, unis).await.map_err(db_error)?;

    Ok(Json(res))
}

pub async fn get_university_by_id(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<UniversityDetail>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let university = universities::table
        .find(id)
        .select(University::as_select())
        .first(&mut conn)
        .await
        .map_err(db_error)?;

    let uni_programs = Program::belonging_to(&university)
        .order(programs::name.asc())
        .select(Program::as_select())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    let uni_categories = university_categories::table
        .inner_join(categories::table)
        .filter(university_categories::university_id.eq(university.id))
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(UniversityDetail {
        tuition_level: university.tuition_level(),
        university,
        categories: uni_categories,
        programs: uni_programs,
    }))
}

pub async fn create_university_with_categories(
    State(pool): State<Pool>,
    Json(payload): Json<CreateUniversityWithCategories>,
) -> Result<Json<UniversityWithCategories>, (StatusCode, String)> {
    payload.university.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = conn
        .transaction::<UniversityWithCategories, diesel::result::Error, _>(move |mut conn| {
            Box::pin(async move {
                let university = diesel::insert_into(universities::table)
                    .values(&payload.university)
                    .returning(University::as_returning())
                    .get_result(&mut conn)
                    .await?;

                let links = payload
                    .category_ids
                    .iter()
                    .map(|category_id| UniversityCategory {
                        university_id: university.id,
                        category_id: *category_id,
                    })
                    .collect::<Vec<_>>();

                if !links.is_empty() {
                    diesel::insert_into(university_categories::table)
                        .values(&links)
                        .execute(&mut conn)
                        .await?;
                }

                let cats = categories::table
                    .filter(categories::id.eq_any(&payload.category_ids))
                    .order(categories::name.asc())
                    .select(Category::as_select())
                    .load(&mut conn)
                    .await?;

                Ok(UniversityWithCategories {
                    tuition_level: university.tuition_level(),
                    categories: cats,
                    university,
                })
            })
        })
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

pub async fn update_university(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUniversity>,
) -> Result<Json<University>, (StatusCode, String)> {
    payload.validate().map_err(validation_error)?;

    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::update(universities::table.find(id))
        .set(&payload)
        .returning(University::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

/// Deleting a university cascades to its programs and saved rows.
pub async fn remove_university(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<University>, (StatusCode, String)> {
    let mut conn = pool.get().await.map_err(internal_error)?;

    let res = diesel::delete(universities::table.find(id))
        .returning(University::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(db_error)?;

    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_missing() {
        assert_eq!(effective_limit(None), 6);
    }

    #[test]
    fn limit_defaults_on_junk() {
        assert_eq!(effective_limit(Some("abc")), 6);
        assert_eq!(effective_limit(Some("")), 6);
        assert_eq!(effective_limit(Some("6.5")), 6);
        assert_eq!(effective_limit(Some("-3")), 6);
    }

    #[test]
    fn limit_parses_valid_values() {
        assert_eq!(effective_limit(Some("12")), 12);
        assert_eq!(effective_limit(Some(" 18 ")), 18);
        assert_eq!(effective_limit(Some("0")), 0);
    }

    #[test]
    fn show_more_and_next_limit() {
        let (total, limit) = (10_i64, 6_i64);
        assert!(total > limit);
        assert_eq!(limit + PAGE_STEP, 12);

        let (total, limit) = (6_i64, 6_i64);
        assert!(total <= limit);
    }
}
