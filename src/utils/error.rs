use axum::{http::StatusCode, response::IntoResponse};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub fn internal_error<E>(err: E) -> (StatusCode, String)
where
    E: std::error::Error,
{
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Maps diesel errors onto response codes: missing rows become 404,
/// constraint violations 409/400, everything else a 500.
pub fn db_error(err: DieselError) -> (StatusCode, String) {
    match err {
        DieselError::NotFound => (StatusCode::NOT_FOUND, "record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            (StatusCode::CONFLICT, info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            (StatusCode::BAD_REQUEST, info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            (StatusCode::UNPROCESSABLE_ENTITY, info.message().to_owned())
        }
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub fn validation_error(err: validator::ValidationErrors) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (code, _) = db_error(DieselError::NotFound);
        assert_eq!(code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_errors_map_to_500() {
        let (code, _) = db_error(DieselError::RollbackTransaction);
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
