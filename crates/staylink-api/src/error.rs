//! Maps domain `AppError` to HTTP responses.
//!
//! The mapping lives here and nowhere else; services never reason about
//! status codes.
//!
//! The `IntoResponse for AppError` impl itself is defined in `staylink-core`
//! (the crate that owns `AppError`) because Rust's orphan rule forbids
//! implementing the foreign `IntoResponse` trait for the foreign `AppError`
//! type from this crate. The response body type is re-exported here so API
//! consumers can refer to it via `staylink_api::error::ApiErrorResponse`.

pub use staylink_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use staylink_core::error::AppError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::validation("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::authentication("x")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::authorization("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::conflict("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::gone("x")), StatusCode::GONE);
        assert_eq!(status_of(AppError::processing("x")), StatusCode::ACCEPTED);
        assert_eq!(
            status_of(AppError::database("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
