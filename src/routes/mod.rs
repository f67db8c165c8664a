use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod products;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps a service error to its HTTP response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::Database(_) => HttpResponse::Conflict().json(body),
        ServiceError::InvalidArgument(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}
