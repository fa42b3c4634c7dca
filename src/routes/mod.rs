//! JSON HTTP API mapping requests onto the service layer.

use actix_web::{HttpResponse, ResponseError, error, web};

use crate::domain::types::{SegmentSlug, UserId};
use crate::dto::ErrorDto;
use crate::services::ServiceError;

pub mod segments;
pub mod users;

/// Register every API route under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config())
            .service(segments::list_segments)
            .service(segments::get_segment)
            .service(segments::create_segment)
            .service(segments::update_segment)
            .service(segments::delete_segment)
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::change_segments_of_user)
            .service(users::get_active_segments_of_user)
            .service(users::list_user_history),
    );
}

/// Body extraction failures keep actix's status code but get a JSON body.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::build(err.status_code()).json(ErrorDto {
            error: err.to_string(),
        });
        error::InternalError::from_response(err, response).into()
    })
}

/// Translate a service failure into its HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = ErrorDto {
        error: err.to_string(),
    };
    match err {
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(body),
        ServiceError::AlreadyExists(_) => HttpResponse::Conflict().json(body),
        ServiceError::InvalidInput(_) => HttpResponse::BadRequest().json(body),
        ServiceError::ReadError | ServiceError::WriteError => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ServiceError> {
    let id = raw
        .parse::<i32>()
        .map_err(|_| ServiceError::InvalidInput(format!("user id must be an integer: {raw}")))?;
    Ok(UserId::new(id)?)
}

pub(crate) fn parse_slug(raw: String) -> Result<SegmentSlug, ServiceError> {
    Ok(SegmentSlug::new(raw)?)
}
