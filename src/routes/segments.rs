use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::segments::{CreateSegmentResponseDto, SegmentDto};
use crate::forms::segments::{
    CreateSegmentForm, CreateSegmentFormPayload, UpdateSegmentForm, UpdateSegmentFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_slug};
use crate::services::ServiceError;
use crate::services::segments::{
    create_segment as create_segment_service, delete_segment as delete_segment_service,
    get_segment as get_segment_service, list_segments as list_segments_service,
    update_segment as update_segment_service,
};

#[get("/segments")]
pub async fn list_segments(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_segments_service(repo.get_ref()) {
        Ok(segments) => HttpResponse::Ok().json(
            segments
                .into_iter()
                .map(SegmentDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}

#[get("/segments/{slug}")]
pub async fn get_segment(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        parse_slug(slug.into_inner()).and_then(|slug| get_segment_service(&slug, repo.get_ref()));

    match result {
        Ok(segment) => HttpResponse::Ok().json(SegmentDto::from(segment)),
        Err(err) => error_response(err),
    }
}

#[post("/segments")]
pub async fn create_segment(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateSegmentForm>,
) -> impl Responder {
    let payload: CreateSegmentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_segment_service(payload.into_new_segment(), repo.get_ref()) {
        Ok(slug) => HttpResponse::Created().json(CreateSegmentResponseDto::from(slug)),
        Err(err) => error_response(err),
    }
}

#[put("/segments/{slug}")]
pub async fn update_segment(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateSegmentForm>,
) -> impl Responder {
    let slug = match parse_slug(slug.into_inner()) {
        Ok(slug) => slug,
        Err(err) => return error_response(err),
    };

    let payload: UpdateSegmentFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_segment_service(&slug, payload.description, repo.get_ref()) {
        Ok(segment) => HttpResponse::Ok().json(SegmentDto::from(segment)),
        Err(err) => error_response(err),
    }
}

#[delete("/segments/{slug}")]
pub async fn delete_segment(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_slug(slug.into_inner())
        .and_then(|slug| delete_segment_service(&slug, repo.get_ref()));

    match result {
        Ok(segment) => HttpResponse::Ok().json(SegmentDto::from(segment)),
        Err(err) => error_response(err),
    }
}
