use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::membership::SegmentChanges;
use crate::dto::users::{
    CreateUserResponseDto, HistoryRecordDto, UserActiveSegmentsDto, UserDto,
};
use crate::forms::users::{ChangeSegmentsForm, CreateUserForm, CreateUserFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{error_response, parse_user_id};
use crate::services::ServiceError;
use crate::services::memberships::{
    change_segments_of_user as change_segments_of_user_service,
    get_active_segments_of_user as get_active_segments_of_user_service,
    list_user_history as list_user_history_service,
};
use crate::services::users::{
    create_user as create_user_service, get_user as get_user_service,
    list_users as list_users_service,
};

#[get("/users")]
pub async fn list_users(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_users_service(repo.get_ref()) {
        Ok(users) => {
            HttpResponse::Ok().json(users.into_iter().map(UserDto::from).collect::<Vec<_>>())
        }
        Err(err) => error_response(err),
    }
}

#[get("/users/{user_id}")]
pub async fn get_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_user_id(&user_id).and_then(|id| get_user_service(id, repo.get_ref()));

    match result {
        Ok(user) => HttpResponse::Ok().json(UserDto::from(user)),
        Err(err) => error_response(err),
    }
}

#[post("/users")]
pub async fn create_user(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateUserForm>,
) -> impl Responder {
    let payload: CreateUserFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_user_service(payload.into_new_user(), repo.get_ref()) {
        Ok(id) => HttpResponse::Created().json(CreateUserResponseDto::from(id)),
        Err(err) => error_response(err),
    }
}

#[post("/users/{user_id}/changeSegmentsOfUser")]
pub async fn change_segments_of_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ChangeSegmentsForm>,
) -> impl Responder {
    let user_id = match parse_user_id(&user_id) {
        Ok(user_id) => user_id,
        Err(err) => return error_response(err),
    };

    let changes: SegmentChanges = match form.try_into() {
        Ok(changes) => changes,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match change_segments_of_user_service(user_id, &changes, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/users/{user_id}/active")]
pub async fn get_active_segments_of_user(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_user_id(&user_id)
        .and_then(|id| get_active_segments_of_user_service(id, repo.get_ref()));

    match result {
        Ok(segments) => HttpResponse::Ok().json(UserActiveSegmentsDto::from(segments)),
        Err(err) => error_response(err),
    }
}

#[get("/users/{user_id}/history")]
pub async fn list_user_history(
    user_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        parse_user_id(&user_id).and_then(|id| list_user_history_service(id, repo.get_ref()));

    match result {
        Ok(history) => HttpResponse::Ok().json(
            history
                .into_iter()
                .map(HistoryRecordDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => error_response(err),
    }
}
