use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::{CategoryForm, CategoryListParams, CategoryPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<CategoryListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_categories_service(params.into_inner(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match get_category_service(id.into_inner(), repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err),
    }
}

#[post("/categories")]
pub async fn create_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload: CategoryPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&e.into()),
    };

    match create_category_service(payload, &user, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(&err),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload: CategoryPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&e.into()),
    };

    match update_category_service(id.into_inner(), payload, &user, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&err),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
