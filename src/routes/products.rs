use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::products::{ProductForm, ProductListParams, ProductPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    get_product as get_product_service, list_products as list_products_service,
    update_product as update_product_service,
};

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_products_service(params.into_inner(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match get_product_service(id.into_inner(), repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err),
    }
}

#[post("/products")]
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let payload: ProductPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&e.into()),
    };

    match create_product_service(payload, &user, repo.get_ref()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(&err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    let payload: ProductPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(&e.into()),
    };

    match update_product_service(id.into_inner(), payload, &user, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(id.into_inner(), &user, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}
