use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::category::CategoryChanges;
use crate::forms::categories::{CreateCategoryForm, CreateCategoryFormPayload, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::category_id;
use crate::services::ServiceError;
use crate::services::categories as categories_service;

#[get("/categories")]
pub async fn list_categories(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let categories = categories_service::list_categories(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/categories/{id}")]
pub async fn get_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = category_id(path.into_inner())?;
    let category = categories_service::get_category(id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(category))
}

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCategoryForm>,
) -> Result<HttpResponse, ServiceError> {
    let payload: CreateCategoryFormPayload = form.try_into()?;
    let category = categories_service::create_category(payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/categories/{id}")]
pub async fn update_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> Result<HttpResponse, ServiceError> {
    let id = category_id(path.into_inner())?;
    let changes: CategoryChanges = form.try_into()?;
    let category = categories_service::update_category(id, changes, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = category_id(path.into_inner())?;
    categories_service::delete_category(id, repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}
