use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::note::NoteChanges;
use crate::forms::notes::{CreateNoteForm, CreateNoteFormPayload, UpdateNoteForm};
use crate::repository::DieselRepository;
use crate::routes::{category_id, note_id};
use crate::services::ServiceError;
use crate::services::notes as notes_service;

#[derive(Debug, Deserialize)]
pub struct ArchiveQueryParams {
    /// `true` (the default) lists active notes, `false` archived ones.
    pub active: Option<bool>,
}

impl ArchiveQueryParams {
    fn active_only(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

#[get("/notes")]
pub async fn list_notes(
    params: web::Query<ArchiveQueryParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let notes = notes_service::list_notes(params.active_only(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[get("/notes/active")]
pub async fn list_active_notes(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let notes = notes_service::list_notes(true, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[get("/notes/archived")]
pub async fn list_archived_notes(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let notes = notes_service::list_notes(false, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[get("/notes/category/{category_id}")]
pub async fn list_notes_by_category(
    path: web::Path<i32>,
    params: web::Query<ArchiveQueryParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let category_id = category_id(path.into_inner())?;
    let notes =
        notes_service::list_notes_by_category(category_id, params.active_only(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(notes))
}

#[get("/notes/{id}")]
pub async fn get_note(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = note_id(path.into_inner())?;
    let note = notes_service::get_note_with_categories(id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(note))
}

#[post("/notes")]
pub async fn create_note(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateNoteForm>,
) -> Result<HttpResponse, ServiceError> {
    let payload: CreateNoteFormPayload = form.try_into()?;
    let note = notes_service::create_note(payload, repo.get_ref())?;
    Ok(HttpResponse::Created().json(note))
}

#[put("/notes/{id}")]
pub async fn update_note(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateNoteForm>,
) -> Result<HttpResponse, ServiceError> {
    let id = note_id(path.into_inner())?;
    let changes: NoteChanges = form.try_into()?;
    let note = notes_service::update_note(id, changes, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(note))
}

#[delete("/notes/{id}")]
pub async fn delete_note(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = note_id(path.into_inner())?;
    notes_service::delete_note(id, repo.get_ref())?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/notes/{id}/archive")]
pub async fn toggle_archive(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = note_id(path.into_inner())?;
    let note = notes_service::toggle_archive(id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(note))
}

#[get("/notes/{id}/categories")]
pub async fn list_note_categories(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let id = note_id(path.into_inner())?;
    let categories = notes_service::list_categories_for_note(id, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/notes/{note_id}/categories/{category_id}")]
pub async fn add_category_to_note(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (raw_note_id, raw_category_id) = path.into_inner();
    notes_service::add_category_to_note(
        note_id(raw_note_id)?,
        category_id(raw_category_id)?,
        repo.get_ref(),
    )?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/notes/{note_id}/categories/{category_id}")]
pub async fn remove_category_from_note(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (raw_note_id, raw_category_id) = path.into_inner();
    notes_service::remove_category_from_note(
        note_id(raw_note_id)?,
        category_id(raw_category_id)?,
        repo.get_ref(),
    )?;
    Ok(HttpResponse::NoContent().finish())
}
