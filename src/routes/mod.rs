use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde_json::json;
use tera::{Context, Tera};

use crate::domain::types::{CategoryId, NoteId};
use crate::services::ServiceError;

pub mod categories;
pub mod main;
pub mod notes;

/// Registers the overview page and the `/api` scope.
///
/// Literal note paths are registered before `/notes/{id}` so they are not
/// captured by the id matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ServiceError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ServiceError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ServiceError::Validation(err.to_string()).into()),
    )
    .service(main::index)
    .service(
        web::scope("/api")
            .service(notes::list_notes)
            .service(notes::list_active_notes)
            .service(notes::list_archived_notes)
            .service(notes::list_notes_by_category)
            .service(notes::create_note)
            .service(notes::get_note)
            .service(notes::update_note)
            .service(notes::delete_note)
            .service(notes::toggle_archive)
            .service(notes::list_note_categories)
            .service(notes::add_category_to_note)
            .service(notes::remove_category_from_note)
            .service(categories::list_categories)
            .service(categories::create_category)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category),
    );
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Internal => "INTERNAL_ERROR",
        };
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "code": code,
        }))
    }
}

/// Converts a raw path id. Ids below one cannot exist, so they are reported
/// as missing rather than malformed.
pub(crate) fn note_id(raw: i32) -> Result<NoteId, ServiceError> {
    NoteId::new(raw).map_err(|_| ServiceError::note_not_found(raw))
}

pub(crate) fn category_id(raw: i32) -> Result<CategoryId, ServiceError> {
    CategoryId::new(raw).map_err(|_| ServiceError::category_not_found(raw))
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
