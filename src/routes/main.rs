use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::types::{ArchiveState, CategoryId};
use crate::repository::DieselRepository;
use crate::routes::render_template;
use crate::services::ServiceError;
use crate::services::categories::list_categories;
use crate::services::notes::{list_notes, list_notes_by_category};

/// Page filters. Both are kept as raw strings so a malformed value falls
/// back to the unfiltered page instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct IndexQueryParams {
    pub state: Option<String>,
    pub category: Option<String>,
}

impl IndexQueryParams {
    fn archive_state(&self) -> ArchiveState {
        self.state
            .as_deref()
            .and_then(|raw| ArchiveState::try_from(raw).ok())
            .unwrap_or_default()
    }

    fn category_id(&self) -> Option<CategoryId> {
        self.category
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .and_then(|id| CategoryId::new(id).ok())
    }
}

#[get("/")]
pub async fn index(
    params: web::Query<IndexQueryParams>,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let state = params.archive_state();
    let active_only = state == ArchiveState::Active;
    let selected = params.category_id();

    let notes = match selected {
        Some(category_id) => list_notes_by_category(category_id, active_only, repo.get_ref()),
        None => list_notes(active_only, repo.get_ref()),
    };
    let notes = match notes {
        Ok(notes) => notes,
        Err(ServiceError::NotFound(_)) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let categories = match list_categories(repo.get_ref()) {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Failed to render index page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = Context::new();
    context.insert("notes", &notes);
    context.insert("categories", &categories);
    context.insert("archive_state", state.as_str());
    context.insert("show_archived", &state.is_archived());
    context.insert("selected_category", &selected.map(CategoryId::get));
    render_template(&tera, "main/index.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(state: Option<&str>, category: Option<&str>) -> IndexQueryParams {
        IndexQueryParams {
            state: state.map(String::from),
            category: category.map(String::from),
        }
    }

    #[test]
    fn parses_page_filters() {
        let parsed = params(Some("archived"), Some("3"));
        assert_eq!(parsed.archive_state(), ArchiveState::Archived);
        assert_eq!(parsed.category_id(), CategoryId::new(3).ok());
    }

    #[test]
    fn malformed_page_filters_fall_back_to_defaults() {
        let parsed = params(Some("deleted"), Some("abc"));
        assert_eq!(parsed.archive_state(), ArchiveState::Active);
        assert_eq!(parsed.category_id(), None);

        assert_eq!(params(None, Some("0")).category_id(), None);
    }
}
