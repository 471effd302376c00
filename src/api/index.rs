//! `GET /` form page

use axum::{extract::State, response::Html};
use handlebars::Handlebars;
use serde::Serialize;

use super::error::ApiError;
use crate::state::AppState;

const TEMPLATE_NAME: &str = "index";
const TEMPLATE: &str = include_str!("../../templates/index.hbs");

#[derive(Serialize)]
struct IndexContext<'a> {
    areas: &'a [String],
    items: &'a [String],
    advisory_enabled: bool,
}

/// Pre-compiled index template
pub struct IndexPage {
    handlebars: Handlebars<'static>,
}

impl IndexPage {
    pub fn new() -> anyhow::Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { handlebars })
    }

    pub fn render(
        &self,
        areas: &[String],
        items: &[String],
        advisory_enabled: bool,
    ) -> Result<String, handlebars::RenderError> {
        self.handlebars.render(
            TEMPLATE_NAME,
            &IndexContext {
                areas,
                items,
                advisory_enabled,
            },
        )
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    state
        .index_page
        .render(
            state.vocabulary.areas(),
            state.vocabulary.items(),
            state.advisory.is_enabled(),
        )
        .map(Html)
        .map_err(|e| ApiError::internal(format!("Server error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_vocabulary_escaped() {
        let page = IndexPage::new().unwrap();
        let html = page
            .render(
                &["Côte d'Ivoire".to_string()],
                &["Rice, paddy".to_string(), "<script>".to_string()],
                false,
            )
            .unwrap();
        assert!(html.contains("<option value=\"Rice, paddy\">"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("no API key configured"));
    }

    #[test]
    fn test_render_hides_notice_when_enabled() {
        let page = IndexPage::new().unwrap();
        let html = page
            .render(&["India".to_string()], &["Maize".to_string()], true)
            .unwrap();
        assert!(!html.contains("no API key configured"));
    }
}
