use axum::Json;
use serde::Serialize;

use crate::templates::{self, TemplateId};

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        templates::all()
            .iter()
            .map(|t| TemplateSummary { id: t.id, name: t.name, description: t.description })
            .collect(),
    )
}
