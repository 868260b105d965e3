use serde::{Deserialize, Serialize};

use crate::models::section::SectionRecord;
use crate::models::style::StylePatch;

/// A persisted email template, as stored in the `templates` table and as
/// returned by `GET /api/email/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: i64,
    pub title: String,
    pub content: Vec<SectionRecord>,
    pub images: Vec<String>,
    pub styles: StylePatch,
    pub layout: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Request body for create and update. `layout` is accepted on create only;
/// updates silently keep the layout captured at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSubmission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<Vec<SectionRecord>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub styles: StylePatch,
    #[serde(default)]
    pub layout: Option<String>,
}
