use rusqlite::{Connection, OptionalExtension, params};

use super::types::{TemplateRecord, TemplateSubmission};
use crate::errors::AppError;
use crate::models::section::SectionRecord;
use crate::models::style::StylePatch;

/// Field-presence checks run before any persistence attempt.
/// Returns human-readable problems; empty means the submission is valid.
pub fn validate_submission(sub: &TemplateSubmission) -> Vec<String> {
    let mut errors = Vec::new();
    if sub.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }
    if sub.content.is_none() {
        errors.push("Section list is required".to_string());
    }
    errors
}

/// Insert a new template. The layout is captured here, once; later updates
/// never overwrite it. Returns the new row id.
pub fn create(
    conn: &Connection,
    sub: &TemplateSubmission,
    layout: &str,
) -> Result<i64, AppError> {
    let content = sub.content.as_deref().unwrap_or(&[]);
    let created_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO templates (title, content, images, styles, layout, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            sub.title,
            serde_json::to_string(content)?,
            serde_json::to_string(&sub.images)?,
            serde_json::to_string(&sub.styles)?,
            layout,
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a template by id, decoding the JSON columns.
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<TemplateRecord>, AppError> {
    let row = conn
        .query_row(
            "SELECT id, title, content, images, styles, layout, created_at \
             FROM templates WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            },
        )
        .optional()?;

    let Some((id, title, content, images, styles, layout, created_at)) = row else {
        return Ok(None);
    };

    Ok(Some(TemplateRecord {
        id,
        title,
        content: serde_json::from_str::<Vec<SectionRecord>>(&content)?,
        images: serde_json::from_str::<Vec<String>>(&images)?,
        styles: serde_json::from_str::<StylePatch>(&styles)?,
        layout,
        created_at,
    }))
}

/// Update title, content, images and default styles of an existing template.
/// The stored layout is preserved regardless of what the submission carries.
/// Returns the updated record, or None when the id does not exist.
pub fn update(
    conn: &Connection,
    id: i64,
    sub: &TemplateSubmission,
) -> Result<Option<TemplateRecord>, AppError> {
    let content = sub.content.as_deref().unwrap_or(&[]);
    let changed = conn.execute(
        "UPDATE templates SET title = ?1, content = ?2, images = ?3, styles = ?4 \
         WHERE id = ?5",
        params![
            sub.title,
            serde_json::to_string(content)?,
            serde_json::to_string(&sub.images)?,
            serde_json::to_string(&sub.styles)?,
            id,
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    find_by_id(conn, id)
}
