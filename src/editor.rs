//! In-memory editing session for one template: the section list, title and
//! default styles, plus the Draft/Saved persistence state machine.
//!
//! The session owns all local state and mutates it synchronously; remote
//! calls go through the gateway traits so storage faults can never corrupt
//! what the user is editing.

use crate::blob::{BlobStore, StoredImage};
use crate::errors::AppError;
use crate::models::section::{SectionId, SectionKind, SectionList};
use crate::models::style::{StylePatch, StyleSet, resolve};
use crate::models::template::{TemplateRecord, TemplateSubmission, validate_submission};
use crate::render;

/// Remote persistence operations as observed by the editor. The production
/// implementation wraps the templates table; tests substitute their own.
pub trait PersistenceGateway {
    fn create(&mut self, sub: &TemplateSubmission) -> Result<i64, AppError>;
    fn fetch_by_id(&mut self, id: i64) -> Result<Option<TemplateRecord>, AppError>;
    fn update_by_id(&mut self, id: i64, sub: &TemplateSubmission)
    -> Result<TemplateRecord, AppError>;
}

/// Image blob upload as observed by the editor.
pub trait BlobGateway {
    fn upload(&mut self, bytes: &[u8]) -> Result<StoredImage, AppError>;
}

/// Gateway backed by the local templates table. The layout skeleton is the
/// gateway's, not the caller's: it is captured into the record on create and
/// preserved on update, mirroring the HTTP create endpoint.
pub struct SqliteGateway<'a> {
    conn: &'a rusqlite::Connection,
    layout: &'a str,
}

impl<'a> SqliteGateway<'a> {
    pub fn new(conn: &'a rusqlite::Connection, layout: &'a str) -> Self {
        SqliteGateway { conn, layout }
    }
}

impl PersistenceGateway for SqliteGateway<'_> {
    fn create(&mut self, sub: &TemplateSubmission) -> Result<i64, AppError> {
        crate::models::template::create(self.conn, sub, self.layout)
    }

    fn fetch_by_id(&mut self, id: i64) -> Result<Option<TemplateRecord>, AppError> {
        crate::models::template::find_by_id(self.conn, id)
    }

    fn update_by_id(
        &mut self,
        id: i64,
        sub: &TemplateSubmission,
    ) -> Result<TemplateRecord, AppError> {
        crate::models::template::update(self.conn, id, sub)?.ok_or(AppError::NotFound)
    }
}

impl BlobGateway for crate::blob::BlobStore {
    fn upload(&mut self, bytes: &[u8]) -> Result<StoredImage, AppError> {
        BlobStore::upload(self, bytes)
    }
}

/// Coarse busy indicator. One value with named concerns instead of a set of
/// independent flags, so updates stay atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Working,
    UploadingImage,
}

/// Compiled output ready for delivery as an attachment.
#[derive(Debug, Clone)]
pub struct CompiledDownload {
    pub id: i64,
    pub file_name: String,
    pub html: String,
}

/// One user's editing session for one template.
#[derive(Debug)]
pub struct EditorSession {
    title: String,
    default_styles: StyleSet,
    layout: String,
    sections: SectionList,
    saved_id: Option<i64>,
    activity: Activity,
}

impl EditorSession {
    /// Fresh Draft session, seeded with one empty text and one empty image
    /// section.
    pub fn new(layout: impl Into<String>) -> Self {
        let mut sections = SectionList::new();
        sections.add(SectionKind::Text);
        sections.add(SectionKind::Image);
        EditorSession {
            title: String::new(),
            default_styles: StyleSet::default(),
            layout: layout.into(),
            sections,
            saved_id: None,
            activity: Activity::Idle,
        }
    }

    /// Resume editing a persisted template. The session starts Saved,
    /// holding the record's id; sections get fresh in-memory ids.
    pub fn from_record(record: &TemplateRecord) -> Self {
        let default_styles = resolve(&StylePatch::default(), &record.styles);
        EditorSession {
            title: record.title.clone(),
            default_styles: default_styles.clone(),
            layout: record.layout.clone(),
            sections: SectionList::from_records(&record.content, &default_styles),
            saved_id: Some(record.id),
            activity: Activity::Idle,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn default_styles(&self) -> &StyleSet {
        &self.default_styles
    }

    /// Merge a patch onto the session-wide default styles.
    pub fn update_default_styles(&mut self, patch: &StylePatch) {
        self.default_styles = resolve(&StylePatch::from(&self.default_styles), patch);
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut SectionList {
        &mut self.sections
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Saved once a create call has succeeded; the transition is one-way.
    pub fn is_saved(&self) -> bool {
        self.saved_id.is_some()
    }

    pub fn template_id(&self) -> Option<i64> {
        self.saved_id
    }

    /// Snapshot the session as a wire submission. The image list is derived
    /// here, from image sections with non-empty content, in sequence order.
    pub fn snapshot(&self) -> TemplateSubmission {
        TemplateSubmission {
            title: self.title.clone(),
            content: Some(self.sections.to_records()),
            images: self.sections.image_urls(),
            styles: StylePatch::from(&self.default_styles),
            layout: Some(self.layout.clone()),
        }
    }

    /// Persist the current snapshot: create while Draft (acquiring the id),
    /// update once Saved. A failed call leaves the session untouched.
    pub fn save<G: PersistenceGateway>(&mut self, gateway: &mut G) -> Result<i64, AppError> {
        let sub = self.snapshot();
        let errors = validate_submission(&sub);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors.join("; ")));
        }
        self.activity = Activity::Working;
        let result = match self.saved_id {
            Some(id) => gateway.update_by_id(id, &sub).map(|record| record.id),
            None => gateway.create(&sub),
        };
        self.activity = Activity::Idle;
        let id = result?;
        self.saved_id = Some(id);
        Ok(id)
    }

    /// Compile the persisted template for delivery. Always saves first, so a
    /// Draft acquires its id implicitly; a failed save fails the download
    /// with the save's error and no output is produced without an id.
    pub fn download<G: PersistenceGateway>(
        &mut self,
        gateway: &mut G,
    ) -> Result<CompiledDownload, AppError> {
        let id = self.save(gateway)?;
        let record = gateway.fetch_by_id(id)?.ok_or(AppError::NotFound)?;
        let html = render::compile(&record).map_err(|e| {
            log::error!("Error rendering template {id}: {e}");
            AppError::Render
        })?;
        Ok(CompiledDownload {
            id,
            file_name: format!("email-template-{id}.html"),
            html,
        })
    }

    /// Upload image bytes for a section. Fire-and-forget: no retry, no
    /// cancellation; on failure the section's content stays unchanged.
    pub fn upload_image<G: BlobGateway>(
        &mut self,
        gateway: &mut G,
        section_id: SectionId,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        self.activity = Activity::UploadingImage;
        let result = gateway.upload(bytes);
        self.activity = Activity::Idle;
        let stored = result?;
        self.sections.update_content(section_id, stored.url.clone());
        Ok(stored.url)
    }
}
