use serde::{Deserialize, Serialize};

use super::style::{StylePatch, StyleSet, resolve};

/// Content kind of a section. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Text,
    Image,
}

pub type SectionId = u64;

/// One ordered content unit in the editor. For image sections `content`
/// holds the URL of the uploaded blob, not the bytes themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub kind: SectionKind,
    pub content: String,
    pub styles: StyleSet,
}

/// A section as it appears on the wire and in the `templates.content`
/// column: no id, styles possibly partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub styles: StylePatch,
}

/// Ordered, identity-stable collection of sections.
///
/// Ids come from a monotonic counter and are never reused, so an id removed
/// by [`SectionList::remove`] cannot reappear. Sequence order is the sole
/// source of rendering order.
#[derive(Debug, Clone)]
pub struct SectionList {
    sections: Vec<Section>,
    next_id: SectionId,
    drag: Option<SectionId>,
}

impl Default for SectionList {
    fn default() -> Self {
        SectionList::new()
    }
}

impl SectionList {
    pub fn new() -> Self {
        SectionList {
            sections: Vec::new(),
            next_id: 1,
            drag: None,
        }
    }

    /// Rebuild a list from persisted records, assigning fresh ids. Partial
    /// record styles are resolved against the template's default styles.
    pub fn from_records(records: &[SectionRecord], defaults: &StyleSet) -> Self {
        let mut list = SectionList::new();
        for record in records {
            let id = list.add(record.kind);
            list.update_content(id, record.content.clone());
            list.update_styles_over(id, defaults, &record.styles);
        }
        list
    }

    /// Append a new section with a fresh id, empty content, default styles.
    pub fn add(&mut self, kind: SectionKind) -> SectionId {
        let id = self.next_id;
        self.next_id += 1;
        self.sections.push(Section {
            id,
            kind,
            content: String::new(),
            styles: StyleSet::default(),
        });
        id
    }

    /// Remove the section with this id; no-op when absent. Removing the
    /// section currently being dragged cancels the drag.
    pub fn remove(&mut self, id: SectionId) {
        if self.drag == Some(id) {
            self.drag = None;
        }
        self.sections.retain(|s| s.id != id);
    }

    /// Reorder tie-break: remove the section first, then insert immediately
    /// before `target_index` as computed against the shortened sequence.
    /// Out-of-range targets clamp to the end. No-op for unknown ids.
    pub fn move_to(&mut self, id: SectionId, target_index: usize) {
        let Some(from) = self.position(id) else {
            return;
        };
        let section = self.sections.remove(from);
        let at = target_index.min(self.sections.len());
        self.sections.insert(at, section);
    }

    /// Replace the content of the matching section; silent no-op when absent.
    pub fn update_content(&mut self, id: SectionId, content: impl Into<String>) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == id) {
            s.content = content.into();
        }
    }

    /// Merge a style patch onto the section's current styles.
    pub fn update_styles(&mut self, id: SectionId, patch: &StylePatch) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == id) {
            s.styles = resolve(&StylePatch::from(&s.styles), patch);
        }
    }

    /// Merge a patch onto an explicit base instead of the section's current
    /// styles. Used when hydrating persisted records.
    fn update_styles_over(&mut self, id: SectionId, base: &StyleSet, patch: &StylePatch) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == id) {
            s.styles = resolve(&StylePatch::from(base), patch);
        }
    }

    pub fn begin_drag(&mut self, id: SectionId) {
        if self.position(id).is_some() {
            self.drag = Some(id);
        }
    }

    /// Applied on every drag-over signal: moves the dragged section so it
    /// lands before `target_index`. No-op when no drag is in progress.
    pub fn drag_over(&mut self, target_index: usize) {
        if let Some(id) = self.drag {
            self.move_to(id, target_index);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn dragging(&self) -> Option<SectionId> {
        self.drag
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Snapshot for persistence: the ordered wire records.
    pub fn to_records(&self) -> Vec<SectionRecord> {
        self.sections
            .iter()
            .map(|s| SectionRecord {
                kind: s.kind,
                content: s.content.clone(),
                styles: StylePatch::from(&s.styles),
            })
            .collect()
    }

    /// Derived image list: URLs of image sections with non-empty content,
    /// in sequence order.
    pub fn image_urls(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter(|s| s.kind == SectionKind::Image && !s.content.is_empty())
            .map(|s| s.content.clone())
            .collect()
    }
}
