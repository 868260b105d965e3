pub mod queries;
pub mod types;

pub use queries::{create, find_by_id, update, validate_submission};
pub use types::{TemplateRecord, TemplateSubmission};
