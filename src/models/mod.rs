pub mod section;
pub mod style;
pub mod template;
