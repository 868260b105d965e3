pub mod blob;
pub mod db;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
