//! Template configuration (`config.json`) loading

pub mod loader;

pub use loader::{Configuration, CONFIG_FILE_NAME};
