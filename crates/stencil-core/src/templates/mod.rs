//! Template compilation and rendering
//!
//! This module provides:
//! - A strict Handlebars engine shared by path and content templates
//! - The directory walk that renders a template tree into a destination

pub mod engine;
pub mod renderer;

pub use engine::{normalize_markers, TemplateEngine};
pub use renderer::render_templates;
