//! Stencil Core - render a project from a template directory
//!
//! A template directory holds a `config.json` of key -> default values and
//! any number of files. Every file's contents and relative path are
//! Handlebars templates rendered against the final values.
//!
//! # Architecture
//!
//! - **Layer 1: Core Operations** - [`Configuration::load`], [`prompt::collect`],
//!   [`render_templates`]
//! - **Layer 2: Workflow** - [`scaffold`] chains the three for callers with
//!   their own [`Prompter`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front end
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use stencil_core::{scaffold, AcceptDefaults};
//! use std::path::Path;
//!
//! let written = scaffold(Path::new("templates/basic"), Path::new("out"), &mut AcceptDefaults)?;
//! println!("rendered {} files", written.len());
//! # Ok::<(), stencil_core::ScaffoldError>(())
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

use std::path::{Path, PathBuf};

// Re-export main types for convenience
pub use config::{Configuration, CONFIG_FILE_NAME};
pub use error::{Result, ScaffoldError, TemplateFragment};
pub use prompt::{AcceptDefaults, Prompter, ValueSet};
pub use templates::render_templates;

#[cfg(feature = "tui")]
pub use tui::{run, RunArgs};

/// Load `config.json` from `source_dir`, collect values through `prompter`
/// and render the tree into `dest_dir`
pub fn scaffold<P: Prompter + ?Sized>(
    source_dir: &Path,
    dest_dir: &Path,
    prompter: &mut P,
) -> Result<Vec<PathBuf>> {
    let config = Configuration::load(&source_dir.join(CONFIG_FILE_NAME))?;
    let values = prompt::collect(&config, prompter)?;
    render_templates(source_dir, dest_dir, &values)
}
