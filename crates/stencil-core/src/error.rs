//! Error kinds surfaced by the scaffolding pipeline
//!
//! Every error is fatal to a run: each stage returns the first one it hits
//! and the entrypoint reports it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which half of a template file failed to compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFragment {
    /// The file's path relative to the template root
    Path,
    /// The file's contents
    Content,
}

impl fmt::Display for TemplateFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFragment::Path => write!(f, "path"),
            TemplateFragment::Content => write!(f, "content"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("Failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Prompt for '{key}' aborted")]
    PromptAborted {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk template directory")]
    SourceWalk(#[from] walkdir::Error),

    #[error("Failed to read template {}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template path {} is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("Invalid {fragment} template in {}", path.display())]
    TemplateParse {
        path: PathBuf,
        fragment: TemplateFragment,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render {fragment} template of {}", path.display())]
    TemplateExec {
        path: PathBuf,
        fragment: TemplateFragment,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Rendered path '{rendered}' for {} escapes the destination or is empty", path.display())]
    UnsafeOutputPath { path: PathBuf, rendered: String },

    #[error("Failed to create directory {}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {}", path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing required flag --{flag}")]
    MissingFlag { flag: &'static str },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
