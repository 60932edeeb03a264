//! Handlebars setup shared by path and content templates

use crate::prompt::ValueSet;
use handlebars::{no_escape, Handlebars, RenderError, Template, TemplateError};
use regex::Regex;
use std::io::Write;
use std::sync::LazyLock;

/// Registry name of the relative-path template of the file being rendered
pub const PATH_TEMPLATE: &str = "path";

/// Registry name of the content template of the file being rendered
pub const CONTENT_TEMPLATE: &str = "content";

/// `{{.Key}}` (optionally `{{~ .Key`): a dotted variable marker.
/// Requires an identifier after the dot so `{{./x}}`, `{{..}}` and `{{.}}` are untouched.
static DOTTED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(~?\s*)\.([A-Za-z_])").expect("static regex is valid"));

/// A run of backslashes directly before `{{`
static BACKSLASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\+)\{\{").expect("static regex is valid"));

/// `{{- ` trim marker (the whitespace is required, `{{-1}}` is not a trim)
static TRIM_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{-(\s)").expect("static regex is valid"));

/// ` -}}` trim marker
static TRIM_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s)-\}\}").expect("static regex is valid"));

/// Rewrite Go-style markers into plain Handlebars.
///
/// - Backslashes before `{{` are literal text: Handlebars drops one backslash
///   from such a run, so one is added back and the marker is still substituted
/// - `{{- ` and ` -}}` become `{{~ ` and ` ~}}`
/// - `{{.Name}}` becomes `{{Name}}`
pub fn normalize_markers(source: &str) -> String {
    let source = BACKSLASH_RUN.replace_all(source, r"${1}\{{");
    let source = TRIM_OPEN.replace_all(&source, "{{~${1}");
    let source = TRIM_CLOSE.replace_all(&source, "${1}~}}");
    DOTTED_MARKER
        .replace_all(&source, "{{${1}${2}")
        .into_owned()
}

/// Strict, non-escaping Handlebars registry.
///
/// Strict mode turns a reference to a key missing from the [`ValueSet`]
/// into a render error instead of an empty string. Escaping is disabled
/// because output is source code and config files, not HTML.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        Self { registry }
    }

    /// Compile `source` and register it under `name`, replacing any previous template
    pub fn compile(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        let template = Template::compile(&normalize_markers(source))?;
        self.registry.register_template(name, template);
        Ok(())
    }

    pub fn render(&self, name: &str, values: &ValueSet) -> Result<String, RenderError> {
        self.registry.render(name, values)
    }

    /// Render straight into `writer` without buffering the whole output
    pub fn render_to_write<W: Write>(
        &self,
        name: &str,
        values: &ValueSet,
        writer: W,
    ) -> Result<(), RenderError> {
        self.registry.render_to_write(name, values, writer)
    }
}
