//! Rendering a template directory into a destination directory

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Result, ScaffoldError, TemplateFragment};
use crate::prompt::ValueSet;
use crate::templates::engine::{TemplateEngine, CONTENT_TEMPLATE, PATH_TEMPLATE};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Render every file under `source_dir` (except the root `config.json`) into
/// `dest_dir`, templating both file contents and relative paths.
///
/// Files are visited depth-first in lexicographic order. The first error
/// stops the walk; files already written stay on disk. Returns the rendered
/// paths relative to `dest_dir`, in the order they were written.
pub fn render_templates(
    source_dir: &Path,
    dest_dir: &Path,
    values: &ValueSet,
) -> Result<Vec<PathBuf>> {
    let config_path = source_dir.join(CONFIG_FILE_NAME);
    let mut engine = TemplateEngine::new();
    let mut rendered = Vec::new();

    tracing::info!(
        source = %source_dir.display(),
        destination = %dest_dir.display(),
        "rendering templates"
    );

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;

        // Directories only materialize when a file is written into them
        if entry.file_type().is_dir() || entry.path() == config_path {
            continue;
        }

        let output = render_file(&mut engine, source_dir, entry.path(), dest_dir, values)?;
        rendered.push(output);
    }

    Ok(rendered)
}

/// Render one template file, returning its output path relative to `dest_dir`
fn render_file(
    engine: &mut TemplateEngine,
    source_dir: &Path,
    path: &Path,
    dest_dir: &Path,
    values: &ValueSet,
) -> Result<PathBuf> {
    let content = fs::read_to_string(path).map_err(|source| ScaffoldError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    engine
        .compile(CONTENT_TEMPLATE, &content)
        .map_err(|e| parse_error(path, TemplateFragment::Content, e))?;

    let relative = relative_template_path(source_dir, path)?;
    engine
        .compile(PATH_TEMPLATE, &relative)
        .map_err(|e| parse_error(path, TemplateFragment::Path, e))?;

    let rendered_path = engine
        .render(PATH_TEMPLATE, values)
        .map_err(|e| exec_error(path, TemplateFragment::Path, e))?;
    let output_relative = output_path(path, &rendered_path)?;

    let out_path = dest_dir.join(&output_relative);
    let out_dir = out_path.parent().unwrap_or(dest_dir);
    fs::create_dir_all(out_dir).map_err(|source| ScaffoldError::DirectoryCreate {
        path: out_dir.to_path_buf(),
        source,
    })?;

    write_rendered(engine, values, path, &out_path, out_dir)?;

    tracing::debug!(
        template = %path.display(),
        output = %out_path.display(),
        "rendered file"
    );

    Ok(output_relative)
}

/// Stream the content template into a temp file beside `out_path`, then move
/// it into place. A failed render leaves no file at `out_path`.
fn write_rendered(
    engine: &TemplateEngine,
    values: &ValueSet,
    source_path: &Path,
    out_path: &Path,
    out_dir: &Path,
) -> Result<()> {
    let create_error = |source: std::io::Error| ScaffoldError::FileCreate {
        path: out_path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(out_dir).map_err(create_error)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        engine
            .render_to_write(CONTENT_TEMPLATE, values, &mut writer)
            .map_err(|e| exec_error(source_path, TemplateFragment::Content, e))?;
        writer.flush().map_err(create_error)?;
    }

    // Keep the template's mode bits (e.g. executable scripts)
    let permissions = fs::metadata(source_path)
        .map_err(|source| ScaffoldError::TemplateRead {
            path: source_path.to_path_buf(),
            source,
        })?
        .permissions();
    temp.as_file()
        .set_permissions(permissions)
        .map_err(create_error)?;

    temp.persist(out_path).map_err(|e| create_error(e.error))?;

    Ok(())
}

/// Path of `path` relative to `source_dir`, `/`-separated on every platform
fn relative_template_path(source_dir: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(source_dir).unwrap_or(path);

    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            let segment = segment.to_str().ok_or_else(|| ScaffoldError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
            segments.push(segment);
        }
    }

    Ok(segments.join("/"))
}

/// Turn a rendered relative path into a path that stays inside the destination
fn output_path(template_path: &Path, rendered: &str) -> Result<PathBuf> {
    let unsafe_path = || ScaffoldError::UnsafeOutputPath {
        path: template_path.to_path_buf(),
        rendered: rendered.to_string(),
    };

    let mut output = PathBuf::new();
    for segment in rendered.split(|c: char| c == '/' || std::path::is_separator(c)) {
        match segment {
            "" | "." => continue,
            ".." => return Err(unsafe_path()),
            _ => output.push(segment),
        }
    }

    if output.as_os_str().is_empty() {
        return Err(unsafe_path());
    }

    Ok(output)
}

fn parse_error(
    path: &Path,
    fragment: TemplateFragment,
    e: handlebars::TemplateError,
) -> ScaffoldError {
    ScaffoldError::TemplateParse {
        path: path.to_path_buf(),
        fragment,
        source: Box::new(e),
    }
}

fn exec_error(
    path: &Path,
    fragment: TemplateFragment,
    e: handlebars::RenderError,
) -> ScaffoldError {
    ScaffoldError::TemplateExec {
        path: path.to_path_buf(),
        fragment,
        source: Box::new(e),
    }
}
