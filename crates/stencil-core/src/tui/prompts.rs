//! Charm-style CLI prompts using cliclack

use crate::config::{Configuration, CONFIG_FILE_NAME};
use crate::error::ScaffoldError;
use crate::prompt::{self, AcceptDefaults, Prompter, ValueSet};
use crate::templates::render_templates;
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for a single render run
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Template directory containing `config.json`
    pub template_dir: PathBuf,

    /// Directory the rendered files are written into
    pub destination: PathBuf,

    /// Accept every default without prompting (non-interactive mode)
    pub yes: bool,
}

/// Asks for each key with an editable, pre-filled default
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn prompt(&mut self, key: &str, default: &str) -> io::Result<String> {
        cliclack::input(key)
            .default_input(default)
            .required(false)
            .interact()
    }
}

/// Run the CLI with interactive prompts
pub fn run(args: RunArgs) -> Result<()> {
    cliclack::intro("stencil")?;

    // Step 1: Load template defaults
    let config = load_config(&args.template_dir)?;

    // Step 2: Collect final values
    let values = collect_values(&config, args.yes)?;

    // Step 3: Render into the destination
    check_destination(&args.destination)?;
    render_project(&args.template_dir, &args.destination, &values)?;

    cliclack::outro("Done!")?;

    Ok(())
}

fn load_config(template_dir: &Path) -> Result<Configuration> {
    let path = template_dir.join(CONFIG_FILE_NAME);

    match Configuration::load(&path) {
        Ok(config) => {
            cliclack::log::info(format!(
                "Loaded {} keys from {}",
                config.len(),
                path.display()
            ))?;
            Ok(config)
        }
        Err(e) => {
            cliclack::log::error("unable to read config.json from template directory")?;
            Err(e.into())
        }
    }
}

fn collect_values(config: &Configuration, yes: bool) -> Result<ValueSet> {
    if config.is_empty() {
        cliclack::log::info("Template has no values to configure")?;
    }

    let result = if yes {
        cliclack::log::info("Using defaults (--yes mode)")?;
        prompt::collect(config, &mut AcceptDefaults)
    } else {
        prompt::collect(config, &mut ClackPrompter)
    };

    match result {
        Ok(values) => Ok(values),
        Err(e @ ScaffoldError::PromptAborted { .. }) => {
            cliclack::outro_cancel("Setup cancelled.")?;
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Warn when rendered files may overwrite existing ones
fn check_destination(destination: &Path) -> Result<()> {
    if !destination.is_dir() {
        return Ok(());
    }

    if let Ok(entries) = std::fs::read_dir(destination) {
        let count = entries.count();
        if count > 0 {
            cliclack::log::warning(format!(
                "{} has {} existing items; files with the same path will be overwritten",
                destination.display(),
                count
            ))?;
        }
    }

    Ok(())
}

fn render_project(template_dir: &Path, destination: &Path, values: &ValueSet) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Rendering templates...");

    match render_templates(template_dir, destination, values) {
        Ok(written) => {
            spinner.stop(format!(
                "Rendered {} files into {}",
                written.len(),
                destination.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Rendering failed");
            Err(e.into())
        }
    }
}
