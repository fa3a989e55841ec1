use anyhow::{Context, Result};
use clap::Args;
use pxunit_core::{Options, TargetUnit};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pxunit.config.json";

/// Load options from `explicit`, or from the default config file in `cwd`.
///
/// A missing default file yields the default options; a missing explicit
/// file is an error.
pub fn load_options(cwd: &Path, explicit: Option<&Path>) -> Result<Options> {
    let (config_path, required) = match explicit {
        Some(path) => (cwd.join(path), true),
        None => (cwd.join(DEFAULT_CONFIG_NAME), false),
    };

    if !config_path.exists() {
        if required {
            anyhow::bail!("Config file does not exist: {}", config_path.display());
        }
        return Ok(Options::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let options: Options = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    Ok(options)
}

/// Command-line overrides shared by the conversion commands
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Config file (defaults to ./pxunit.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target unit (vw, rem, vw&rem)
    #[arg(short, long)]
    pub target_unit: Option<TargetUnit>,

    /// Design viewport width in pixels
    #[arg(long)]
    pub viewport_width: Option<f64>,

    /// Root font size in pixels
    #[arg(long)]
    pub html_font_size: Option<f64>,

    /// Decimal places in converted values
    #[arg(long)]
    pub unit_precision: Option<i64>,

    /// Lengths at or below this many pixels are kept
    #[arg(long)]
    pub ignore_threshold: Option<f64>,

    /// Log every skipped and converted value
    #[arg(long)]
    pub debug: bool,
}

impl OptionArgs {
    pub fn resolve(&self, cwd: &Path) -> Result<Options> {
        let mut options = load_options(cwd, self.config.as_deref())?;
        self.apply(&mut options);
        Ok(options)
    }

    pub fn apply(&self, options: &mut Options) {
        if let Some(target_unit) = self.target_unit {
            options.target_unit = target_unit;
        }
        if let Some(viewport_width) = self.viewport_width {
            options.viewport_width = viewport_width;
        }
        if let Some(html_font_size) = self.html_font_size {
            options.html_font_size = html_font_size;
        }
        if let Some(unit_precision) = self.unit_precision {
            options.unit_precision = unit_precision;
        }
        if let Some(ignore_threshold) = self.ignore_threshold {
            options.ignore_threshold = ignore_threshold;
        }
        options.debug |= self.debug;
    }
}
