use crate::config::DEFAULT_CONFIG_NAME;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pxunit_core::{Options, TargetUnit};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Target unit (vw, rem, vw&rem)
    #[arg(short, long, default_value = "vw")]
    pub target_unit: TargetUnit,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let options = Options::with_target_unit(args.target_unit);
    let config_json = serde_json::to_string_pretty(&options)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Adjust viewportWidth / htmlFontSize to your design");
    println!("  2. Run: pxunit convert <stylesheet.json>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_options;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                target_unit: TargetUnit::Rem,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let options = load_options(dir.path(), None).unwrap();
        assert_eq!(options, Options::with_target_unit(TargetUnit::Rem));
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{ "viewportWidth": 750 }"#).unwrap();

        init(
            InitArgs {
                target_unit: TargetUnit::Vw,
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "viewportWidth": 750 }"#);

        init(
            InitArgs {
                target_unit: TargetUnit::Vw,
                force: true,
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(load_options(dir.path(), None).unwrap(), Options::default());
    }
}
