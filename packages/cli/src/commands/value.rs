use crate::config::OptionArgs;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pxunit_core::{ConversionConfig, PxToUnit, RewriteResult};
use std::path::Path;

#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Declaration values to convert, e.g. "10px 20px"
    #[arg(required = true)]
    pub values: Vec<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

pub fn value(args: ValueArgs, cwd: &Path) -> Result<()> {
    let options = args.options.resolve(cwd)?;
    let mut pipeline = PxToUnit::new(ConversionConfig::from_options(&options)?)?;

    for value in &args.values {
        for line in convert_lines(&mut pipeline, value) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// One output line per requested unit, rem first like the dual-unit order
fn convert_lines(pipeline: &mut PxToUnit, value: &str) -> Vec<String> {
    let converted = pipeline.convert_value(value);

    [converted.rem, converted.vw]
        .into_iter()
        .flatten()
        .map(|result| format_result(value, &result))
        .collect()
}

fn format_result(original: &str, result: &RewriteResult) -> String {
    if result.changed {
        format!("{} {} {}", original, "→".green(), result.value.bold())
    } else {
        format!("{} {}", original, "(unchanged)".dimmed())
    }
}
