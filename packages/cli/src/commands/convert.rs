use crate::config::OptionArgs;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pxunit_core::{ConversionConfig, ProcessReport, PxToUnit, Stylesheet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Stylesheet document (.json) or directory of documents
    pub input: PathBuf,

    /// Output directory (defaults to ./dist)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output format (css, json)
    #[arg(short, long, default_value = "css")]
    pub format: String,

    #[command(flatten)]
    pub options: OptionArgs,
}

pub fn convert(args: ConvertArgs, cwd: &Path) -> Result<()> {
    if !matches!(args.format.as_str(), "css" | "json") {
        return Err(anyhow!("Unknown format: {}", args.format));
    }

    let options = args.options.resolve(cwd)?;
    let config = ConversionConfig::from_options(&options)?;
    let target_unit = config.target_unit();

    // One pipeline for the whole run so repeated values hit the cache
    let mut pipeline = PxToUnit::new(config)?;

    let input = cwd.join(&args.input);
    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else if input.is_dir() {
        (input.clone(), find_stylesheet_files(&input))
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if !args.stdout {
        println!(
            "{} {} (target: {})",
            "📐".bright_blue(),
            "Converting px values...".bright_blue().bold(),
            target_unit
        );
    }

    if files.is_empty() {
        println!("{}", "⚠️  No stylesheet documents found".yellow());
        return Ok(());
    }

    let mut total = ProcessReport::default();
    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);
        match convert_file(file, relative_path, &args, cwd, &mut pipeline) {
            Ok((output, report)) => {
                success_count += 1;
                accumulate(&mut total, &report);
                if !args.stdout {
                    let status = if report.skipped_file {
                        "skipped".dimmed().to_string()
                    } else {
                        format!("{} changed", report.declarations_changed)
                    };
                    println!(
                        "  {} {} → {} ({})",
                        "✓".green(),
                        relative_path.display(),
                        output,
                        status
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if args.stdout {
        return finish(error_count);
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Converted {} files: {} declarations changed, {} inserted",
            "✅".green(),
            success_count,
            total.declarations_changed,
            total.declarations_inserted
        );
    } else {
        println!(
            "{} Converted {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    finish(error_count)
}

fn finish(error_count: usize) -> Result<()> {
    if error_count > 0 {
        return Err(anyhow!("{} files failed to convert", error_count));
    }
    Ok(())
}

fn accumulate(total: &mut ProcessReport, report: &ProcessReport) {
    total.rules_skipped += report.rules_skipped;
    total.declarations_skipped += report.declarations_skipped;
    total.declarations_changed += report.declarations_changed;
    total.declarations_inserted += report.declarations_inserted;
}

fn find_stylesheet_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }

    files
}

/// Read a stylesheet document, converting it with the shared pipeline
pub fn load_and_process(
    file_path: &Path,
    pipeline: &mut PxToUnit,
) -> Result<(Stylesheet, ProcessReport)> {
    let content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let mut sheet: Stylesheet = serde_json::from_str(&content)
        .with_context(|| format!("Invalid stylesheet document {}", file_path.display()))?;

    if sheet.source.is_none() {
        sheet.source = Some(file_path.display().to_string());
    }
    debug!(file = %file_path.display(), rules = sheet.rules.len(), "Loaded stylesheet document");

    let report = pipeline.process(&mut sheet);
    Ok((sheet, report))
}

fn convert_file(
    file_path: &Path,
    relative_path: &Path,
    args: &ConvertArgs,
    cwd: &Path,
    pipeline: &mut PxToUnit,
) -> Result<(String, ProcessReport)> {
    let (sheet, report) = load_and_process(file_path, pipeline)?;

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&sheet)?,
        _ => sheet.to_css(),
    };

    if args.stdout {
        println!("{}", output);
        return Ok(("stdout".to_string(), report));
    }

    let out_dir = match &args.out_dir {
        Some(out) => cwd.join(out),
        None => cwd.join("dist"),
    };
    let extension = if args.format == "json" { "json" } else { "css" };
    let output_file = out_dir.join(relative_path).with_extension(extension);

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok((output_file.display().to_string(), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxunit_core::{Options, StyleSheetHost, TargetUnit};

    const DOCUMENT: &str = r#"{
        "rules": [
            { "selector": ".a", "declarations": [
                { "property": "width", "value": "100px" },
                { "property": "border", "value": "1px solid red" }
            ] }
        ]
    }"#;

    fn pipeline(options: Options) -> PxToUnit {
        PxToUnit::new(ConversionConfig::from_options(&options).unwrap()).unwrap()
    }

    #[test]
    fn test_load_and_process_defaults_source_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.json");
        fs::write(&file, DOCUMENT).unwrap();

        let (sheet, report) = load_and_process(&file, &mut pipeline(Options::default())).unwrap();
        assert_eq!(sheet.source.as_deref(), Some(file.display().to_string().as_str()));
        assert_eq!(sheet.declaration(0, 0), ("width", "26.66667vw"));
        assert_eq!(sheet.declaration(0, 1), ("border", "1px solid red"));
        assert_eq!(report.declarations_changed, 1);
    }

    #[test]
    fn test_file_rules_see_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("vendor.json");
        fs::write(&file, DOCUMENT).unwrap();

        let options = Options {
            exclude_files: vec!["vendor".into()],
            ..Default::default()
        };
        let (sheet, report) = load_and_process(&file, &mut pipeline(options)).unwrap();
        assert!(report.skipped_file);
        assert_eq!(sheet.declaration(0, 0), ("width", "100px"));
    }

    #[test]
    fn test_convert_directory_writes_css() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("styles/nested")).unwrap();
        fs::write(dir.path().join("styles/a.json"), DOCUMENT).unwrap();
        fs::write(dir.path().join("styles/nested/b.json"), DOCUMENT).unwrap();

        let args = ConvertArgs {
            input: PathBuf::from("styles"),
            out_dir: Some(PathBuf::from("out")),
            stdout: false,
            format: "css".to_string(),
            options: OptionArgs {
                target_unit: Some(TargetUnit::Rem),
                ..Default::default()
            },
        };
        convert(args, dir.path()).unwrap();

        let css = fs::read_to_string(dir.path().join("out/nested/b.css")).unwrap();
        assert_eq!(css, ".a {\n  width: 2.66667rem;\n  border: 1px solid red;\n}\n\n");
        assert!(dir.path().join("out/a.css").exists());
    }

    #[test]
    fn test_invalid_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "[1, 2]").unwrap();

        let args = ConvertArgs {
            input: PathBuf::from("bad.json"),
            out_dir: None,
            stdout: true,
            format: "css".to_string(),
            options: OptionArgs::default(),
        };
        assert!(convert(args, dir.path()).is_err());
    }
}
