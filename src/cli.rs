use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::deck::SlideRecord;
use crate::generator::base::RenderBackend;
use crate::generator::builder::{BuildWarning, DeckBuilder, DeckBuilderOptions};
use crate::generator::html_preview::{HtmlPreviewBackend, HtmlPreviewOptions};
use crate::generator::manifest::ManifestBackend;
use crate::generator::BackendType;
use crate::parser::MarkupParser;
use crate::validate::{validate_deck, ValidationIssue};

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub input: PathBuf,
    pub slide_count: usize,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<BuildWarning>,
    /// Where the deck was written; `None` for a validate-only run.
    pub output: Option<PathBuf>,
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expands input arguments. Plain paths are kept as given; glob patterns are
/// expanded in sorted order and must match at least one file.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        if !has_glob_meta(pattern) {
            inputs.push(PathBuf::from(pattern));
            continue;
        }
        let mut matched: Vec<PathBuf> = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            .collect::<std::result::Result<_, _>>()?;
        if matched.is_empty() {
            bail!("No input file matches {}", pattern);
        }
        matched.sort();
        inputs.extend(matched);
    }
    Ok(inputs)
}

/// Default output path: the input name with a `_slides` suffix, unless the
/// name already ends with it, placed next to the input.
///
/// `unit3.txt` becomes `unit3_slides.html`; `unit3_slides.txt` becomes
/// `unit3_slides.html`.
pub fn default_output_path(input: &Path, backend: BackendType) -> PathBuf {
    let base = match input.extension().and_then(|e| e.to_str()) {
        Some("txt") => input.file_stem(),
        _ => input.file_name(),
    }
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| "lesson".to_string());

    let name = if base.to_lowercase().ends_with("_slides") {
        format!("{}.{}", base, backend.extension())
    } else {
        format!("{}_slides.{}", base, backend.extension())
    };
    input.with_file_name(name)
}

/// Directory relative image paths of `input` are resolved against.
fn base_dir_of(input: &Path) -> Option<PathBuf> {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn read_slides(input: &Path) -> Result<Vec<SlideRecord>> {
    log::info!("Reading: {}", input.display());
    let slides = MarkupParser::default().parse_file(input)?;
    log::info!("Found {} slides", slides.len());
    Ok(slides)
}

fn report_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        log::info!("All slides valid");
    } else {
        for issue in issues {
            log::warn!("{}", issue);
        }
    }
}

/// Parses and validates `input` without building anything.
pub fn run_validate(input: &Path) -> Result<RunSummary> {
    let slides = read_slides(input)?;
    let issues = validate_deck(&slides, base_dir_of(input).as_deref());
    report_issues(&issues);

    Ok(RunSummary {
        input: input.to_path_buf(),
        slide_count: slides.len(),
        issues,
        warnings: Vec::new(),
        output: None,
    })
}

fn build_with<B: RenderBackend>(
    builder: &DeckBuilder,
    slides: &[SlideRecord],
    mut backend: B,
    output: &Path,
) -> Result<Vec<BuildWarning>> {
    let report = builder.build_to_file(slides, &mut backend, output)?;
    Ok(report.warnings)
}

/// Parses, validates and builds `input`, writing the deck to `output`.
///
/// Validation issues and build warnings are collected, never fatal. An
/// unreadable input or unwritable output aborts the run.
pub fn run_build(
    input: &Path,
    output: &Path,
    config: &Configuration,
    backend_type: BackendType,
) -> Result<RunSummary> {
    let slides = read_slides(input)?;
    let base_dir = base_dir_of(input);
    let issues = validate_deck(&slides, base_dir.as_deref());
    report_issues(&issues);

    log::info!("Generating {:?} output", backend_type);
    let builder = DeckBuilder::new(config, DeckBuilderOptions { base_dir });
    let warnings = match backend_type {
        BackendType::Html => {
            let title = slides
                .first()
                .map(|s| s.title.clone())
                .unwrap_or_else(|| HtmlPreviewOptions::default().title);
            let backend = HtmlPreviewBackend::new(HtmlPreviewOptions {
                slide_width: config.slide_width,
                slide_height: config.slide_height,
                title,
            });
            build_with(&builder, &slides, backend, output)?
        }
        BackendType::Json => build_with(&builder, &slides, ManifestBackend::new(), output)?,
    };

    Ok(RunSummary {
        input: input.to_path_buf(),
        slide_count: slides.len(),
        issues,
        warnings,
        output: Some(output.to_path_buf()),
    })
}
