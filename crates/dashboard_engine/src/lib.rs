//! Pipeline for the quarterly finance dashboard: load the monthly figures
//! CSV, extract the semantic rows, aggregate quarters, render the HTML
//! template, and optionally export the computed data as JSON.

pub mod quarters;
pub mod render;
pub mod statement;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use thiserror::Error;

use models::{DashboardExport, DashboardMetadata, FinancialSummary, Quarter};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no input CSV found (tried {tried})")]
    InputNotFound { tried: String },
    #[error("template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
}

pub struct Config {
    /// Candidate input files, tried in order; the first existing one wins.
    pub input_candidates: Vec<PathBuf>,
    pub template_file: PathBuf,
    pub output_file: PathBuf,
    /// Optional machine-readable export of the computed dashboard.
    pub json_file: Option<PathBuf>,
    /// Report year shown in quarter names and card labels.
    pub year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_candidates: vec![
                PathBuf::from("zahlen_aktuell.csv"),
                // tolerate the double-dot artifact of a misnamed export
                PathBuf::from("zahlen_aktuell..csv"),
            ],
            template_file: PathBuf::from("dashboard-template.html"),
            output_file: PathBuf::from("index.html"),
            json_file: None,
            year: 2025,
        }
    }
}

/// What a completed run produced, for the caller to report.
pub struct RunReport {
    pub input_file: PathBuf,
    pub summary: FinancialSummary,
    pub quarters: Vec<Quarter>,
    pub warnings: Vec<String>,
}

/// Runs the whole pipeline. Missing input or template and write failures are
/// fatal; everything recoverable lands in `RunReport::warnings`.
pub fn run(cfg: &Config) -> Result<RunReport> {
    let input_file = statement::find_input_file(&cfg.input_candidates).ok_or_else(|| {
        PipelineError::InputNotFound {
            tried: cfg
                .input_candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    })?;

    let rows = statement::load_rows(&input_file)?;
    let figures = statement::extract_figures(&rows);
    let summary = figures.summary();
    let quarters = quarters::build_quarters(&figures, cfg.year);

    if !cfg.template_file.is_file() {
        return Err(PipelineError::TemplateNotFound(cfg.template_file.clone()).into());
    }
    let template = fs::read_to_string(&cfg.template_file)
        .with_context(|| format!("Reading template {}", cfg.template_file.display()))?;

    let html = render::render_dashboard(&template, &summary, &quarters, cfg.year);
    write_output(&cfg.output_file, &html)?;

    if let Some(json_file) = &cfg.json_file {
        let export = DashboardExport {
            metadata: DashboardMetadata {
                generated_at: Local::now().to_rfc3339(),
                year: cfg.year,
            },
            summary,
            quarters: quarters.clone(),
        };
        let json = serde_json::to_string_pretty(&export)?;
        write_output(json_file, &json)?;
    }

    Ok(RunReport {
        input_file,
        summary,
        quarters,
        warnings: figures.warnings,
    })
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating output dir: {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}
