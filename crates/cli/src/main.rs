use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use dashboard_engine::render::format_amount;
use dashboard_engine::Config;

#[derive(Parser, Debug)]
#[command(
    name = "update-dashboard",
    about = "Aggregate the monthly figures CSV into the quarterly HTML dashboard."
)]
struct Args {
    /// Input CSV; by default zahlen_aktuell.csv is tried, then zahlen_aktuell..csv
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// HTML template containing the dashboard placeholders
    #[arg(short, long, default_value = "dashboard-template.html")]
    template: PathBuf,

    /// Rendered dashboard output
    #[arg(short, long, default_value = "index.html")]
    out: PathBuf,

    /// Optional JSON export of the computed dashboard data
    #[arg(long)]
    json: Option<PathBuf>,

    /// Report year shown in quarter names
    #[arg(long, default_value_t = 2025)]
    year: i32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = Config::default();
    if let Some(input) = args.input {
        cfg.input_candidates = vec![input];
    }
    cfg.template_file = args.template;
    cfg.output_file = args.out;
    cfg.json_file = args.json;
    cfg.year = args.year;

    let report = dashboard_engine::run(&cfg)?;

    for warning in &report.warnings {
        println!("[WARN] {}: {}", report.input_file.display(), warning);
    }

    println!("Input     : {}", report.input_file.display());
    println!("Einnahmen : {} €", format_amount(report.summary.total_income));
    println!("Ausgaben  : {} €", format_amount(report.summary.total_expenses));
    println!("Ergebnis  : {} €", format_amount(report.summary.result()));
    for quarter in report.quarters.iter().filter(|q| q.has_data) {
        println!("{:<10}: {} €", quarter.name, format_amount(quarter.result));
    }
    println!("Dashboard written to {}", cfg.output_file.display());
    if let Some(json_file) = &cfg.json_file {
        println!("Export written to {}", json_file.display());
    }
    Ok(())
}
