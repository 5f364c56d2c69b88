use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use models::{Field, MonthlyFigures, MonthlySeries, MONTHS_PER_INPUT};

/// Cells carrying this marker instead of a number mean the month has no data.
const NO_DATA_MARKER: &str = "keine daten";

/// Returns the first candidate input file that exists on disk.
pub fn find_input_file(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

/// Parses semicolon-delimited CSV text into rows of string cells. Rows may
/// have differing lengths; quoted fields are unescaped by the reader and
/// empty lines are skipped.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.context("Reading CSV record")?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

/// Loads and parses the input sheet.
pub fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = fs::File::open(path).with_context(|| format!("Opening {}", path.display()))?;
    read_rows(file).with_context(|| format!("Parsing CSV in {}", path.display()))
}

/// Cleans one German-formatted cell: thousands dots dropped, the first comma
/// becomes the decimal point, currency sign and whitespace stripped.
/// Placeholder cells ("", "Keine Daten", "-   €") normalize to Some(0.0);
/// None means the cleaned text was not a number at all.
fn normalize_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().contains(NO_DATA_MARKER) {
        return Some(0.0);
    }

    let cleaned: String = trimmed
        .replace('.', "")
        .replacen(',', ".", 1)
        .replace('€', "")
        .split_whitespace()
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok()
}

/// German-number parsing with the silent-fallback contract: absent cells and
/// anything that cannot be read as a number count as 0.
pub fn parse_german_number(cell: Option<&str>) -> f64 {
    cell.and_then(normalize_cell).unwrap_or(0.0)
}

/// First row whose column 0 contains `label`, case-insensitive.
fn find_row<'a>(rows: &'a [Vec<String>], label: &str) -> Option<&'a [String]> {
    rows.iter()
        .find(|row| {
            row.first()
                .is_some_and(|cell| cell.to_lowercase().contains(label))
        })
        .map(|row| row.as_slice())
}

/// Reads columns 1-6 of a labelled row. Short rows pad with 0; cells that
/// fail to parse count as 0 and are reported.
fn series_from_row(row: &[String], warnings: &mut Vec<String>) -> MonthlySeries {
    let mut series = [0.0; MONTHS_PER_INPUT];
    for (month, value) in series.iter_mut().enumerate() {
        let Some(cell) = row.get(month + 1) else {
            break; // row ends early, remaining months stay 0
        };
        match normalize_cell(cell) {
            Some(v) => *value = v,
            None => warnings.push(format!(
                "{}: unparsable value '{}' for month {}, using 0",
                row[0].trim(),
                cell.trim(),
                month + 1
            )),
        }
    }
    series
}

/// Locates the four semantic rows and turns them into monthly series.
///
/// Per field the strategies run in a fixed order: the first row whose
/// column 0 contains the field's label wins; otherwise the field-specific
/// fallback fills the series (zeroes for income/expenses, the derived
/// running net for the cumulative row, the synthetic placeholder sequence
/// for the balance row). Every fallback is reported in the warning list.
pub fn extract_figures(rows: &[Vec<String>]) -> MonthlyFigures {
    let mut warnings = Vec::new();

    let income = match find_row(rows, Field::Income.label()) {
        Some(row) => series_from_row(row, &mut warnings),
        None => {
            warnings.push("Einnahmen row not found, income series zeroed".to_string());
            [0.0; MONTHS_PER_INPUT]
        }
    };

    let expenses = match find_row(rows, Field::Expenses.label()) {
        Some(row) => series_from_row(row, &mut warnings),
        None => {
            warnings.push("Ausgaben row not found, expense series zeroed".to_string());
            [0.0; MONTHS_PER_INPUT]
        }
    };

    let cumulative = match find_row(rows, Field::Cumulative.label()) {
        Some(row) => series_from_row(row, &mut warnings),
        None => {
            warnings.push(
                "Kumuliert row not found, derived as running net of income - expenses".to_string(),
            );
            derive_cumulative(&income, &expenses)
        }
    };

    let balance = match find_row(rows, Field::Balance.label()) {
        Some(row) => series_from_row(row, &mut warnings),
        None => {
            warnings.push(
                "Kontostand row not found, substituting placeholder balances".to_string(),
            );
            synthetic_balance()
        }
    };

    MonthlyFigures {
        income,
        expenses,
        cumulative,
        balance,
        warnings,
    }
}

/// Running prefix sum of the monthly net result.
fn derive_cumulative(income: &MonthlySeries, expenses: &MonthlySeries) -> MonthlySeries {
    let mut series = [0.0; MONTHS_PER_INPUT];
    let mut running = 0.0;
    for month in 0..MONTHS_PER_INPUT {
        running += income[month] - expenses[month];
        series[month] = running;
    }
    series
}

/// Stand-in balances for sheets without a Kontostand row. Not a computed
/// financial fact; every use is reported upstream.
fn synthetic_balance() -> MonthlySeries {
    let mut series = [0.0; MONTHS_PER_INPUT];
    for (month, value) in series.iter_mut().enumerate() {
        *value = 50_000.0 - (month as f64) * 1_000.0;
    }
    series
}
