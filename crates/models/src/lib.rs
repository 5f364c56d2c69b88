use serde::Serialize;

/// The input sheet covers the first half of the year, one column per month.
pub const MONTHS_PER_INPUT: usize = 6;

/// One value per month, index = month 0-5. Missing input defaults to 0.
pub type MonthlySeries = [f64; MONTHS_PER_INPUT];

/// The four semantic rows of the input sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Income,
    Expenses,
    Cumulative,
    Balance,
}

impl Field {
    /// German row label searched for in column 0 (case-insensitive substring).
    pub fn label(&self) -> &'static str {
        match self {
            Field::Income => "einnahmen",
            Field::Expenses => "ausgaben",
            Field::Cumulative => "kumuliert",
            Field::Balance => "kontostand",
        }
    }
}

/// Everything extracted from one input sheet, plus the warnings collected
/// while recovering from missing rows or unparsable cells.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthlyFigures {
    pub income: MonthlySeries,
    pub expenses: MonthlySeries,
    pub cumulative: MonthlySeries,
    pub balance: MonthlySeries,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl MonthlyFigures {
    pub fn summary(&self) -> FinancialSummary {
        FinancialSummary {
            total_income: self.income.iter().sum(),
            total_expenses: self.expenses.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
}

impl FinancialSummary {
    /// Net result over the whole input window.
    pub fn result(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

/// One fiscal quarter of the report. Quarters outside the input window
/// carry `has_data: false` and zeroed amounts.
#[derive(Debug, Clone, Serialize)]
pub struct Quarter {
    pub name: String,
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub result: f64,
    pub cumulative: f64,
    pub balance: f64,
    pub has_data: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetadata {
    pub generated_at: String,
    pub year: i32,
}

/// Machine-readable form of the rendered dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardExport {
    pub metadata: DashboardMetadata,
    pub summary: FinancialSummary,
    pub quarters: Vec<Quarter>,
}
