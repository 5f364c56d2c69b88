use std::ops::Range;

use models::{MonthlyFigures, Quarter};

/// Builds the four quarter records of the report, in order. Q1/Q2 are
/// computed from the six-month input window; Q3/Q4 lie outside it and are
/// fixed "no data" placeholders.
pub fn build_quarters(figures: &MonthlyFigures, year: i32) -> Vec<Quarter> {
    vec![
        data_quarter("Q1", "Januar - März", 0..3, figures, year),
        data_quarter("Q2", "April - Juni", 3..6, figures, year),
        empty_quarter("Q3", "Juli - September", year),
        empty_quarter("Q4", "Oktober - Dezember", year),
    ]
}

/// Sums a quarter's months and reads cumulative/balance at the quarter's
/// closing month (the last index of the range).
fn data_quarter(
    label: &str,
    period: &str,
    months: Range<usize>,
    figures: &MonthlyFigures,
    year: i32,
) -> Quarter {
    let close = months.end - 1;
    let income: f64 = figures.income[months.clone()].iter().sum();
    let expenses: f64 = figures.expenses[months].iter().sum();
    Quarter {
        name: format!("{} {}", label, year),
        period: period.to_string(),
        income,
        expenses,
        result: income - expenses,
        cumulative: figures.cumulative[close],
        balance: figures.balance[close],
        has_data: income != 0.0 || expenses != 0.0,
    }
}

fn empty_quarter(label: &str, period: &str, year: i32) -> Quarter {
    Quarter {
        name: format!("{} {}", label, year),
        period: period.to_string(),
        income: 0.0,
        expenses: 0.0,
        result: 0.0,
        cumulative: 0.0,
        balance: 0.0,
        has_data: false,
    }
}
