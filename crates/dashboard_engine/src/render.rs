use models::{FinancialSummary, Quarter};

pub const TOKEN_TOTAL_INCOME: &str = "{{GESAMT_EINNAHMEN}}";
pub const TOKEN_TOTAL_EXPENSES: &str = "{{GESAMT_AUSGABEN}}";
pub const TOKEN_RESULT: &str = "{{AKTUELLES_ERGEBNIS}}";
pub const TOKEN_RESULT_CLASS: &str = "{{RESULT_CLASS}}";
pub const TOKEN_QUARTERS: &str = "{{QUARTERS}}";

/// Rounds to whole euros and groups thousands German-style. An exact zero
/// stays a bare digit, matching the original dashboard.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded == 0 {
        return "0".to_string();
    }
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Substitutes the scalar tokens (each exactly once) and expands the
/// quarters token into one card fragment per quarter, preserving order.
pub fn render_dashboard(
    template: &str,
    summary: &FinancialSummary,
    quarters: &[Quarter],
    year: i32,
) -> String {
    let result = summary.result();
    let result_class = if result >= 0.0 {
        "result-positive"
    } else {
        "result-negative"
    };

    let quarter_cards: String = quarters.iter().map(|q| quarter_card(q, year)).collect();

    template
        .replacen(TOKEN_TOTAL_INCOME, &format_amount(summary.total_income), 1)
        .replacen(
            TOKEN_TOTAL_EXPENSES,
            &format_amount(summary.total_expenses),
            1,
        )
        .replacen(TOKEN_RESULT, &format_amount(result), 1)
        .replacen(TOKEN_RESULT_CLASS, result_class, 1)
        .replacen(TOKEN_QUARTERS, &quarter_cards, 1)
}

/// One flip card per quarter, with a reduced shape for quarters outside the
/// input window.
fn quarter_card(quarter: &Quarter, year: i32) -> String {
    if !quarter.has_data {
        return format!(
            r#"
                <div class="quarter-card" onclick="flipCard(this)">
                    <div class="card-inner">
                        <div class="card-front">
                            <div class="quarter-name">{name}</div>
                            <div class="quarter-period">{period}</div>
                            <div class="quarter-status">Keine Daten</div>
                            <div class="flip-hint">Klicken für Details</div>
                        </div>
                        <div class="card-back">
                            <div class="card-details">
                                <div class="detail-row"><span class="detail-label">Einnahmen:</span> <span class="detail-value">Keine Daten</span></div>
                                <div class="detail-row"><span class="detail-label">Ausgaben:</span> <span class="detail-value">Keine Daten</span></div>
                                <div class="detail-row"><span class="detail-label">Quartalsergebnis:</span> <span class="detail-value">Keine Daten</span></div>
                                <div class="detail-row"><span class="detail-label">Kontostand {year}:</span> <span class="detail-value">Keine Daten</span></div>
                            </div>
                        </div>
                    </div>
                </div>"#,
            name = quarter.name,
            period = quarter.period,
        );
    }

    let status_class = if quarter.cumulative >= 0.0 {
        "status-positive"
    } else {
        "status-negative"
    };
    let result_class = if quarter.result >= 0.0 {
        "detail-positive"
    } else {
        "detail-negative"
    };

    format!(
        r#"
                <div class="quarter-card" onclick="flipCard(this)">
                    <div class="card-inner">
                        <div class="card-front">
                            <div class="quarter-name">{name}</div>
                            <div class="quarter-period">{period}</div>
                            <div class="quarter-status {status_class}">Kumuliert: {cumulative}€</div>
                            <div class="flip-hint">Klicken für Details</div>
                        </div>
                        <div class="card-back">
                            <div class="card-details">
                                <div class="detail-row"><span class="detail-label">Einnahmen:</span> <span class="detail-value detail-positive">{income}€</span></div>
                                <div class="detail-row"><span class="detail-label">Ausgaben:</span> <span class="detail-value detail-negative">{expenses}€</span></div>
                                <div class="detail-row"><span class="detail-label">Quartalsergebnis:</span> <span class="detail-value {result_class}">{result}€</span></div>
                                <div class="detail-row"><span class="detail-label">Kontostand {year}:</span> <span class="detail-value">{balance}€</span></div>
                            </div>
                        </div>
                    </div>
                </div>"#,
        name = quarter.name,
        period = quarter.period,
        cumulative = format_amount(quarter.cumulative),
        income = format_amount(quarter.income),
        expenses = format_amount(quarter.expenses),
        result = format_amount(quarter.result),
        balance = format_amount(quarter.balance),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quarters::build_quarters;
    use crate::statement::parse_german_number;
    use models::MonthlyFigures;

    const TEMPLATE: &str = "<p>{{GESAMT_EINNAHMEN}}|{{GESAMT_AUSGABEN}}|\
         <span class=\"{{RESULT_CLASS}}\">{{AKTUELLES_ERGEBNIS}}</span></p>\
         <div>{{QUARTERS}}</div>";

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234.0), "1.234");
        assert_eq!(format_amount(1000000.0), "1.000.000");
        assert_eq!(format_amount(-1500.0), "-1.500");
        assert_eq!(format_amount(3000.4), "3.000");
        assert_eq!(format_amount(0.4), "0");
    }

    #[test]
    fn test_format_amount_roundtrips_through_parser() {
        for value in [0.0, 999.0, 1234.0, 50000.0, -1500.0] {
            let formatted = format_amount(value);
            assert_eq!(parse_german_number(Some(&formatted)), value);
        }
    }

    #[test]
    fn test_render_replaces_every_token() {
        let figures = MonthlyFigures {
            income: [1000.0; 6],
            expenses: [500.0; 6],
            cumulative: [500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0],
            balance: [50000.0; 6],
            warnings: Vec::new(),
        };
        let quarters = build_quarters(&figures, 2025);
        let html = render_dashboard(TEMPLATE, &figures.summary(), &quarters, 2025);

        assert!(!html.contains("{{"), "unreplaced token in {}", html);
        assert!(html.contains("6.000|3.000"));
    }

    #[test]
    fn test_render_emits_four_cards_in_order() {
        let figures = MonthlyFigures {
            income: [1000.0; 6],
            expenses: [500.0; 6],
            cumulative: [500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0],
            balance: [50000.0; 6],
            warnings: Vec::new(),
        };
        let quarters = build_quarters(&figures, 2025);
        let html = render_dashboard(TEMPLATE, &figures.summary(), &quarters, 2025);

        assert_eq!(html.matches("quarter-card").count(), 4);
        let q1 = html.find("Q1 2025").unwrap();
        let q2 = html.find("Q2 2025").unwrap();
        let q3 = html.find("Q3 2025").unwrap();
        let q4 = html.find("Q4 2025").unwrap();
        assert!(q1 < q2 && q2 < q3 && q3 < q4);
        assert_eq!(html.matches("Keine Daten").count(), 10); // 2 empty cards
    }

    #[test]
    fn test_render_positive_result_end_to_end() {
        let figures = MonthlyFigures {
            income: [1000.0; 6],
            expenses: [500.0; 6],
            cumulative: [500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0],
            balance: [50000.0; 6],
            warnings: Vec::new(),
        };
        let summary = figures.summary();
        assert_eq!(summary.total_income, 6000.0);
        assert_eq!(summary.total_expenses, 3000.0);

        let quarters = build_quarters(&figures, 2025);
        let html = render_dashboard(TEMPLATE, &summary, &quarters, 2025);
        assert!(html.contains("<span class=\"result-positive\">3.000</span>"));
    }

    #[test]
    fn test_render_negative_result_class() {
        let figures = MonthlyFigures {
            income: [100.0; 6],
            expenses: [500.0; 6],
            ..Default::default()
        };
        let quarters = build_quarters(&figures, 2025);
        let html = render_dashboard(TEMPLATE, &figures.summary(), &quarters, 2025);
        assert!(html.contains("result-negative"));
        assert!(html.contains("-2.400"));
    }
}
