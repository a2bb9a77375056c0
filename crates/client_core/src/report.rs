//! CSV rendering of the monthly financial series.

use shared::protocol::FinancialPeriod;

/// Renders the monthly financial series as CSV with the upstream column
/// names. An empty series renders as an empty string so callers can skip
/// the export affordance entirely. Writing the bytes anywhere is the
/// caller's concern.
pub fn financial_report_csv(rows: &[FinancialPeriod]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let body = rows
        .iter()
        .map(|row| format!("{},{},{},{}", row.month, row.sales, row.costs, row.profit))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Mes,Ventas,Costos,Ganancia\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_one_row_per_period() {
        let rows = vec![
            FinancialPeriod {
                month: "2020-01".into(),
                sales: 100.0,
                costs: 40.0,
                profit: 60.0,
            },
            FinancialPeriod {
                month: "2020-02".into(),
                sales: 80.5,
                costs: 30.0,
                profit: 50.5,
            },
        ];

        let csv = financial_report_csv(&rows);
        assert_eq!(
            csv,
            "Mes,Ventas,Costos,Ganancia\n2020-01,100,40,60\n2020-02,80.5,30,50.5"
        );
    }

    #[test]
    fn empty_series_renders_nothing() {
        assert_eq!(financial_report_csv(&[]), "");
    }
}
