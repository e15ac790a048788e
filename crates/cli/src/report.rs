//! Review rendering for reconciled uploads.

use stocktake_reconcile::{RowError, StockAdjustment};

/// Row errors shown in full before the list is elided. The total count is
/// always reported.
const MAX_SHOWN_ROW_ERRORS: usize = 5;

/// Render the reviewer-facing summary of one reconciled upload.
pub fn render(adjustments: &[StockAdjustment], row_errors: &[RowError]) -> String {
    let mut out = String::new();

    if !row_errors.is_empty() {
        out.push_str(&format!("Skipped {} row(s):\n", row_errors.len()));
        for error in row_errors.iter().take(MAX_SHOWN_ROW_ERRORS) {
            out.push_str(&format!("  {error}\n"));
        }
        if row_errors.len() > MAX_SHOWN_ROW_ERRORS {
            out.push_str(&format!(
                "  ... and {} more\n",
                row_errors.len() - MAX_SHOWN_ROW_ERRORS
            ));
        }
        out.push('\n');
    }

    if adjustments.is_empty() {
        out.push_str("No updates to apply.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<10} {:<28} {:>12} {:>12} {:>12}\n",
        "ID", "Item", "Current", "New", "Delta"
    ));
    for adjustment in adjustments {
        let marker = match &adjustment.warning {
            Some(warning) => format!("  ! {warning}"),
            None => String::new(),
        };
        out.push_str(&format!(
            "{:<10} {:<28} {:>12} {:>12} {:>+12}{marker}\n",
            adjustment.code.as_str(),
            adjustment.name,
            adjustment.current,
            adjustment.requested,
            adjustment.delta,
        ));
    }

    let warnings = adjustments
        .iter()
        .filter(|adjustment| adjustment.warning.is_some())
        .count();
    out.push_str(&format!(
        "\n{} update(s), {} with warnings.\n",
        adjustments.len(),
        warnings
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktake_core::{ItemCode, Quantity};
    use stocktake_reconcile::StockWarning;

    fn adjustment(
        code: &str,
        current: f64,
        requested: f64,
        warning: Option<StockWarning>,
    ) -> StockAdjustment {
        StockAdjustment {
            code: ItemCode::new(code).unwrap(),
            name: format!("Item {code}"),
            unit: "kg".to_string(),
            current: Quantity::new(current).unwrap(),
            requested: Quantity::new(requested).unwrap(),
            delta: requested - current,
            warning,
        }
    }

    #[test]
    fn caps_shown_row_errors_and_reports_the_total() {
        let row_errors: Vec<RowError> = (2..=9)
            .map(|row| RowError::invalid_quantity(row, "x"))
            .collect();

        let rendered = render(&[], &row_errors);

        assert!(rendered.contains("Skipped 8 row(s):"));
        assert!(rendered.contains("Row 6:"));
        assert!(!rendered.contains("Row 7:"));
        assert!(rendered.contains("... and 3 more"));
    }

    #[test]
    fn short_error_lists_are_shown_in_full() {
        let row_errors = vec![
            RowError::invalid_quantity(2, "abc"),
            RowError::unknown_item(3, "RM999"),
        ];

        let rendered = render(&[], &row_errors);

        assert!(rendered.contains("Skipped 2 row(s):"));
        assert!(rendered.contains("Row 2: invalid stock quantity \"abc\""));
        assert!(rendered.contains("Row 3: item with ID \"RM999\" not found"));
        assert!(!rendered.contains("more"));
    }

    #[test]
    fn marks_warned_rows_and_counts_them() {
        let rows = vec![
            adjustment(
                "RM001",
                150.0,
                40.0,
                Some(StockWarning::BelowMinimum {
                    minimum: Quantity::new(50.0).unwrap(),
                }),
            ),
            adjustment("RM002", 80.0, 90.0, None),
        ];

        let rendered = render(&rows, &[]);

        assert!(rendered.contains("! Below minimum level (50)"));
        assert!(rendered.contains("2 update(s), 1 with warnings."));
    }

    #[test]
    fn deltas_carry_an_explicit_sign() {
        let rows = vec![adjustment("RM002", 80.0, 90.0, None)];
        let rendered = render(&rows, &[]);
        assert!(rendered.contains("+10"));
    }

    #[test]
    fn an_empty_review_reports_nothing_to_apply() {
        let rendered = render(&[], &[]);
        assert!(!rendered.contains("Skipped"));
        assert!(rendered.contains("No updates to apply."));
    }
}
