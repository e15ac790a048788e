//! Reconciliation: match parsed rows to the snapshot, compute deltas,
//! classify warnings.

use serde::{Deserialize, Serialize};

use stocktake_core::{DomainError, DomainResult, ItemCode, Quantity};
use stocktake_inventory::{InventoryItem, InventorySnapshot};

use crate::parse::ParsedRow;

/// Advisory classification attached to a proposed adjustment.
///
/// Warnings never block a commit; they are surfaced for human review.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockWarning {
    /// The requested quantity sits below the item's minimum level.
    BelowMinimum { minimum: Quantity },
    /// The requested quantity sits above the item's maximum level.
    AboveMaximum { maximum: Quantity },
    /// The relative change against current stock exceeds the policy ratio.
    LargeChange { ratio: f64 },
}

impl core::fmt::Display for StockWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockWarning::BelowMinimum { minimum } => {
                write!(f, "Below minimum level ({minimum})")
            }
            StockWarning::AboveMaximum { maximum } => {
                write!(f, "Above maximum level ({maximum})")
            }
            StockWarning::LargeChange { ratio } => {
                let percent = (ratio * 100.0 * 100.0).round() / 100.0;
                write!(f, "Large stock change (>{percent}%)")
            }
        }
    }
}

/// Thresholds applied while classifying adjustments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReconcilePolicy {
    large_change_ratio: f64,
}

impl ReconcilePolicy {
    /// Default policy: changes over 50% of current stock are flagged.
    pub fn new() -> Self {
        Self {
            large_change_ratio: 0.5,
        }
    }

    pub fn with_large_change_ratio(mut self, large_change_ratio: f64) -> Self {
        self.large_change_ratio = large_change_ratio;
        self
    }

    pub fn large_change_ratio(&self) -> f64 {
        self.large_change_ratio
    }
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// One proposed stock adjustment, ready for review and commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub code: ItemCode,
    pub name: String,
    pub unit: String,
    pub current: Quantity,
    pub requested: Quantity,
    /// Always `requested - current`.
    pub delta: f64,
    pub warning: Option<StockWarning>,
}

/// Reconcile parsed rows against the same snapshot they were parsed with.
///
/// Output preserves input order. Duplicate codes are not merged: two rows
/// for the same item yield two adjustments, each computed against the
/// snapshot quantity. A row whose code is absent from the snapshot means
/// the caller mixed snapshots, and that fails the whole pass.
pub fn reconcile(
    rows: &[ParsedRow],
    snapshot: &InventorySnapshot,
    policy: &ReconcilePolicy,
) -> DomainResult<Vec<StockAdjustment>> {
    let ratio = policy.large_change_ratio();
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(DomainError::validation(
            "large-change ratio must be a finite positive number",
        ));
    }

    let mut adjustments = Vec::with_capacity(rows.len());
    for row in rows {
        let item = snapshot.get(row.code.as_str()).ok_or_else(|| {
            DomainError::invariant(format!(
                "row for {} does not match the supplied snapshot",
                row.code
            ))
        })?;

        let delta = row.requested.value() - item.quantity().value();
        adjustments.push(StockAdjustment {
            code: row.code.clone(),
            name: item.name().to_string(),
            unit: item.unit().to_string(),
            current: item.quantity(),
            requested: row.requested,
            delta,
            warning: classify(row.requested, item, delta, ratio),
        });
    }

    tracing::debug!(
        adjustments = adjustments.len(),
        warnings = adjustments.iter().filter(|a| a.warning.is_some()).count(),
        "reconciled stock upload"
    );

    Ok(adjustments)
}

/// First matching rule wins: a row below minimum is never also flagged as a
/// large change.
fn classify(
    requested: Quantity,
    item: &InventoryItem,
    delta: f64,
    ratio: f64,
) -> Option<StockWarning> {
    if let Some(minimum) = item.min_level() {
        if requested < minimum {
            return Some(StockWarning::BelowMinimum { minimum });
        }
    }

    if let Some(maximum) = item.max_level() {
        if requested > maximum {
            return Some(StockWarning::AboveMaximum { maximum });
        }
    }

    // Items with no stock never trip the ratio rule: there is no base to
    // compare against. Whether restocking from zero deserves a rule of its
    // own is an open product question.
    let current = item.quantity().value();
    if current > 0.0 && delta.abs() / current > ratio {
        return Some(StockWarning::LargeChange { ratio });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(v: f64) -> Quantity {
        Quantity::new(v).unwrap()
    }

    fn code(s: &str) -> ItemCode {
        ItemCode::new(s).unwrap()
    }

    fn steel_rod() -> InventoryItem {
        InventoryItem::new(code("RM001"), "Steel Rod", qty(150.0), "kg")
            .unwrap()
            .with_min_level(qty(50.0))
            .with_max_level(qty(300.0))
    }

    fn row(id: &str, requested: f64) -> ParsedRow {
        ParsedRow {
            code: code(id),
            requested: qty(requested),
        }
    }

    fn reconcile_one(item: InventoryItem, requested: f64) -> StockAdjustment {
        let id = item.code().as_str().to_string();
        let snapshot = InventorySnapshot::new(vec![item]);
        let rows = vec![row(&id, requested)];
        reconcile(&rows, &snapshot, &ReconcilePolicy::default())
            .unwrap()
            .remove(0)
    }

    #[test]
    fn small_changes_inside_levels_pass_clean() {
        let adjustment = reconcile_one(steel_rod(), 160.0);

        assert_eq!(adjustment.current, qty(150.0));
        assert_eq!(adjustment.requested, qty(160.0));
        assert_eq!(adjustment.delta, 10.0);
        assert_eq!(adjustment.warning, None);
    }

    #[test]
    fn flags_requests_below_the_minimum_level() {
        let adjustment = reconcile_one(steel_rod(), 40.0);

        assert_eq!(adjustment.delta, -110.0);
        assert_eq!(
            adjustment.warning,
            Some(StockWarning::BelowMinimum { minimum: qty(50.0) })
        );
        assert_eq!(
            adjustment.warning.unwrap().to_string(),
            "Below minimum level (50)"
        );
    }

    #[test]
    fn flags_requests_above_the_maximum_level() {
        let adjustment = reconcile_one(steel_rod(), 500.0);

        assert_eq!(
            adjustment.warning,
            Some(StockWarning::AboveMaximum { maximum: qty(300.0) })
        );
        assert_eq!(
            adjustment.warning.unwrap().to_string(),
            "Above maximum level (300)"
        );
    }

    #[test]
    fn below_minimum_outranks_the_large_change_rule() {
        // 150 -> 40 is below minimum and also a >50% swing.
        let adjustment = reconcile_one(steel_rod(), 40.0);
        assert!(matches!(
            adjustment.warning,
            Some(StockWarning::BelowMinimum { .. })
        ));
    }

    #[test]
    fn flags_large_relative_changes_in_both_directions() {
        let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(100.0), "kg").unwrap();

        let up = reconcile_one(item.clone(), 151.0);
        assert_eq!(up.warning, Some(StockWarning::LargeChange { ratio: 0.5 }));
        assert_eq!(up.warning.unwrap().to_string(), "Large stock change (>50%)");

        let down = reconcile_one(item, 49.0);
        assert!(matches!(
            down.warning,
            Some(StockWarning::LargeChange { .. })
        ));
    }

    #[test]
    fn a_change_exactly_at_the_threshold_is_not_flagged() {
        // |delta| / current equals the ratio; the rule wants strictly greater.
        let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(100.0), "kg").unwrap();
        let adjustment = reconcile_one(item, 150.0);
        assert_eq!(adjustment.warning, None);
    }

    #[test]
    fn an_unchanged_quantity_still_warns_when_stock_sits_below_minimum() {
        let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(30.0), "kg")
            .unwrap()
            .with_min_level(qty(50.0));
        let adjustment = reconcile_one(item, 30.0);

        assert_eq!(adjustment.delta, 0.0);
        assert_eq!(
            adjustment.warning,
            Some(StockWarning::BelowMinimum { minimum: qty(50.0) })
        );
    }

    #[test]
    fn zero_current_stock_never_trips_the_ratio_rule() {
        let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(0.0), "kg").unwrap();
        let adjustment = reconcile_one(item, 1_000_000.0);

        assert_eq!(adjustment.delta, 1_000_000.0);
        assert_eq!(adjustment.warning, None);
    }

    #[test]
    fn the_policy_ratio_is_configurable() {
        let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(100.0), "kg").unwrap();
        let snapshot = InventorySnapshot::new(vec![item]);
        let policy = ReconcilePolicy::new().with_large_change_ratio(0.1);

        let adjustments = reconcile(&[row("RM001", 120.0)], &snapshot, &policy).unwrap();
        assert_eq!(
            adjustments[0].warning,
            Some(StockWarning::LargeChange { ratio: 0.1 })
        );
        assert_eq!(
            adjustments[0].warning.unwrap().to_string(),
            "Large stock change (>10%)"
        );
    }

    #[test]
    fn rejects_a_nonsensical_policy_ratio() {
        let snapshot = InventorySnapshot::new(vec![steel_rod()]);
        let policy = ReconcilePolicy::new().with_large_change_ratio(0.0);

        let err = reconcile(&[], &snapshot, &policy).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn a_row_missing_from_the_snapshot_fails_the_pass() {
        let snapshot = InventorySnapshot::new(vec![steel_rod()]);

        let err = reconcile(
            &[row("RM999", 10.0)],
            &snapshot,
            &ReconcilePolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn duplicate_rows_stay_independent() {
        let snapshot = InventorySnapshot::new(vec![steel_rod()]);
        let rows = vec![row("RM001", 10.0), row("RM001", 160.0)];

        let adjustments = reconcile(&rows, &snapshot, &ReconcilePolicy::default()).unwrap();
        assert_eq!(adjustments.len(), 2);
        // Both are computed against the same snapshot quantity.
        assert_eq!(adjustments[0].current, qty(150.0));
        assert_eq!(adjustments[0].delta, -140.0);
        assert_eq!(adjustments[1].current, qty(150.0));
        assert_eq!(adjustments[1].delta, 10.0);
    }

    #[test]
    fn preserves_input_order() {
        let copper = InventoryItem::new(code("RM002"), "Copper Wire", qty(80.0), "m").unwrap();
        let snapshot = InventorySnapshot::new(vec![copper, steel_rod()]);
        let rows = vec![row("RM001", 150.0), row("RM002", 80.0)];

        let adjustments = reconcile(&rows, &snapshot, &ReconcilePolicy::default()).unwrap();
        assert_eq!(adjustments[0].code.as_str(), "RM001");
        assert_eq!(adjustments[1].code.as_str(), "RM002");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: requesting the current quantity never warns when it
            /// sits inside the item's levels.
            #[test]
            fn unchanged_quantity_never_warns(
                current in 0.0f64..100_000.0,
                min_gap in 0.0f64..500.0,
                max_gap in 0.0f64..500.0,
            ) {
                let item = InventoryItem::new(code("RM001"), "Steel Rod", qty(current), "kg")
                    .unwrap()
                    .with_min_level(qty((current - min_gap).max(0.0)))
                    .with_max_level(qty(current + max_gap));

                let adjustment = reconcile_one(item, current);
                prop_assert_eq!(adjustment.delta, 0.0);
                prop_assert_eq!(adjustment.warning, None);
            }

            /// Property: zero current stock with no levels set never warns,
            /// however large the requested value.
            #[test]
            fn restock_from_zero_never_warns(requested in 0.0f64..10_000_000.0) {
                let item =
                    InventoryItem::new(code("RM001"), "Steel Rod", qty(0.0), "kg").unwrap();
                let adjustment = reconcile_one(item, requested);
                prop_assert_eq!(adjustment.warning, None);
            }

            /// Property: delta is always requested minus current.
            #[test]
            fn delta_is_requested_minus_current(
                current in 0.0f64..100_000.0,
                requested in 0.0f64..100_000.0,
            ) {
                let item =
                    InventoryItem::new(code("RM001"), "Steel Rod", qty(current), "kg").unwrap();
                let adjustment = reconcile_one(item, requested);
                prop_assert_eq!(adjustment.delta, requested - current);
            }
        }
    }
}
