//! Rate instantiation: turning a rate matrix and booking quantities into
//! billable lines.
//!
//! ## Row evaluation
//!
//! Every row is evaluated on its own, in matrix order:
//! 1. **Eligibility**: a row in a selection group fires only when the caller's
//!    selections pick its `selectionValue` for its `selectionKey`.
//! 2. **Unit rate**: the mode column for the booking mode (or the base rate of a
//!    mode-agnostic row). No rate means the row is not priced in this mode.
//! 3. **Quantity**: the booking count for the row's unit type. Zero suppresses
//!    the row.
//! 4. **Tiering**: with a succeeding rate, the first `threshold` units bill at
//!    the unit rate and the rest at the succeeding rate. Without one, every
//!    unit bills at the unit rate.
//!
//! Skipped rows are ordinary outcomes recorded in the audit trail. Rows with no
//! pricing data, or grouped rows missing their key or value, raise a warning
//! and produce no charge.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    AppliedRate, AuditStep, AuditWarning, BookingQuantities, ContractRateMatrix, ContractRateRow,
    RateInstantiationResult, Selections,
};

use super::mode_column::resolve_unit_rate;

/// Warning code for a row with neither mode columns nor a base rate.
pub const ROW_WITHOUT_PRICING: &str = "ROW_WITHOUT_PRICING";

/// Warning code for a grouped row missing its selection key or value.
pub const INCOMPLETE_SELECTION_ROW: &str = "INCOMPLETE_SELECTION_ROW";

/// How the billable quantity of a row splits across its two rate tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSplit {
    /// Units billed at the base (unit) rate.
    pub at_base: u32,
    /// Units billed at the succeeding rate.
    pub at_succeeding: u32,
}

/// Splits a quantity into base and succeeding tiers.
///
/// Without a succeeding rate the threshold is ignored and every unit bills
/// at base.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::{split_tiers, TierSplit};
///
/// assert_eq!(split_tiers(5, 2, true), TierSplit { at_base: 2, at_succeeding: 3 });
/// assert_eq!(split_tiers(5, 2, false), TierSplit { at_base: 5, at_succeeding: 0 });
/// assert_eq!(split_tiers(1, 2, true), TierSplit { at_base: 1, at_succeeding: 0 });
/// ```
pub fn split_tiers(quantity: u32, threshold: u32, has_succeeding_rate: bool) -> TierSplit {
    if has_succeeding_rate {
        let at_base = quantity.min(threshold);
        TierSplit {
            at_base,
            at_succeeding: quantity - at_base,
        }
    } else {
        TierSplit {
            at_base: quantity,
            at_succeeding: 0,
        }
    }
}

/// Instantiates a rate matrix against a booking's quantities.
///
/// Returns the billable lines in matrix row order. An empty result is a valid
/// outcome meaning no rate-card charge applies to the booking.
///
/// # Arguments
///
/// * `matrix` - The contract rate card
/// * `quantities` - The booking's normalized quantities
/// * `mode` - The booking mode (`FCL`, `LCL`, `AIR`, ...)
/// * `selections` - Chosen alternatives for selection-group rows, if any
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::instantiate_rates;
/// use rate_card_engine::models::{
///     BookingQuantities, ContractRateMatrix, ContractRateRow, ServiceType, UnitType,
/// };
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let matrix = ContractRateMatrix {
///     id: "mx_001".to_string(),
///     service_type: ServiceType::Trucking,
///     currency: "PHP".to_string(),
///     rows: vec![ContractRateRow {
///         id: "row_001".to_string(),
///         particular: "Container Delivery".to_string(),
///         unit_type: UnitType::PerContainer,
///         mode_columns: BTreeMap::from([("FCL".to_string(), Decimal::new(150, 0))]),
///         base_rate: Some(Decimal::new(150, 0)),
///         succeeding_rate: None,
///         succeeding_threshold: None,
///         selection_group: None,
///         selection_key: None,
///         selection_value: None,
///         container_size: None,
///         remarks: None,
///     }],
/// };
/// let quantities = BookingQuantities { containers: 3, ..Default::default() };
///
/// let applied = instantiate_rates(&matrix, &quantities, "FCL", None);
/// assert_eq!(applied.len(), 1);
/// assert_eq!(applied[0].subtotal, Decimal::new(450, 0));
/// ```
pub fn instantiate_rates(
    matrix: &ContractRateMatrix,
    quantities: &BookingQuantities,
    mode: &str,
    selections: Option<&Selections>,
) -> Vec<AppliedRate> {
    instantiate_rates_with_audit(matrix, quantities, mode, selections, 1).applied_rates
}

/// Instantiates a rate matrix and records one audit step per row.
///
/// Audit steps are numbered from `step_number_start`.
pub fn instantiate_rates_with_audit(
    matrix: &ContractRateMatrix,
    quantities: &BookingQuantities,
    mode: &str,
    selections: Option<&Selections>,
    step_number_start: u32,
) -> RateInstantiationResult {
    let mut result = RateInstantiationResult::default();
    let mut step_number = step_number_start;

    for row in &matrix.rows {
        let decision = evaluate_row(row, matrix, quantities, mode, selections);
        result
            .audit_steps
            .push(audit_step_for(row, &decision, mode, step_number));
        step_number += 1;

        match decision {
            RowDecision::Applied(applied) => result.applied_rates.push(applied),
            RowDecision::Malformed { code, message } => {
                warn!(
                    matrix_id = %matrix.id,
                    row_id = %row.id,
                    code,
                    "{}",
                    message
                );
                result.warnings.push(AuditWarning {
                    code: code.to_string(),
                    message,
                    severity: "medium".to_string(),
                });
            }
            RowDecision::NotSelected | RowDecision::ModeNotPriced | RowDecision::ZeroQuantity => {
                debug!(matrix_id = %matrix.id, row_id = %row.id, mode, "Rate row not applicable");
            }
        }
    }

    result
}

/// The outcome of evaluating a single rate row.
enum RowDecision {
    Applied(AppliedRate),
    NotSelected,
    ModeNotPriced,
    ZeroQuantity,
    Malformed { code: &'static str, message: String },
}

fn evaluate_row(
    row: &ContractRateRow,
    matrix: &ContractRateMatrix,
    quantities: &BookingQuantities,
    mode: &str,
    selections: Option<&Selections>,
) -> RowDecision {
    if row.is_grouped() {
        let (Some(key), Some(value)) = (row.selection_key.as_deref(), row.selection_value.as_deref())
        else {
            return RowDecision::Malformed {
                code: INCOMPLETE_SELECTION_ROW,
                message: format!(
                    "Row '{}' is in a selection group but has no selection key or value",
                    row.id
                ),
            };
        };
        let selected = selections
            .and_then(|s| s.get(key))
            .is_some_and(|chosen| chosen == value);
        if !selected {
            return RowDecision::NotSelected;
        }
    }

    if row.has_no_pricing() {
        return RowDecision::Malformed {
            code: ROW_WITHOUT_PRICING,
            message: format!("Row '{}' has no mode columns and no base rate", row.id),
        };
    }

    let Some(unit_rate) = resolve_unit_rate(row, mode) else {
        return RowDecision::ModeNotPriced;
    };

    let quantity = quantities.quantity_for(row.unit_type, row.container_size.as_deref());
    if quantity == 0 {
        return RowDecision::ZeroQuantity;
    }

    let split = split_tiers(quantity, row.threshold(), row.succeeding_rate.is_some());
    let subtotal = unit_rate * Decimal::from(split.at_base)
        + row.succeeding_rate.unwrap_or(Decimal::ZERO) * Decimal::from(split.at_succeeding);

    RowDecision::Applied(AppliedRate {
        source_row_id: row.id.clone(),
        particular: row.particular.clone(),
        unit_type: row.unit_type,
        unit_rate,
        succeeding_rate: row.succeeding_rate,
        quantity,
        quantity_billed_at_base: split.at_base,
        quantity_billed_at_succeeding: split.at_succeeding,
        subtotal,
        currency: matrix.currency.clone(),
        destination: None,
        remarks: row.remarks.clone(),
    })
}

fn audit_step_for(
    row: &ContractRateRow,
    decision: &RowDecision,
    mode: &str,
    step_number: u32,
) -> AuditStep {
    let input = serde_json::json!({
        "unit_type": row.unit_type.as_str(),
        "mode": mode,
        "selection_group": row.selection_group,
        "selection_key": row.selection_key,
        "selection_value": row.selection_value,
    });

    let (rule_id, rule_name, output, reasoning) = match decision {
        RowDecision::Applied(applied) => (
            "row_applied",
            "Rate Row Applied",
            serde_json::json!({
                "unit_rate": applied.unit_rate.to_string(),
                "quantity": applied.quantity,
                "quantity_billed_at_base": applied.quantity_billed_at_base,
                "quantity_billed_at_succeeding": applied.quantity_billed_at_succeeding,
                "subtotal": applied.subtotal.to_string(),
            }),
            match applied.succeeding_rate {
                Some(succeeding) if applied.quantity_billed_at_succeeding > 0 => format!(
                    "{} x {currency} {} + {} x {currency} {} = {currency} {}",
                    applied.quantity_billed_at_base,
                    applied.unit_rate,
                    applied.quantity_billed_at_succeeding,
                    succeeding,
                    applied.subtotal,
                    currency = applied.currency
                ),
                _ => format!(
                    "{} x {currency} {} = {currency} {}",
                    applied.quantity_billed_at_base,
                    applied.unit_rate,
                    applied.subtotal,
                    currency = applied.currency
                ),
            },
        ),
        RowDecision::NotSelected => (
            "not_selected",
            "Selection Group Alternative Not Chosen",
            serde_json::json!({ "applied": false }),
            format!(
                "Row '{}' is an alternative in group '{}' that the booking did not select",
                row.id,
                row.selection_group.as_deref().unwrap_or_default()
            ),
        ),
        RowDecision::ModeNotPriced => (
            "mode_not_priced",
            "Mode Not Priced",
            serde_json::json!({ "applied": false }),
            format!("Row '{}' has no rate for mode '{}'", row.id, mode),
        ),
        RowDecision::ZeroQuantity => (
            "zero_quantity",
            "Zero Quantity Suppressed",
            serde_json::json!({ "applied": false }),
            format!(
                "Booking has no billable {} quantity for row '{}'",
                row.unit_type.as_str(),
                row.id
            ),
        ),
        RowDecision::Malformed { code, message } => (
            "malformed_row",
            "Malformed Rate Row",
            serde_json::json!({ "applied": false, "warning": code }),
            message.clone(),
        ),
    };

    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        row_ref: row.id.clone(),
        input,
        output,
        reasoning,
    }
}
