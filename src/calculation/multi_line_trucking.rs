//! Multi-destination trucking billing.
//!
//! A trucking booking with several delivery legs is rated one leg at a time:
//! each leg derives its own quantities and truck/destination selections, runs
//! through the engine, and its lines are tagged with the leg's destination.
//! Results are concatenated, never merged, so an invoice keeps a per-destination
//! breakdown even when two legs hit the same rate row.

use crate::models::{
    AppliedRate, ContractRateMatrix, RateInstantiationResult, Selections, TruckingLineItem,
};

use super::quantity_extractor::extract_multi_line_selections_and_quantities;
use super::rate_instantiation::instantiate_rates_with_audit;

/// Rates every trucking line against the matrix and concatenates the results.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::calculate_multi_line_trucking_billing;
/// use rate_card_engine::models::{
///     ContractRateMatrix, ContractRateRow, ServiceType, TruckingLineItem, UnitType,
/// };
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let matrix = ContractRateMatrix {
///     id: "mx_001".to_string(),
///     service_type: ServiceType::Trucking,
///     currency: "PHP".to_string(),
///     rows: vec![ContractRateRow {
///         id: "row_delivery".to_string(),
///         particular: "Delivery".to_string(),
///         unit_type: UnitType::PerContainer,
///         mode_columns: BTreeMap::from([("FCL".to_string(), Decimal::new(5000, 0))]),
///         base_rate: None,
///         succeeding_rate: None,
///         succeeding_threshold: None,
///         selection_group: None,
///         selection_key: None,
///         selection_value: None,
///         container_size: None,
///         remarks: None,
///     }],
/// };
/// let lines = vec![
///     TruckingLineItem { destination: Some("Calamba".to_string()), truck_type: None, quantity: 1 },
///     TruckingLineItem { destination: Some("Batangas".to_string()), truck_type: None, quantity: 1 },
/// ];
///
/// let applied = calculate_multi_line_trucking_billing(&lines, &matrix, "FCL");
/// assert_eq!(applied.len(), 2);
/// assert_eq!(applied[0].destination.as_deref(), Some("Calamba"));
/// assert_eq!(applied[1].destination.as_deref(), Some("Batangas"));
/// ```
pub fn calculate_multi_line_trucking_billing(
    line_items: &[TruckingLineItem],
    matrix: &ContractRateMatrix,
    mode: &str,
) -> Vec<AppliedRate> {
    calculate_multi_line_trucking_billing_with_audit(line_items, matrix, mode, None, 1)
        .applied_rates
}

/// Rates every trucking line and keeps the audit steps of each leg.
///
/// `shared_selections` apply to every line; a line's own truck type and
/// destination override them key by key.
pub fn calculate_multi_line_trucking_billing_with_audit(
    line_items: &[TruckingLineItem],
    matrix: &ContractRateMatrix,
    mode: &str,
    shared_selections: Option<&Selections>,
    step_number_start: u32,
) -> RateInstantiationResult {
    let mut combined = RateInstantiationResult::default();
    let mut step_number = step_number_start;

    let inputs = extract_multi_line_selections_and_quantities(
        line_items,
        std::slice::from_ref(matrix),
    );

    for input in inputs {
        let selections = merge_selections(shared_selections, input.selections);
        let mut line_result = instantiate_rates_with_audit(
            matrix,
            &input.quantities,
            mode,
            selections.as_ref(),
            step_number,
        );
        step_number += line_result.audit_steps.len() as u32;

        for applied in &mut line_result.applied_rates {
            applied.destination = input.line.destination.clone();
        }
        combined.extend(line_result);
    }

    combined
}

fn merge_selections(
    shared: Option<&Selections>,
    line: Option<Selections>,
) -> Option<Selections> {
    match (shared, line) {
        (None, line) => line,
        (Some(shared), None) => Some(shared.clone()),
        (Some(shared), Some(line)) => {
            let mut merged = shared.clone();
            merged.extend(line);
            Some(merged)
        }
    }
}
