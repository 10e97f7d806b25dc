//! Mode column resolution.
//!
//! A rate row may price several booking modes (`FCL`, `LCL`, `AIR`, ...) in
//! separate columns. These functions pick the unit rate that applies to a
//! booking's mode.

use rust_decimal::Decimal;

use crate::models::ContractRateRow;

/// Looks up the row's unit rate for an exact mode.
///
/// Returns `None` when the row has no column for `mode`. There is no fuzzy
/// matching and no default column: a missing column means the row does not
/// apply in this mode.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::resolve_mode_column;
/// use rate_card_engine::models::{ContractRateRow, UnitType};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let row = ContractRateRow {
///     id: "row_001".to_string(),
///     particular: "Ocean Freight".to_string(),
///     unit_type: UnitType::PerContainer,
///     mode_columns: BTreeMap::from([("FCL".to_string(), Decimal::new(100, 0))]),
///     base_rate: None,
///     succeeding_rate: None,
///     succeeding_threshold: None,
///     selection_group: None,
///     selection_key: None,
///     selection_value: None,
///     container_size: None,
///     remarks: None,
/// };
///
/// assert_eq!(resolve_mode_column(&row, "FCL"), Some(Decimal::new(100, 0)));
/// assert_eq!(resolve_mode_column(&row, "LCL"), None);
/// assert_eq!(resolve_mode_column(&row, "fcl"), None);
/// ```
pub fn resolve_mode_column(row: &ContractRateRow, mode: &str) -> Option<Decimal> {
    row.mode_columns.get(mode).copied()
}

/// Resolves the base-tier unit rate a row bills in `mode`.
///
/// A row with mode columns is priced only through [`resolve_mode_column`].
/// A row with no mode columns at all is mode-agnostic and bills its
/// `base_rate` in every mode. A row with neither resolves to `None`.
pub fn resolve_unit_rate(row: &ContractRateRow, mode: &str) -> Option<Decimal> {
    if row.mode_columns.is_empty() {
        row.base_rate
    } else {
        resolve_mode_column(row, mode)
    }
}
