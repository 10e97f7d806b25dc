//! Rate instantiation result models.
//!
//! This module contains the [`AppliedRate`] billing line produced by the engine
//! and the audit structures that record why every row did or did not fire.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::UnitType;

/// One computed, billable line produced from a contract rate row.
///
/// The subtotal is exact:
/// `unit_rate * quantity_billed_at_base + succeeding_rate * quantity_billed_at_succeeding`.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{AppliedRate, UnitType};
/// use rust_decimal::Decimal;
///
/// let applied = AppliedRate {
///     source_row_id: "row_001".to_string(),
///     particular: "20ft Container".to_string(),
///     unit_type: UnitType::PerContainer,
///     unit_rate: Decimal::new(100, 0),
///     succeeding_rate: Some(Decimal::new(60, 0)),
///     quantity: 5,
///     quantity_billed_at_base: 2,
///     quantity_billed_at_succeeding: 3,
///     subtotal: Decimal::new(380, 0),
///     currency: "PHP".to_string(),
///     destination: None,
///     remarks: None,
/// };
/// assert!(applied.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRate {
    /// The id of the contract rate row this line came from.
    pub source_row_id: String,
    /// The row's description.
    pub particular: String,
    /// The quantity dimension that was multiplied.
    pub unit_type: UnitType,
    /// The unit rate billed for the base tier.
    pub unit_rate: Decimal,
    /// The unit rate billed beyond the threshold, if the row is tiered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeding_rate: Option<Decimal>,
    /// Total quantity billed.
    pub quantity: u32,
    /// Units billed at the base rate.
    pub quantity_billed_at_base: u32,
    /// Units billed at the succeeding rate.
    pub quantity_billed_at_succeeding: u32,
    /// Exact line total.
    pub subtotal: Decimal,
    /// Currency of the matrix the row belongs to.
    pub currency: String,
    /// The delivery destination, for lines produced per trucking leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Remarks carried over from the rate row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl AppliedRate {
    /// Returns true if the tier split and subtotal agree with the rates.
    pub fn is_consistent(&self) -> bool {
        let expected = self.unit_rate * Decimal::from(self.quantity_billed_at_base)
            + self.succeeding_rate.unwrap_or(Decimal::ZERO)
                * Decimal::from(self.quantity_billed_at_succeeding);
        self.quantity_billed_at_base + self.quantity_billed_at_succeeding == self.quantity
            && self.subtotal == expected
    }
}

/// A single step in the audit trace recording one row decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the rule that decided (e.g. `row_applied`, `mode_mismatch`).
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// The rate row this step concerns.
    pub row_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A diagnostic raised for malformed rate card data.
///
/// Warnings never abort instantiation; the offending row simply produces
/// no charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g. "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one preview calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of row decisions.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during instantiation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The outcome of instantiating a rate matrix, with its audit record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateInstantiationResult {
    /// The billable lines, in matrix row order.
    pub applied_rates: Vec<AppliedRate>,
    /// One step per evaluated row.
    pub audit_steps: Vec<AuditStep>,
    /// Diagnostics for malformed rows.
    pub warnings: Vec<AuditWarning>,
}

impl RateInstantiationResult {
    /// Appends another result, keeping every line and step.
    pub fn extend(&mut self, other: RateInstantiationResult) {
        self.applied_rates.extend(other.applied_rates);
        self.audit_steps.extend(other.audit_steps);
        self.warnings.extend(other.warnings);
    }
}
