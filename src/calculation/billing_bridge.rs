//! Conversion of applied rates into ledger billing items.
//!
//! Every generated item starts `unbilled` and keeps its provenance
//! (`source_type = rate_card`, `source_id` = rate row id, contract id) so an
//! invoice line can be traced back to the contract row that priced it.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AppliedRate, BillingItem, BillingSourceType, BillingStatus};

/// The booking and contract a batch of billing items is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingContext {
    /// The booking being billed.
    pub booking_id: String,
    /// The contract whose rate card priced the booking.
    pub contract_id: String,
    /// The contract's human-facing number, shown in descriptions.
    pub contract_number: String,
}

/// Builds the ledger description for an applied rate.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::describe_applied_rate;
/// use rate_card_engine::models::{AppliedRate, UnitType};
/// use rust_decimal::Decimal;
///
/// let mut applied = AppliedRate {
///     source_row_id: "row_001".to_string(),
///     particular: "Trucking 10-Wheeler".to_string(),
///     unit_type: UnitType::PerContainer,
///     unit_rate: Decimal::new(12000, 0),
///     succeeding_rate: None,
///     quantity: 1,
///     quantity_billed_at_base: 1,
///     quantity_billed_at_succeeding: 0,
///     subtotal: Decimal::new(12000, 0),
///     currency: "PHP".to_string(),
///     destination: None,
///     remarks: None,
/// };
/// assert_eq!(
///     describe_applied_rate(&applied, "CTR-2026-001"),
///     "Trucking 10-Wheeler (CTR-2026-001)"
/// );
///
/// applied.destination = Some("Calamba".to_string());
/// assert_eq!(
///     describe_applied_rate(&applied, "CTR-2026-001"),
///     "Trucking 10-Wheeler - Calamba (CTR-2026-001)"
/// );
/// ```
pub fn describe_applied_rate(applied: &AppliedRate, contract_number: &str) -> String {
    match &applied.destination {
        Some(destination) => format!(
            "{} - {} ({})",
            applied.particular, destination, contract_number
        ),
        None => format!("{} ({})", applied.particular, contract_number),
    }
}

/// Maps applied rates to new `unbilled` rate-card billing items.
///
/// Amounts are the exact subtotals; rounding is left to display.
pub fn generate_rate_card_billing_items(
    applied_rates: &[AppliedRate],
    context: &BillingContext,
) -> Vec<BillingItem> {
    let created_at = Utc::now();

    applied_rates
        .iter()
        .map(|applied| BillingItem {
            id: Uuid::new_v4(),
            booking_id: context.booking_id.clone(),
            description: describe_applied_rate(applied, &context.contract_number),
            quantity: applied.quantity,
            unit_price: applied.unit_rate,
            amount: applied.subtotal,
            currency: applied.currency.clone(),
            status: BillingStatus::Unbilled,
            source_type: BillingSourceType::RateCard,
            source_id: Some(applied.source_row_id.clone()),
            contract_id: Some(context.contract_id.clone()),
            created_at,
        })
        .collect()
}

/// Returns true if rate-card items already exist for the booking.
///
/// Callers check this before generating a new batch so re-applying a rate
/// card never duplicates ledger entries.
pub fn has_existing_rate_card_billing(existing_items: &[BillingItem], booking_id: &str) -> bool {
    existing_items
        .iter()
        .any(|item| item.is_rate_card() && item.booking_id == booking_id)
}

/// Sums the subtotals of a set of applied rates.
pub fn rate_card_total(applied_rates: &[AppliedRate]) -> Decimal {
    applied_rates.iter().map(|applied| applied.subtotal).sum()
}
