//! Ledger billing item model.
//!
//! [`BillingItem`] is the generic ledger record consumed by the billing
//! screens. Its provenance fields use snake_case names (`source_type`,
//! `source_id`) to match the accounting API.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Lifecycle status of a billing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// Created but not yet invoiced.
    Unbilled,
    /// Included on an invoice.
    Billed,
    /// Settled by the customer.
    Paid,
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BillingStatus::Unbilled => "unbilled",
            BillingStatus::Billed => "billed",
            BillingStatus::Paid => "paid",
        };
        f.write_str(name)
    }
}

/// Where a billing item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingSourceType {
    /// Generated from a contract rate card.
    RateCard,
    /// Entered by hand.
    Manual,
}

/// A ledger-style billing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingItem {
    /// Unique identifier for the item.
    pub id: Uuid,
    /// The booking this item bills.
    pub booking_id: String,
    /// Human-readable description shown on the ledger.
    pub description: String,
    /// Billed quantity.
    pub quantity: u32,
    /// Base-tier unit price.
    pub unit_price: Decimal,
    /// Total amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Lifecycle status.
    pub status: BillingStatus,
    /// Where the item came from.
    pub source_type: BillingSourceType,
    /// The rate row id for rate-card items.
    #[serde(default)]
    pub source_id: Option<String>,
    /// The contract the rate row belongs to.
    #[serde(default)]
    pub contract_id: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl BillingItem {
    /// Returns true if the item was generated from a rate card.
    pub fn is_rate_card(&self) -> bool {
        self.source_type == BillingSourceType::RateCard
    }

    /// Moves an unbilled item to billed.
    pub fn mark_billed(&mut self) -> EngineResult<()> {
        self.transition(BillingStatus::Unbilled, BillingStatus::Billed)
    }

    /// Moves a billed item to paid.
    pub fn mark_paid(&mut self) -> EngineResult<()> {
        self.transition(BillingStatus::Billed, BillingStatus::Paid)
    }

    fn transition(&mut self, expected: BillingStatus, next: BillingStatus) -> EngineResult<()> {
        if self.status != expected {
            return Err(EngineError::InvalidStatusTransition {
                item_id: self.id.to_string(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_item(status: BillingStatus) -> BillingItem {
        BillingItem {
            id: Uuid::new_v4(),
            booking_id: "bk_001".to_string(),
            description: "Trucking (CTR-2026-001)".to_string(),
            quantity: 1,
            unit_price: Decimal::from_str("12000.00").unwrap(),
            amount: Decimal::from_str("12000.00").unwrap(),
            currency: "PHP".to_string(),
            status,
            source_type: BillingSourceType::RateCard,
            source_id: Some("row_001".to_string()),
            contract_id: Some("ctr_001".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_lifecycle_moves_forward() {
        let mut item = create_item(BillingStatus::Unbilled);
        item.mark_billed().unwrap();
        assert_eq!(item.status, BillingStatus::Billed);
        item.mark_paid().unwrap();
        assert_eq!(item.status, BillingStatus::Paid);
    }

    #[test]
    fn test_paying_unbilled_item_is_rejected() {
        let mut item = create_item(BillingStatus::Unbilled);
        let result = item.mark_paid();

        match result {
            Err(EngineError::InvalidStatusTransition { from, to, .. }) => {
                assert_eq!(from, BillingStatus::Unbilled);
                assert_eq!(to, BillingStatus::Paid);
            }
            other => panic!("Expected InvalidStatusTransition, got {:?}", other),
        }
        assert_eq!(item.status, BillingStatus::Unbilled);
    }

    #[test]
    fn test_rebilling_paid_item_is_rejected() {
        let mut item = create_item(BillingStatus::Paid);
        assert!(item.mark_billed().is_err());
    }

    #[test]
    fn test_billing_item_serializes_snake_case_provenance() {
        let json = serde_json::to_string(&create_item(BillingStatus::Unbilled)).unwrap();
        assert!(json.contains("\"source_type\":\"rate_card\""));
        assert!(json.contains("\"source_id\":\"row_001\""));
        assert!(json.contains("\"status\":\"unbilled\""));
    }

    #[test]
    fn test_billing_item_roundtrip() {
        let item = create_item(BillingStatus::Billed);
        let json = serde_json::to_string(&item).unwrap();
        let parsed: BillingItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
