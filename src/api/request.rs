//! Request types for the rate card preview service.

use serde::{Deserialize, Serialize};

use crate::models::{AppliedRate, BillingItem, BookingInput, Selections, ServiceType};

/// Request body for `POST /rate-card/instantiate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstantiationRequest {
    /// The contract whose rate card prices the booking.
    pub contract_id: String,
    /// The service to rate.
    pub service_type: ServiceType,
    /// Booking mode; falls back to the mode on the booking form.
    #[serde(default)]
    pub mode: Option<String>,
    /// The booking as submitted by the form.
    pub booking: BookingInput,
    /// Explicit alternative choices. When absent for trucking they are
    /// inferred from the booking.
    #[serde(default)]
    pub selections: Option<Selections>,
}

/// Request body for `POST /rate-card/billing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRequest {
    /// The booking being billed.
    pub booking_id: String,
    /// The contract the applied rates came from.
    pub contract_id: String,
    /// The applied rates to convert.
    pub applied_rates: Vec<AppliedRate>,
    /// Billing items already recorded for the booking.
    #[serde(default)]
    pub existing_items: Vec<BillingItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_instantiation_request() {
        let json = r#"{
            "contract_id": "ctr_acme_2026",
            "service_type": "Trucking",
            "booking": {
                "kind": "single_line_trucking",
                "mode": "FCL",
                "truckType": "10-wheeler",
                "deliveryAddress": "Calamba, Laguna",
                "quantity": 2
            }
        }"#;

        let request: InstantiationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.contract_id, "ctr_acme_2026");
        assert_eq!(request.service_type, ServiceType::Trucking);
        assert_eq!(request.mode, None);
        assert_eq!(request.booking.mode(), Some("FCL"));
        assert!(request.selections.is_none());
    }

    #[test]
    fn test_deserialize_billing_request_without_existing_items() {
        let json = r#"{
            "booking_id": "bk_001",
            "contract_id": "ctr_acme_2026",
            "applied_rates": [{
                "sourceRowId": "brk_fee",
                "particular": "Brokerage Fee",
                "unitType": "per_shipment",
                "unitRate": "6500.00",
                "quantity": 1,
                "quantityBilledAtBase": 1,
                "quantityBilledAtSucceeding": 0,
                "subtotal": "6500.00",
                "currency": "PHP"
            }]
        }"#;

        let request: BillingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.applied_rates.len(), 1);
        assert!(request.existing_items.is_empty());
    }
}
