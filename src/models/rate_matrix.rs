//! Rate matrix model and related types.
//!
//! This module defines the contract rate card: a [`ContractRateMatrix`] made of
//! independently priced [`ContractRateRow`]s. Field names follow the camelCase
//! JSON shape shared with the rest of the ERP (`baseRate`, `modeColumns`,
//! `selectionGroup`, ...).

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The logistics service a rate matrix prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Land transport to one or more delivery destinations.
    Trucking,
    /// Customs brokerage.
    Brokerage,
    /// Freight forwarding (sea or air).
    Forwarding,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceType::Trucking => "Trucking",
            ServiceType::Brokerage => "Brokerage",
            ServiceType::Forwarding => "Forwarding",
        };
        f.write_str(name)
    }
}

/// The dimension a rate row is priced against.
///
/// The unit type decides which [`BookingQuantities`](super::BookingQuantities)
/// field multiplies the row's rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Priced per container (or per truck for trucking).
    PerContainer,
    /// Priced once per shipment.
    PerShipment,
    /// Priced per bill of lading.
    PerBl,
    /// Priced per document set.
    PerSet,
}

impl UnitType {
    /// Returns the wire name of the unit type (e.g. `"per_container"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::PerContainer => "per_container",
            UnitType::PerShipment => "per_shipment",
            UnitType::PerBl => "per_bl",
            UnitType::PerSet => "per_set",
        }
    }
}

/// One priceable line in a rate card.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{ContractRateRow, UnitType};
///
/// let json = r#"{
///     "id": "row_001",
///     "particular": "20ft Container - Zone A",
///     "unitType": "per_container",
///     "modeColumns": { "FCL": "150.00" },
///     "baseRate": "150.00",
///     "succeedingRate": "120.00",
///     "succeedingThreshold": 2
/// }"#;
///
/// let row: ContractRateRow = serde_json::from_str(json).unwrap();
/// assert_eq!(row.unit_type, UnitType::PerContainer);
/// assert_eq!(row.threshold(), 2);
/// assert!(!row.is_grouped());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRateRow {
    /// Unique identifier of the row within its matrix.
    pub id: String,
    /// Human-readable description of the charge.
    pub particular: String,
    /// The quantity dimension this row multiplies.
    pub unit_type: UnitType,
    /// Mode-specific unit rates keyed by mode name (`FCL`, `LCL`, `AIR`, ...).
    #[serde(default)]
    pub mode_columns: BTreeMap<String, Decimal>,
    /// Mode-independent unit rate for the first N billable units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rate: Option<Decimal>,
    /// Unit rate applied beyond the succeeding threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeding_rate: Option<Decimal>,
    /// Number of units billed at the base rate before the succeeding rate applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeding_threshold: Option<u32>,
    /// Tag shared by mutually exclusive alternative rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_group: Option<String>,
    /// The booking attribute this row's alternative is chosen by (e.g. `truckType`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_key: Option<String>,
    /// The attribute value this row represents within its group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_value: Option<String>,
    /// Restricts a `per_container` row to containers of one size (e.g. `40HC`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_size: Option<String>,
    /// Free-text remarks carried through to the applied rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl ContractRateRow {
    /// The default number of units billed at the base rate.
    pub const DEFAULT_SUCCEEDING_THRESHOLD: u32 = 1;

    /// Returns the succeeding threshold, defaulting to 1.
    pub fn threshold(&self) -> u32 {
        self.succeeding_threshold
            .unwrap_or(Self::DEFAULT_SUCCEEDING_THRESHOLD)
    }

    /// Returns true if the row belongs to a non-empty selection group.
    pub fn is_grouped(&self) -> bool {
        self.selection_group
            .as_deref()
            .is_some_and(|group| !group.trim().is_empty())
    }

    /// Returns true if the row carries no pricing data for any mode.
    pub fn has_no_pricing(&self) -> bool {
        self.mode_columns.is_empty() && self.base_rate.is_none()
    }
}

/// One commercial rate card attached to a contract.
///
/// Rows are evaluated independently; their order is presentation order only.
/// Every row is priced in the matrix's currency and belongs to its service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRateMatrix {
    /// Unique identifier for the matrix.
    pub id: String,
    /// The service every row in this matrix prices.
    pub service_type: ServiceType,
    /// ISO currency code shared by every row (e.g. `"PHP"`).
    pub currency: String,
    /// The priceable rows, in presentation order.
    #[serde(default)]
    pub rows: Vec<ContractRateRow>,
}

impl ContractRateMatrix {
    /// Returns the rows that belong to a selection group.
    pub fn grouped_rows(&self) -> impl Iterator<Item = &ContractRateRow> {
        self.rows.iter().filter(|row| row.is_grouped())
    }

    /// Returns true if any row belongs to a selection group.
    pub fn has_selection_groups(&self) -> bool {
        self.grouped_rows().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_row(id: &str) -> ContractRateRow {
        ContractRateRow {
            id: id.to_string(),
            particular: "Trucking - Zone A".to_string(),
            unit_type: UnitType::PerContainer,
            mode_columns: BTreeMap::from([("FCL".to_string(), dec("150"))]),
            base_rate: Some(dec("150")),
            succeeding_rate: None,
            succeeding_threshold: None,
            selection_group: None,
            selection_key: None,
            selection_value: None,
            container_size: None,
            remarks: None,
        }
    }

    #[test]
    fn test_threshold_defaults_to_one() {
        let row = create_row("row_001");
        assert_eq!(row.threshold(), 1);
    }

    #[test]
    fn test_blank_selection_group_is_not_grouped() {
        let mut row = create_row("row_001");
        row.selection_group = Some("  ".to_string());
        assert!(!row.is_grouped());

        row.selection_group = Some("truck".to_string());
        assert!(row.is_grouped());
    }

    #[test]
    fn test_row_without_columns_or_base_rate_has_no_pricing() {
        let mut row = create_row("row_001");
        assert!(!row.has_no_pricing());

        row.mode_columns.clear();
        assert!(!row.has_no_pricing());

        row.base_rate = None;
        assert!(row.has_no_pricing());
    }

    #[test]
    fn test_unit_type_serialization() {
        let json = serde_json::to_string(&UnitType::PerBl).unwrap();
        assert_eq!(json, "\"per_bl\"");

        let unit: UnitType = serde_json::from_str("\"per_container\"").unwrap();
        assert_eq!(unit, UnitType::PerContainer);
        assert_eq!(unit.as_str(), "per_container");
    }

    #[test]
    fn test_unknown_unit_type_is_rejected() {
        let result: Result<UnitType, _> = serde_json::from_str("\"per_pallet\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_matrix_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "mx_001",
            "serviceType": "Trucking",
            "currency": "PHP",
            "rows": [
                {
                    "id": "row_10w",
                    "particular": "10-Wheeler",
                    "unitType": "per_container",
                    "modeColumns": { "FCL": 12000 },
                    "selectionGroup": "truck",
                    "selectionKey": "truckType",
                    "selectionValue": "10-wheeler"
                }
            ]
        }"#;

        let matrix: ContractRateMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(matrix.service_type, ServiceType::Trucking);
        assert_eq!(matrix.rows[0].mode_columns["FCL"], dec("12000"));
        assert!(matrix.has_selection_groups());
        assert_eq!(matrix.grouped_rows().count(), 1);
    }

    #[test]
    fn test_row_serialization_omits_absent_options() {
        let row = create_row("row_001");
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"unitType\":\"per_container\""));
        assert!(json.contains("\"baseRate\""));
        assert!(!json.contains("succeedingRate"));
        assert!(!json.contains("selectionGroup"));
    }

    #[test]
    fn test_service_type_display() {
        assert_eq!(ServiceType::Brokerage.to_string(), "Brokerage");
    }
}
