//! Booking input shapes.
//!
//! Bookings arrive from user-entered forms whose shape differs per service
//! type. [`BookingInput`] models those shapes as a tagged union so each one
//! converts to [`BookingQuantities`](super::BookingQuantities) through an
//! exhaustive match. Count fields are lenient: numbers, numeric strings,
//! `null` and junk are all accepted, and anything unusable counts as zero.

use serde::{Deserialize, Serialize};

use super::ServiceType;

/// One destination leg of a trucking booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckingLineItem {
    /// Delivery destination or address for this leg.
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: Option<String>,
    /// The chosen truck type (e.g. `10-wheeler`).
    #[serde(default, deserialize_with = "lenient::text")]
    pub truck_type: Option<String>,
    /// Number of trucks/containers on this leg.
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
}

/// A single-line trucking booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckingBooking {
    /// Booking mode (e.g. `FCL`).
    #[serde(default, deserialize_with = "lenient::text")]
    pub mode: Option<String>,
    /// The chosen truck type.
    #[serde(default, deserialize_with = "lenient::text")]
    pub truck_type: Option<String>,
    /// Free-text delivery address.
    #[serde(default, deserialize_with = "lenient::text")]
    pub delivery_address: Option<String>,
    /// Number of trucks/containers.
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
}

impl TruckingBooking {
    /// Returns the booking as its single trucking line.
    pub fn as_line_item(&self) -> TruckingLineItem {
        TruckingLineItem {
            destination: self.delivery_address.clone(),
            truck_type: self.truck_type.clone(),
            quantity: self.quantity,
        }
    }
}

/// A trucking booking with several delivery legs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLineTruckingBooking {
    /// Booking mode (e.g. `FCL`).
    #[serde(default, deserialize_with = "lenient::text")]
    pub mode: Option<String>,
    /// The delivery legs, one per destination.
    #[serde(default)]
    pub line_items: Vec<TruckingLineItem>,
}

/// One container row on a brokerage or forwarding form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerEntry {
    /// Container size/type (e.g. `20ft`, `40HC`).
    #[serde(default, alias = "size", deserialize_with = "lenient::text")]
    pub container_size: Option<String>,
    /// Container number, when the form lists containers individually.
    #[serde(default, deserialize_with = "lenient::text")]
    pub container_number: Option<String>,
    /// Number of containers this entry stands for.
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
}

impl ContainerEntry {
    /// Returns the number of containers this entry counts for.
    ///
    /// An entry with no quantity but a container number counts as one.
    pub fn count(&self) -> u32 {
        if self.quantity > 0 {
            self.quantity
        } else if self.container_number.is_some() {
            1
        } else {
            0
        }
    }
}

/// A brokerage or forwarding booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoBooking {
    /// Booking mode (`FCL`, `LCL`, `AIR`, ...).
    #[serde(default, deserialize_with = "lenient::text")]
    pub mode: Option<String>,
    /// Container rows.
    #[serde(default)]
    pub containers: Vec<ContainerEntry>,
    /// Bill of lading (or airway bill) numbers.
    #[serde(default)]
    pub bl_numbers: Vec<String>,
    /// Explicit bill of lading count, overriding `bl_numbers` when positive.
    #[serde(default, deserialize_with = "lenient::count")]
    pub bl_count: u32,
    /// Number of document sets.
    #[serde(default, deserialize_with = "lenient::count")]
    pub document_sets: u32,
}

/// A booking as submitted by one of the service forms.
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{BookingInput, ServiceType};
///
/// let json = r#"{
///     "kind": "single_line_trucking",
///     "mode": "FCL",
///     "truckType": "10-wheeler",
///     "deliveryAddress": "Warehouse 4, Calamba",
///     "quantity": "2"
/// }"#;
///
/// let booking: BookingInput = serde_json::from_str(json).unwrap();
/// assert_eq!(booking.service_type(), ServiceType::Trucking);
/// assert_eq!(booking.mode(), Some("FCL"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingInput {
    /// Trucking booking with one delivery.
    SingleLineTrucking(TruckingBooking),
    /// Trucking booking with several delivery legs.
    MultiLineTrucking(MultiLineTruckingBooking),
    /// Customs brokerage booking.
    Brokerage(CargoBooking),
    /// Freight forwarding booking.
    Forwarding(CargoBooking),
}

impl BookingInput {
    /// Returns the service this booking shape belongs to.
    pub fn service_type(&self) -> ServiceType {
        match self {
            BookingInput::SingleLineTrucking(_) | BookingInput::MultiLineTrucking(_) => {
                ServiceType::Trucking
            }
            BookingInput::Brokerage(_) => ServiceType::Brokerage,
            BookingInput::Forwarding(_) => ServiceType::Forwarding,
        }
    }

    /// Returns the mode recorded on the booking form, if any.
    pub fn mode(&self) -> Option<&str> {
        match self {
            BookingInput::SingleLineTrucking(booking) => booking.mode.as_deref(),
            BookingInput::MultiLineTrucking(booking) => booking.mode.as_deref(),
            BookingInput::Brokerage(booking) | BookingInput::Forwarding(booking) => {
                booking.mode.as_deref()
            }
        }
    }
}

/// Lenient deserializers for user-entered form fields.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Deserializes a non-negative count, treating anything unusable as zero.
    pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(count_from_value).unwrap_or(0))
    }

    /// Deserializes optional text, treating blanks and non-text as absent.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn count_from_value(value: &Value) -> u32 {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u32::try_from(u).unwrap_or(u32::MAX)
                } else {
                    n.as_f64().map(count_from_float).unwrap_or(0)
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if let Ok(u) = trimmed.parse::<u64>() {
                    u32::try_from(u).unwrap_or(u32::MAX)
                } else {
                    trimmed.parse::<f64>().map(count_from_float).unwrap_or(0)
                }
            }
            _ => 0,
        }
    }

    fn count_from_float(f: f64) -> u32 {
        if f.is_finite() && f > 0.0 {
            // `as` saturates at u32::MAX
            f.trunc() as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_count_accepts_numbers_and_numeric_strings() {
        assert_eq!(lenient::count_from_value(&json!(3)), 3);
        assert_eq!(lenient::count_from_value(&json!("4")), 4);
        assert_eq!(lenient::count_from_value(&json!(" 5 ")), 5);
        assert_eq!(lenient::count_from_value(&json!(2.7)), 2);
        assert_eq!(lenient::count_from_value(&json!("2.0")), 2);
    }

    #[test]
    fn test_lenient_count_defaults_malformed_values_to_zero() {
        assert_eq!(lenient::count_from_value(&json!(-2)), 0);
        assert_eq!(lenient::count_from_value(&json!("abc")), 0);
        assert_eq!(lenient::count_from_value(&json!("")), 0);
        assert_eq!(lenient::count_from_value(&json!(true)), 0);
        assert_eq!(lenient::count_from_value(&json!([1, 2])), 0);
    }

    #[test]
    fn test_trucking_line_item_tolerates_missing_and_null_fields() {
        let item: TruckingLineItem =
            serde_json::from_str(r#"{"destination": null, "quantity": "x"}"#).unwrap();
        assert_eq!(item.destination, None);
        assert_eq!(item.truck_type, None);
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn test_blank_text_is_absent() {
        let item: TruckingLineItem =
            serde_json::from_str(r#"{"truckType": "   ", "destination": " Laguna "}"#).unwrap();
        assert_eq!(item.truck_type, None);
        assert_eq!(item.destination.as_deref(), Some("Laguna"));
    }

    #[test]
    fn test_container_entry_with_number_counts_as_one() {
        let entry = ContainerEntry {
            container_size: Some("20ft".to_string()),
            container_number: Some("MSKU1234567".to_string()),
            quantity: 0,
        };
        assert_eq!(entry.count(), 1);

        let empty = ContainerEntry::default();
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_container_entry_accepts_size_alias() {
        let entry: ContainerEntry = serde_json::from_str(r#"{"size": "40HC", "quantity": 2}"#).unwrap();
        assert_eq!(entry.container_size.as_deref(), Some("40HC"));
        assert_eq!(entry.count(), 2);
    }

    #[test]
    fn test_multi_line_booking_deserialization() {
        let json = r#"{
            "kind": "multi_line_trucking",
            "mode": "FCL",
            "lineItems": [
                { "destination": "Calamba", "truckType": "10-wheeler", "quantity": 1 },
                { "destination": "Batangas", "truckType": "6-wheeler", "quantity": "2" }
            ]
        }"#;

        let booking: BookingInput = serde_json::from_str(json).unwrap();
        match booking {
            BookingInput::MultiLineTrucking(ref multi) => {
                assert_eq!(multi.line_items.len(), 2);
                assert_eq!(multi.line_items[1].quantity, 2);
            }
            ref other => panic!("Expected MultiLineTrucking, got {:?}", other),
        }
        assert_eq!(booking.service_type(), ServiceType::Trucking);
    }

    #[test]
    fn test_forwarding_booking_mode() {
        let booking = BookingInput::Forwarding(CargoBooking {
            mode: Some("AIR".to_string()),
            ..Default::default()
        });
        assert_eq!(booking.mode(), Some("AIR"));
        assert_eq!(booking.service_type(), ServiceType::Forwarding);
    }

    #[test]
    fn test_unknown_booking_kind_is_rejected() {
        let result: Result<BookingInput, _> = serde_json::from_str(r#"{"kind": "warehousing"}"#);
        assert!(result.is_err());
    }
}
