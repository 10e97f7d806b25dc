//! Normalized booking quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::UnitType;

/// User choices that disambiguate mutually exclusive rate alternatives,
/// keyed by selection key (e.g. `truckType -> 10-wheeler`).
pub type Selections = BTreeMap<String, String>;

/// Normalized billable counts derived from a booking.
///
/// Absent or zero fields mean "no billable quantity of that unit type".
///
/// # Example
///
/// ```
/// use rate_card_engine::models::{BookingQuantities, UnitType};
///
/// let quantities = BookingQuantities {
///     containers: 3,
///     shipments: 1,
///     ..Default::default()
/// };
/// assert_eq!(quantities.quantity_for(UnitType::PerContainer, None), 3);
/// assert_eq!(quantities.quantity_for(UnitType::PerBl, None), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuantities {
    /// Total containers (or trucks) on the booking.
    #[serde(default)]
    pub containers: u32,
    /// Containers split by size/type (e.g. `20ft`, `40HC`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub containers_by_size: BTreeMap<String, u32>,
    /// Number of shipments.
    #[serde(default)]
    pub shipments: u32,
    /// Number of bills of lading.
    #[serde(default)]
    pub bls: u32,
    /// Number of document sets.
    #[serde(default)]
    pub sets: u32,
}

impl BookingQuantities {
    /// Returns the count a row of the given unit type bills.
    ///
    /// A `per_container` row restricted to a container size only counts
    /// containers of that size (matched case-insensitively).
    pub fn quantity_for(&self, unit_type: UnitType, container_size: Option<&str>) -> u32 {
        match unit_type {
            UnitType::PerContainer => match container_size {
                Some(size) => self
                    .containers_by_size
                    .iter()
                    .filter(|(key, _)| key.trim().eq_ignore_ascii_case(size.trim()))
                    .fold(0u32, |total, (_, count)| total.saturating_add(*count)),
                None => self.containers,
            },
            UnitType::PerShipment => self.shipments,
            UnitType::PerBl => self.bls,
            UnitType::PerSet => self.sets,
        }
    }

    /// Returns true if every count is zero.
    pub fn is_empty(&self) -> bool {
        self.containers == 0 && self.shipments == 0 && self.bls == 0 && self.sets == 0
    }
}
