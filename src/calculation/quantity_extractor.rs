//! Booking quantity and selection extraction.
//!
//! This module turns a [`BookingInput`] into the canonical [`BookingQuantities`]
//! the engine multiplies, and infers which selection-group alternative a
//! trucking booking picked. Extraction is lenient: form data is user-entered
//! and may be incomplete, so anything missing counts as zero rather than
//! failing.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{
    BookingInput, BookingQuantities, CargoBooking, ContractRateMatrix, ContractRateRow,
    Selections, ServiceType, TruckingLineItem,
};

/// Selection key matched against a booking's truck type.
pub const TRUCK_TYPE_SELECTION_KEY: &str = "truckType";

/// Selection key matched against a booking's delivery destination.
pub const DESTINATION_SELECTION_KEY: &str = "destination";

/// The rating inputs derived for one trucking line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRatingInput {
    /// The trucking line the inputs were derived from.
    pub line: TruckingLineItem,
    /// The alternatives this line selects, or `None` if no grouped rows exist.
    pub selections: Option<Selections>,
    /// The line's own quantities.
    pub quantities: BookingQuantities,
}

/// Derives normalized quantities from a booking for the given service.
///
/// A booking whose shape belongs to a different service than `service_type`
/// has nothing billable under that service and yields all-zero quantities.
///
/// # Examples
///
/// ```
/// use rate_card_engine::calculation::derive_quantities_from_booking;
/// use rate_card_engine::models::{BookingInput, ServiceType, TruckingBooking};
///
/// let booking = BookingInput::SingleLineTrucking(TruckingBooking {
///     mode: Some("FCL".to_string()),
///     truck_type: Some("10-wheeler".to_string()),
///     delivery_address: Some("Calamba".to_string()),
///     quantity: 2,
/// });
///
/// let quantities = derive_quantities_from_booking(&booking, ServiceType::Trucking);
/// assert_eq!(quantities.containers, 2);
/// assert_eq!(quantities.shipments, 1);
///
/// let other = derive_quantities_from_booking(&booking, ServiceType::Brokerage);
/// assert!(other.is_empty());
/// ```
pub fn derive_quantities_from_booking(
    booking: &BookingInput,
    service_type: ServiceType,
) -> BookingQuantities {
    if booking.service_type() != service_type {
        debug!(
            booking_service = %booking.service_type(),
            requested_service = %service_type,
            "Booking shape does not match service; no billable quantities"
        );
        return BookingQuantities::default();
    }

    match booking {
        BookingInput::SingleLineTrucking(single) => {
            quantities_from_line_items(std::slice::from_ref(&single.as_line_item()))
        }
        BookingInput::MultiLineTrucking(multi) => quantities_from_line_items(&multi.line_items),
        BookingInput::Brokerage(cargo) | BookingInput::Forwarding(cargo) => {
            quantities_from_cargo(cargo)
        }
    }
}

/// Derives the quantities billed for a single trucking line.
pub fn quantities_for_line_item(line: &TruckingLineItem) -> BookingQuantities {
    quantities_from_line_items(std::slice::from_ref(line))
}

fn quantities_from_line_items(lines: &[TruckingLineItem]) -> BookingQuantities {
    let containers = lines
        .iter()
        .fold(0u32, |total, line| total.saturating_add(line.quantity));

    BookingQuantities {
        containers,
        shipments: u32::from(containers > 0),
        ..Default::default()
    }
}

fn quantities_from_cargo(cargo: &CargoBooking) -> BookingQuantities {
    let mut quantities = BookingQuantities::default();

    for entry in &cargo.containers {
        let count = entry.count();
        if count == 0 {
            continue;
        }
        quantities.containers = quantities.containers.saturating_add(count);
        if let Some(size) = &entry.container_size {
            // Sizes differing only by case share the first spelling seen
            let size = size.trim();
            let key = quantities
                .containers_by_size
                .keys()
                .find(|existing| existing.eq_ignore_ascii_case(size))
                .cloned()
                .unwrap_or_else(|| size.to_string());
            let slot = quantities.containers_by_size.entry(key).or_insert(0);
            *slot = slot.saturating_add(count);
        }
    }

    quantities.bls = if cargo.bl_count > 0 {
        cargo.bl_count
    } else {
        let distinct: BTreeSet<&str> = cargo
            .bl_numbers
            .iter()
            .map(|number| number.trim())
            .filter(|number| !number.is_empty())
            .collect();
        u32::try_from(distinct.len()).unwrap_or(u32::MAX)
    };

    quantities.sets = cargo.document_sets;
    quantities.shipments =
        u32::from(quantities.containers > 0 || quantities.bls > 0 || quantities.sets > 0);

    quantities
}

/// Infers which selection-group alternatives a trucking booking picked.
///
/// Only trucking matrices are inspected. Returns `None` when they contain no
/// selection-group rows, meaning no filtering is needed. Otherwise the
/// booking's truck type is matched case-insensitively against `truckType`
/// rows and its destination is searched for `destination` row values, the
/// longest matching value winning. Each match records the row's own
/// `selectionValue`, so the engine's exact comparison succeeds.
pub fn extract_trucking_selections(
    booking_fields: &TruckingLineItem,
    matrices: &[ContractRateMatrix],
) -> Option<Selections> {
    let grouped: Vec<&ContractRateRow> = matrices
        .iter()
        .filter(|matrix| matrix.service_type == ServiceType::Trucking)
        .flat_map(|matrix| matrix.grouped_rows())
        .collect();

    if grouped.is_empty() {
        return None;
    }

    let mut selections = Selections::new();

    for key in [TRUCK_TYPE_SELECTION_KEY, DESTINATION_SELECTION_KEY] {
        let booking_value = match key {
            TRUCK_TYPE_SELECTION_KEY => booking_fields.truck_type.as_deref(),
            _ => booking_fields.destination.as_deref(),
        };
        let Some(booking_value) = booking_value else {
            continue;
        };
        let booking_value = booking_value.trim().to_lowercase();

        let best = grouped
            .iter()
            .filter(|row| row.selection_key.as_deref() == Some(key))
            .filter_map(|row| row.selection_value.as_deref())
            .filter(|value| {
                let candidate = value.trim().to_lowercase();
                !candidate.is_empty()
                    && if key == TRUCK_TYPE_SELECTION_KEY {
                        candidate == booking_value
                    } else {
                        booking_value.contains(&candidate)
                    }
            })
            .fold(None::<&str>, |best, value| match best {
                Some(current) if current.trim().len() >= value.trim().len() => Some(current),
                _ => Some(value),
            });

        if let Some(value) = best {
            selections.insert(key.to_string(), value.to_string());
        }
    }

    Some(selections)
}

/// Returns the booking's trucking lines.
///
/// Single-line bookings yield one line; non-trucking bookings yield none.
pub fn normalize_trucking_line_items(booking: &BookingInput) -> Vec<TruckingLineItem> {
    match booking {
        BookingInput::SingleLineTrucking(single) => vec![single.as_line_item()],
        BookingInput::MultiLineTrucking(multi) => multi.line_items.clone(),
        BookingInput::Brokerage(_) | BookingInput::Forwarding(_) => Vec::new(),
    }
}

/// Returns true if the booking has more than one trucking line.
pub fn is_multi_line(booking: &BookingInput) -> bool {
    normalize_trucking_line_items(booking).len() > 1
}

/// Derives selections and quantities for every trucking line.
pub fn extract_multi_line_selections_and_quantities(
    line_items: &[TruckingLineItem],
    matrices: &[ContractRateMatrix],
) -> Vec<LineRatingInput> {
    line_items
        .iter()
        .map(|line| LineRatingInput {
            line: line.clone(),
            selections: extract_trucking_selections(line, matrices),
            quantities: quantities_for_line_item(line),
        })
        .collect()
}
