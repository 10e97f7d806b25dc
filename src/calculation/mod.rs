//! Calculation logic for the Contract Rate Instantiation Engine.
//!
//! This module contains the pure, synchronous pricing core: mode column
//! resolution, quantity and selection extraction from bookings, rate
//! instantiation with tiering and selection groups, per-destination trucking
//! billing, and the bridge from applied rates to ledger billing items.

mod billing_bridge;
mod mode_column;
mod multi_line_trucking;
mod quantity_extractor;
mod rate_instantiation;

pub use billing_bridge::{
    BillingContext, describe_applied_rate, generate_rate_card_billing_items,
    has_existing_rate_card_billing, rate_card_total,
};
pub use mode_column::{resolve_mode_column, resolve_unit_rate};
pub use multi_line_trucking::{
    calculate_multi_line_trucking_billing, calculate_multi_line_trucking_billing_with_audit,
};
pub use quantity_extractor::{
    DESTINATION_SELECTION_KEY, LineRatingInput, TRUCK_TYPE_SELECTION_KEY,
    derive_quantities_from_booking, extract_multi_line_selections_and_quantities,
    extract_trucking_selections, is_multi_line, normalize_trucking_line_items,
    quantities_for_line_item,
};
pub use rate_instantiation::{
    INCOMPLETE_SELECTION_ROW, ROW_WITHOUT_PRICING, TierSplit, instantiate_rates,
    instantiate_rates_with_audit, split_tiers,
};
