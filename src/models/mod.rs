//! Core data models for the Contract Rate Instantiation Engine.
//!
//! This module contains the rate card, booking, quantity, applied-rate and
//! billing-item types used throughout the engine.

mod applied_rate;
mod billing_item;
mod booking;
mod quantities;
mod rate_matrix;

pub use applied_rate::{AppliedRate, AuditStep, AuditTrace, AuditWarning, RateInstantiationResult};
pub use billing_item::{BillingItem, BillingSourceType, BillingStatus};
pub use booking::{
    BookingInput, CargoBooking, ContainerEntry, MultiLineTruckingBooking, TruckingBooking,
    TruckingLineItem,
};
pub use quantities::{BookingQuantities, Selections};
pub use rate_matrix::{ContractRateMatrix, ContractRateRow, ServiceType, UnitType};
