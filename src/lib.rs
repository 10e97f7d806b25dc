//! Contract Rate Instantiation Engine
//!
//! This crate turns a customer contract's rate card and a logistics booking
//! (trucking, customs brokerage or freight forwarding) into computed,
//! auditable charge lines, and converts those lines into ledger billing items.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
