//! Configuration loading for the rate card catalogue.
//!
//! This module loads contract quotations and their rate matrices from YAML
//! files. It stands in for the contract store: given a contract id it returns
//! that contract's rate matrix, or nothing.
//!
//! # Example
//!
//! ```no_run
//! use rate_card_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config").unwrap();
//! println!("Loaded {} contracts", loader.catalog().contracts().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ContractCatalog, ContractConfig};
