//! Configuration types for the rate card catalogue.
//!
//! Contracts are stored as YAML files, one contract per file. The contract
//! envelope uses snake_case keys; the rate matrices inside keep the camelCase
//! shape shared with the rest of the ERP.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::{ContractRateMatrix, ServiceType};

/// A contract-type quotation and its rate cards.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Unique identifier for the contract.
    pub id: String,
    /// Human-facing contract number (e.g. `CTR-2026-001`).
    pub contract_number: String,
    /// The customer the contract was negotiated with.
    #[serde(default)]
    pub customer: Option<String>,
    /// One rate matrix per service the contract covers.
    #[serde(default)]
    pub matrices: Vec<ContractRateMatrix>,
}

impl ContractConfig {
    /// Returns the contract's rate matrix for a service, if it has one.
    pub fn matrix_for(&self, service_type: ServiceType) -> Option<&ContractRateMatrix> {
        self.matrices
            .iter()
            .find(|matrix| matrix.service_type == service_type)
    }
}

/// The complete catalogue of loaded contracts, keyed by contract id.
#[derive(Debug, Clone, Default)]
pub struct ContractCatalog {
    contracts: BTreeMap<String, ContractConfig>,
}

impl ContractCatalog {
    /// Creates a catalogue from already-validated contracts.
    pub fn new(contracts: BTreeMap<String, ContractConfig>) -> Self {
        Self { contracts }
    }

    /// Returns every contract, ordered by id.
    pub fn contracts(&self) -> &BTreeMap<String, ContractConfig> {
        &self.contracts
    }
}
