//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the contract
//! rate card catalogue from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractRateMatrix, ServiceType};

use super::types::{ContractCatalog, ContractConfig};

/// Loads and provides access to the contract catalogue.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── contracts/
///     ├── ctr_acme_2026.yaml     # One contract per file
///     └── ctr_pacific_2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use rate_card_engine::config::ConfigLoader;
/// use rate_card_engine::models::ServiceType;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let contract = loader.get_contract("ctr_acme_2026").unwrap();
/// println!("Loaded contract: {}", contract.contract_number);
///
/// let matrix = loader.rate_matrix("ctr_acme_2026", ServiceType::Trucking);
/// assert!(matrix.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: ContractCatalog,
}

impl ConfigLoader {
    /// Loads every contract under `path/contracts/`.
    ///
    /// Returns an error if:
    /// - The contracts directory is missing or holds no YAML files
    /// - Any file contains invalid YAML or an unknown enum value (e.g. a unit type)
    /// - Two files declare the same contract id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let contracts_dir = path.as_ref().join("contracts");
        let files = Self::contract_files(&contracts_dir)?;

        let mut contracts = BTreeMap::new();
        for file in &files {
            let contract = Self::load_yaml::<ContractConfig>(file)?;
            if contracts.contains_key(&contract.id) {
                return Err(EngineError::ConfigParseError {
                    path: file.display().to_string(),
                    message: format!("duplicate contract id '{}'", contract.id),
                });
            }
            contracts.insert(contract.id.clone(), contract);
        }

        info!(
            contracts = contracts.len(),
            path = %contracts_dir.display(),
            "Loaded contract catalogue"
        );

        Ok(Self {
            catalog: ContractCatalog::new(contracts),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Lists the YAML files in the contracts directory, sorted by path.
    fn contract_files(contracts_dir: &Path) -> EngineResult<Vec<PathBuf>> {
        let dir_str = contracts_dir.display().to_string();

        let entries = fs::read_dir(contracts_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no contract files found)", dir_str),
            });
        }

        files.sort();
        Ok(files)
    }

    /// Returns the underlying catalogue.
    pub fn catalog(&self) -> &ContractCatalog {
        &self.catalog
    }

    /// Gets a contract by its id.
    pub fn get_contract(&self, contract_id: &str) -> EngineResult<&ContractConfig> {
        self.catalog
            .contracts()
            .get(contract_id)
            .ok_or_else(|| EngineError::ContractNotFound {
                contract_id: contract_id.to_string(),
            })
    }

    /// Returns a contract's rate matrix for a service, or `None` when either
    /// the contract or the matrix is absent.
    ///
    /// Callers treat `None` as "no rate card available" and fall back to
    /// manual billing.
    pub fn rate_matrix(
        &self,
        contract_id: &str,
        service_type: ServiceType,
    ) -> Option<&ContractRateMatrix> {
        self.catalog
            .contracts()
            .get(contract_id)
            .and_then(|contract| contract.matrix_for(service_type))
    }

    /// Gets a contract's rate matrix for a service, failing if absent.
    pub fn require_rate_matrix(
        &self,
        contract_id: &str,
        service_type: ServiceType,
    ) -> EngineResult<&ContractRateMatrix> {
        self.get_contract(contract_id)?
            .matrix_for(service_type)
            .ok_or_else(|| EngineError::RateMatrixNotFound {
                contract_id: contract_id.to_string(),
                service_type: service_type.to_string(),
            })
    }
}
