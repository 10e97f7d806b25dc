//! Error types for the Contract Rate Instantiation Engine.
//!
//! Ordinary "not applicable" outcomes (mode mismatch, zero quantity, an
//! unselected alternative) are never errors. The variants here cover
//! integrity problems: bad catalogue data, unknown contracts and invalid
//! billing lifecycle transitions.

use thiserror::Error;

use crate::models::BillingStatus;

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use rate_card_engine::error::EngineError;
///
/// let error = EngineError::ContractNotFound {
///     contract_id: "ctr_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Contract not found: ctr_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No contract with the given id exists in the catalogue.
    #[error("Contract not found: {contract_id}")]
    ContractNotFound {
        /// The contract id that was requested.
        contract_id: String,
    },

    /// The contract exists but carries no rate matrix for the service.
    #[error("Contract '{contract_id}' has no rate matrix for service '{service_type}'")]
    RateMatrixNotFound {
        /// The contract id.
        contract_id: String,
        /// The requested service type.
        service_type: String,
    },

    /// A booking could not be rated because it lacks a usable mode.
    #[error("Invalid booking: {message}")]
    InvalidBooking {
        /// A description of what made the booking unusable.
        message: String,
    },

    /// A billing item was moved backwards or sideways in its lifecycle.
    #[error("Invalid billing status transition for '{item_id}': {from} -> {to}")]
    InvalidStatusTransition {
        /// The billing item id.
        item_id: String,
        /// The current status.
        from: BillingStatus,
        /// The requested status.
        to: BillingStatus,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/contracts".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/contracts"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/contracts/bad.yaml".to_string(),
            message: "unknown variant `per_pallet`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/contracts/bad.yaml': unknown variant `per_pallet`"
        );
    }

    #[test]
    fn test_rate_matrix_not_found_displays_contract_and_service() {
        let error = EngineError::RateMatrixNotFound {
            contract_id: "ctr_001".to_string(),
            service_type: "Forwarding".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Contract 'ctr_001' has no rate matrix for service 'Forwarding'"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_statuses() {
        let error = EngineError::InvalidStatusTransition {
            item_id: "bi_001".to_string(),
            from: BillingStatus::Paid,
            to: BillingStatus::Billed,
        };
        assert_eq!(
            error.to_string(),
            "Invalid billing status transition for 'bi_001': paid -> billed"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_contract_not_found() -> EngineResult<()> {
            Err(EngineError::ContractNotFound {
                contract_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_contract_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
