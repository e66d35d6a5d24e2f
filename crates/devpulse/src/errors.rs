//! Error handling and exit codes.

use devpulse_core::constants::exit_codes;
use devpulse_core::error::{DashError, FetchError};

/// Exit code for a dashboard error.
pub fn handle_error(err: &DashError) -> i32 {
    match err {
        DashError::Export(_) => exit_codes::ERROR_IO,
        DashError::Fetch(FetchError::Cancelled) | DashError::Cancelled => {
            exit_codes::ERROR_CANCELED
        }
        DashError::Fetch(FetchError::Timeout(_)) => exit_codes::ERROR_TIMEOUT,
        DashError::Fetch(_) => exit_codes::ERROR_GENERIC,
        DashError::UnknownMetric(_) | DashError::UnknownTable(_) | DashError::Config(_) => {
            exit_codes::ERROR_CONFIG
        }
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(dash) = err.downcast_ref::<DashError>() {
        handle_error(dash)
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        exit_codes::ERROR_IO
    } else {
        exit_codes::ERROR_GENERIC
    }
}
