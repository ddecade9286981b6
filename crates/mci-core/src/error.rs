//! Engine error type.
//!
//! Only cross-reference lookups can fail: allocation and estimation logic is
//! pure pointwise arithmetic over total maps and cannot error.  A failed
//! lookup means the exercise-state tree is corrupted, so the error is
//! propagated to the tick driver, which halts further simulation of the
//! affected region rather than continuing on bad data.

use thiserror::Error;

use crate::{RegionId, ResponderGroupId, TransferPointId, VehicleId};

/// The shared error type for all `mci-*` crates.
#[derive(Debug, Error)]
pub enum MciError {
    #[error("region {0} not found")]
    RegionNotFound(RegionId),

    #[error("no transfer point inside region {region}")]
    MissingTransferPoint { region: RegionId },

    #[error("transfer point {0} not found")]
    TransferPointNotFound(TransferPointId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("responder group {0} not found")]
    ResponderGroupNotFound(ResponderGroupId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `mci-*` crates.
pub type MciResult<T> = Result<T, MciError>;
