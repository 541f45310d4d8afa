//! Virtual driver board error types.

use pinhub_domain::error::{PinHubError, UnavailableError};
use pinhub_domain::id::CoilNumber;

/// Errors specific to the virtual driver board.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// The board has been taken offline.
    #[error("virtual driver board offline, cannot drive coil {coil}")]
    Offline { coil: CoilNumber },

    /// The coil is not wired to any driver on this board.
    #[error("coil {coil} is not wired to the virtual driver board")]
    Unwired { coil: CoilNumber },
}

impl VirtualError {
    /// Convert into a [`PinHubError::Unavailable`] for propagation across
    /// port boundaries.
    pub fn into_domain(self) -> PinHubError {
        match self {
            Self::Offline { coil } => UnavailableError {
                coil,
                reason: "driver board offline",
            }
            .into(),
            Self::Unwired { coil } => UnavailableError {
                coil,
                reason: "coil not wired",
            }
            .into(),
        }
    }
}

impl From<VirtualError> for PinHubError {
    fn from(err: VirtualError) -> Self {
        err.into_domain()
    }
}
