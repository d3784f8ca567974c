// libpcd/src/error.rs

use thiserror::Error;

use crate::protocol::exchange::TransceiveStatus;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// The host-supplied register bus failed.
    #[error("bus error: {0}")]
    Bus(String),

    /// A builder was asked for a reader without a register bus.
    #[error("no register bus configured")]
    BusNotConfigured,

    #[error("usage error: {0}")]
    Usage(String),

    #[error("value {value} does not fit in {width} byte(s)")]
    OutOfRange { value: i128, width: usize },

    #[error("frame of {len} bytes exceeds FIFO size of {max} bytes")]
    FrameTooLong { len: usize, max: usize },

    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("no card protocol selected")]
    UndefinedProtocol,

    #[error("PICC did not respond")]
    PiccTimeout,

    #[error("PCD timed out waiting for command completion")]
    PcdTimeout,

    #[error("CRC mismatch on received data")]
    IncorrectCrc,

    #[error("unresolved collision")]
    Collision,

    #[error("communication error: {0}")]
    Communication(TransceiveStatus),

    #[error("unexpected data: {0}")]
    UnexpectedData(String),

    #[error("UID still incomplete after {rounds} anticollision rounds")]
    IncompleteUid { rounds: usize },
}

impl Error {
    /// Hardware or card interaction failures. Callers may retry
    /// request/select from scratch on these.
    pub fn is_communication(&self) -> bool {
        matches!(
            self,
            Error::PiccTimeout
                | Error::PcdTimeout
                | Error::IncorrectCrc
                | Error::Collision
                | Error::Communication(_)
        )
    }

    /// Precondition violations by the caller. Never worth retrying.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Usage(_) | Error::OutOfRange { .. } | Error::FrameTooLong { .. }
        )
    }
}

impl From<TransceiveStatus> for Error {
    fn from(status: TransceiveStatus) -> Self {
        match status {
            TransceiveStatus::PiccTimeout => Error::PiccTimeout,
            TransceiveStatus::PcdTimeout => Error::PcdTimeout,
            TransceiveStatus::CrcError => Error::IncorrectCrc,
            other => Error::Communication(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
