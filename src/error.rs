//! Error taxonomy and process exit codes
//!
//! Every failure is terminal for the invocation. The `Display` output of a
//! [`KbdError`] is the one-line diagnostic printed on stderr, and
//! [`KbdError::exit_code`] is what calling scripts branch on.
//!
//! ```text
//! ┌──────────────────────┬──────┬──────────────────────────────────────┐
//! │ Category             │ Exit │ Variants                             │
//! ├──────────────────────┼──────┼──────────────────────────────────────┤
//! │ success              │  0   │ -                                    │
//! │ InvalidInput         │  1   │ Usage, InvalidLevel, InvalidColor    │
//! │ IOFailure            │  1   │ Io, ShortWrite, Output               │
//! │ AuthorizationDenied  │  2   │ AuthorizationDenied                  │
//! │ DeviceMissing        │  3   │ DeviceMissing                        │
//! └──────────────────────┴──────┴──────────────────────────────────────┘
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_UNAUTHORIZED: i32 = 2;
pub const EXIT_DEVICE_MISSING: i32 = 3;

/// Coarse class of a failure, used for exit codes and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthorizationDenied,
    DeviceMissing,
    InvalidInput,
    IoFailure,
}

#[derive(Error, Debug)]
pub enum KbdError {
    #[error("Not allowed. Add your user to group '{group}'.")]
    AuthorizationDenied { group: &'static str },

    #[error("Missing sysfs node: {} ({source})", .path.display())]
    DeviceMissing {
        path: &'static Path,
        #[source]
        source: io::Error,
    },

    /// Wrong argument count or shape; carries the rendered usage text
    #[error("{0}")]
    Usage(String),

    #[error("Invalid value. Use integer 0..255.")]
    InvalidLevel,

    #[error("Invalid values. Use integers 0..255.")]
    InvalidColor,

    #[error("{op}({}) failed: {source}", .path.display())]
    Io {
        op: &'static str,
        path: &'static Path,
        #[source]
        source: io::Error,
    },

    #[error("write({}) failed: short write ({written} of {expected} bytes)", .path.display())]
    ShortWrite {
        path: &'static Path,
        written: usize,
        expected: usize,
    },

    #[error("writing to stdout failed: {0}")]
    Output(#[source] io::Error),
}

impl KbdError {
    pub fn io(op: &'static str, path: &'static Path, source: io::Error) -> Self {
        Self::Io { op, path, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthorizationDenied { .. } => ErrorKind::AuthorizationDenied,
            Self::DeviceMissing { .. } => ErrorKind::DeviceMissing,
            Self::Usage(_) | Self::InvalidLevel | Self::InvalidColor => ErrorKind::InvalidInput,
            Self::Io { .. } | Self::ShortWrite { .. } | Self::Output(_) => ErrorKind::IoFailure,
        }
    }

    /// Process exit status for this failure. I/O failures share the
    /// invalid-input status.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::AuthorizationDenied => EXIT_UNAUTHORIZED,
            ErrorKind::DeviceMissing => EXIT_DEVICE_MISSING,
            ErrorKind::InvalidInput | ErrorKind::IoFailure => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, KbdError>;
