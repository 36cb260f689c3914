//! Trust boundary of the setuid helper
//!
//! - `identity` - real vs. effective identity, captured once at startup
//! - `auth` - group-membership gate on the real user
//! - `capabilities` / `seccomp` - privilege narrowing before device I/O
//!
//! # Order
//!
//! ```text
//! Identity::capture ──► authorize ──► (guard, parse) ──► lockdown ──► device I/O
//! ```

pub mod auth;
pub mod capabilities;
pub mod identity;
pub mod seccomp;

pub use auth::{authorize, is_member, GroupDirectory, SystemGroups};
pub use capabilities::CapabilityDropper;
pub use identity::Identity;
pub use seccomp::ControlSeccomp;

/// Drop capabilities, then install the seccomp filter.
///
/// Both steps are attempted; failures are logged and do not abort. The group
/// check has already passed by the time this runs.
pub fn lockdown() {
    let dropper = CapabilityDropper::for_control_writes();
    match dropper.apply() {
        Ok(()) => tracing::debug!(
            dropped = ?dropper.caps_being_dropped(),
            "capabilities dropped"
        ),
        Err(e) => tracing::warn!(error = %e, "could not drop capabilities"),
    }

    let filter = ControlSeccomp::with_control_defaults();
    match filter.apply() {
        Ok(()) => tracing::debug!(allowed = filter.allowed_count(), "seccomp filter installed"),
        Err(e) => tracing::warn!(error = %e, "could not install seccomp filter"),
    }
}
