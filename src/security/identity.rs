//! Process identity, captured once
//!
//! # Real vs. Effective
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  user alice (uid 1000) runs the setuid-root binary               │
//! │                                                                  │
//! │  real uid       1000   ← who invoked us (used for auth, audit)   │
//! │  effective uid  0      ← what the kernel checks for file access  │
//! │  supplementary  [27, 998, ...]  ← inherited from alice's login   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authorization only ever looks at the supplementary groups. The effective
//! uid is recorded for logging and for deciding whether the environment may
//! be trusted, never for access decisions.

use nix::errno::Errno;
use nix::unistd::{getegid, geteuid, getgid, getgroups, getuid, Gid, Uid};

/// Immutable snapshot of who is running this process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    real_uid: Uid,
    effective_uid: Uid,
    real_gid: Gid,
    effective_gid: Gid,
    /// `None` when the group list could not be enumerated
    supplementary: Option<Vec<Gid>>,
    /// Why `getgroups` failed, reported once logging is up
    groups_error: Option<Errno>,
}

impl Identity {
    /// Read the identity of the current process
    pub fn capture() -> Self {
        let (supplementary, groups_error) = match getgroups() {
            Ok(groups) => (Some(groups), None),
            Err(errno) => (None, Some(errno)),
        };

        Self {
            real_uid: getuid(),
            effective_uid: geteuid(),
            real_gid: getgid(),
            effective_gid: getegid(),
            supplementary,
            groups_error,
        }
    }

    /// Build an identity by hand (tests, embedding). Real and effective gid
    /// both take the user-private-group id matching `real_uid`.
    pub fn new(real_uid: Uid, effective_uid: Uid, supplementary: Option<Vec<Gid>>) -> Self {
        let gid = Gid::from_raw(real_uid.as_raw());
        Self {
            real_uid,
            effective_uid,
            real_gid: gid,
            effective_gid: gid,
            supplementary,
            groups_error: None,
        }
    }

    /// Identity whose group enumeration failed with `errno`
    pub fn without_groups(real_uid: Uid, effective_uid: Uid, errno: Errno) -> Self {
        Self {
            groups_error: Some(errno),
            ..Self::new(real_uid, effective_uid, None)
        }
    }

    pub fn real_uid(&self) -> Uid {
        self.real_uid
    }

    pub fn effective_uid(&self) -> Uid {
        self.effective_uid
    }

    pub fn supplementary_groups(&self) -> Option<&[Gid]> {
        self.supplementary.as_deref()
    }

    pub fn groups_error(&self) -> Option<Errno> {
        self.groups_error
    }

    /// True when running with someone else's privileges (setuid/setgid)
    pub fn is_elevated(&self) -> bool {
        self.real_uid != self.effective_uid || self.real_gid != self.effective_gid
    }
}
