//! Authorization: is the invoking user in the allowed group?
//!
//! # Algorithm
//!
//! ```text
//!   ALLOW_GROUP ──getgrnam──► gid ─┐
//!                                  ├──► gid ∈ groups ?  ──► allowed
//!   Identity.supplementary ────────┘
//! ```
//!
//! Any lookup failure (unknown group, NSS error, failed `getgroups`) counts
//! as "not a member". The effective uid plays no part: a setuid-root process
//! still carries the invoking user's supplementary groups, and those are the
//! only thing checked.

use nix::unistd::{Gid, Group};

use super::identity::Identity;
use crate::error::{KbdError, Result};

/// Resolves a group name to its id
pub trait GroupDirectory {
    fn resolve(&self, name: &str) -> Option<Gid>;
}

impl<T: GroupDirectory + ?Sized> GroupDirectory for &T {
    fn resolve(&self, name: &str) -> Option<Gid> {
        (**self).resolve(name)
    }
}

/// The system group database (`/etc/group`, NSS)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGroups;

impl GroupDirectory for SystemGroups {
    fn resolve(&self, name: &str) -> Option<Gid> {
        match Group::from_name(name) {
            Ok(Some(group)) => Some(group.gid),
            Ok(None) => None,
            Err(errno) => {
                tracing::debug!(group = name, error = %errno, "group lookup failed");
                None
            }
        }
    }
}

/// Is `identity` a member of `group`, judged by supplementary groups alone?
pub fn is_member(identity: &Identity, group: &str, directory: &impl GroupDirectory) -> bool {
    let Some(gid) = directory.resolve(group) else {
        return false;
    };
    identity
        .supplementary_groups()
        .map_or(false, |groups| groups.contains(&gid))
}

/// Fail with [`KbdError::AuthorizationDenied`] unless the invoking user is in `group`
pub fn authorize(
    identity: &Identity,
    group: &'static str,
    directory: &impl GroupDirectory,
) -> Result<()> {
    if let Some(errno) = identity.groups_error() {
        tracing::debug!(error = %errno, "getgroups failed");
    }

    let allowed = is_member(identity, group, directory);
    tracing::debug!(
        real_uid = identity.real_uid().as_raw(),
        effective_uid = identity.effective_uid().as_raw(),
        group,
        allowed,
        "authorization check"
    );

    if allowed {
        Ok(())
    } else {
        Err(KbdError::AuthorizationDenied { group })
    }
}
