//! Capability narrowing for the setuid helper
//!
//! A setuid-root binary starts with every capability in its permitted and
//! effective sets. Writing two root-owned sysfs files needs at most
//! `CAP_DAC_OVERRIDE`, so everything else is dropped before any device I/O.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Permitted (P)    │ Maximum caps this process CAN have            │
//! ├───────────────────┼───────────────────────────────────────────────┤
//! │  Effective (E)    │ Caps currently ACTIVE right now               │
//! ├───────────────────┼───────────────────────────────────────────────┤
//! │  Bounding (B)     │ Absolute limit across exec                    │
//! └───────────────────┴───────────────────────────────────────────────┘
//!
//!   exec(setuid root)      P = E = ALL
//!   CapabilityDropper      P = E = { CAP_DAC_OVERRIDE }
//! ```

use std::io;

use caps::{CapSet, Capability};

// ═══════════════════════════════════════════════════════════════════════════
// CapabilityDropper
// ═══════════════════════════════════════════════════════════════════════════
// WHAT IT IS:
//   A list of capabilities to remove from the current process.
//
// USAGE:
//   Call after arguments are validated and before the control file is
//   opened. Dropping is irreversible.
// ═══════════════════════════════════════════════════════════════════════════

pub struct CapabilityDropper {
    caps_to_drop: Vec<Capability>,
}

impl CapabilityDropper {
    pub fn new() -> Self {
        Self {
            caps_to_drop: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // for_control_writes() - Everything except CAP_DAC_OVERRIDE
    // ═══════════════════════════════════════════════════════════════════════
    // CAP_DAC_OVERRIDE covers a control file whose owner or mode was changed
    // by a udev rule. Nothing else is needed to open, read and write it.
    // ═══════════════════════════════════════════════════════════════════════
    pub fn for_control_writes() -> Self {
        let mut dropper = Self::new();
        let mut all: Vec<Capability> = caps::all()
            .into_iter()
            .filter(|cap| *cap != Capability::CAP_DAC_OVERRIDE)
            .collect();
        all.sort_by_key(|cap| cap.index());
        for cap in all {
            dropper.drop_cap(cap);
        }
        dropper
    }

    pub fn drop_cap(&mut self, cap: Capability) -> &mut Self {
        self.caps_to_drop.push(cap);
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // apply() - Drop from bounding, effective and permitted sets
    // ═══════════════════════════════════════════════════════════════════════
    // ORDER:
    //   1. Bounding, for every cap, while CAP_SETPCAP is still held. Fails
    //      for caps the running kernel does not know; those are ignored.
    //   2. Effective, then permitted. The kernel rejects a permitted set
    //      that no longer covers the effective set.
    // ═══════════════════════════════════════════════════════════════════════
    pub fn apply(&self) -> Result<(), io::Error> {
        for &cap in &self.caps_to_drop {
            let _ = caps::drop(None, CapSet::Bounding, cap);
        }

        for &cap in &self.caps_to_drop {
            caps::drop(None, CapSet::Effective, cap)
                .map_err(|e| io::Error::new(io::ErrorKind::PermissionDenied, e.to_string()))?;

            caps::drop(None, CapSet::Permitted, cap)
                .map_err(|e| io::Error::new(io::ErrorKind::PermissionDenied, e.to_string()))?;
        }

        Ok(())
    }

    pub fn drop_count(&self) -> usize {
        self.caps_to_drop.len()
    }

    /// Names of the capabilities being dropped (for logging)
    pub fn caps_being_dropped(&self) -> Vec<String> {
        self.caps_to_drop.iter().map(|cap| cap.to_string()).collect()
    }
}
