//! Entry / dispatch
//!
//! ```text
//! authorize ──► ensure_present ──► Invocation::parse ──► lockdown ──► DeviceWriter
//!    │                │                  │                               │
//!    ▼                ▼                  ▼                               ▼
//!  exit 2           exit 3             exit 1                      exit 0 / 1
//! ```
//!
//! Each stage runs only if the previous one succeeded. An unauthorized caller
//! never reaches the existence check.

use std::ffi::OsString;
use std::io::Write;

use crate::cli::Invocation;
use crate::device::{self, ControlFs, DeviceWriter, ALLOW_GROUP};
use crate::error::Result;
use crate::security::{self, GroupDirectory, Identity};

pub struct Dispatcher<'a, D, F> {
    identity: &'a Identity,
    groups: D,
    control: F,
    lockdown: bool,
}

impl<'a, D: GroupDirectory, F: ControlFs> Dispatcher<'a, D, F> {
    /// Dispatcher for the compiled-in group, with lockdown disabled
    pub fn new(identity: &'a Identity, groups: D, control: F) -> Self {
        Self {
            identity,
            groups,
            control,
            lockdown: false,
        }
    }

    /// Drop capabilities and install the seccomp filter before device I/O
    pub fn with_lockdown(mut self, enabled: bool) -> Self {
        self.lockdown = enabled;
        self
    }

    /// Run one invocation. `args` excludes the program name.
    pub fn run(&self, program: &str, args: &[OsString], out: &mut impl Write) -> Result<Invocation> {
        security::authorize(self.identity, ALLOW_GROUP, &self.groups)?;
        device::ensure_present(&self.control)?;
        let invocation = Invocation::parse(program, args)?;

        if self.lockdown {
            security::lockdown();
        }

        tracing::debug!(operation = invocation.name(), "dispatching");
        let writer = DeviceWriter::new(&self.control, self.identity);
        match invocation {
            Invocation::Get => writer.get(out)?,
            Invocation::SetBrightness(level) => writer.set_brightness(level)?,
            Invocation::SetColor(color) => writer.set_color(color)?,
        }
        Ok(invocation)
    }
}
