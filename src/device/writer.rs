//! The three device operations
//!
//! Each operation opens exactly one control file, performs a single `read`
//! or `write` syscall, and closes the handle before returning on every path.
//! Nothing is retried. A write that lands fewer bytes than formatted is an
//! error even though the kernel has already accepted part of it.

use std::io::{Read, Write};

use super::control::ControlFs;
use super::payload::{Brightness, Color};
use super::target::ControlTarget;
use crate::error::{KbdError, Result};
use crate::security::Identity;

/// Upper bound for a `--get` read
pub const READ_LIMIT: usize = 127;

pub struct DeviceWriter<'a, F> {
    control: F,
    identity: &'a Identity,
}

impl<'a, F: ControlFs> DeviceWriter<'a, F> {
    pub fn new(control: F, identity: &'a Identity) -> Self {
        Self { control, identity }
    }

    /// Copy the color file's current contents, unmodified, to `out`
    pub fn get(&self, out: &mut impl Write) -> Result<()> {
        let target = ControlTarget::Color;
        let mut buf = [0u8; READ_LIMIT];

        let n = {
            let mut file = self
                .control
                .open_read(target)
                .map_err(|e| KbdError::io("open", target.path(), e))?;
            file.read(&mut buf)
                .map_err(|e| KbdError::io("read", target.path(), e))?
        };

        tracing::info!(
            real_uid = self.identity.real_uid().as_raw(),
            control = target.name(),
            bytes = n,
            "read control file"
        );

        out.write_all(&buf[..n]).map_err(KbdError::Output)?;
        out.flush().map_err(KbdError::Output)
    }

    pub fn set_color(&self, color: Color) -> Result<()> {
        self.write_payload(ControlTarget::Color, color.payload().as_bytes())
    }

    pub fn set_brightness(&self, level: Brightness) -> Result<()> {
        self.write_payload(ControlTarget::Brightness, level.payload().as_bytes())
    }

    fn write_payload(&self, target: ControlTarget, payload: &[u8]) -> Result<()> {
        let written = {
            let mut file = self
                .control
                .open_write(target)
                .map_err(|e| KbdError::io("open", target.path(), e))?;
            file.write(payload)
                .map_err(|e| KbdError::io("write", target.path(), e))?
        };

        if written != payload.len() {
            tracing::warn!(
                control = target.name(),
                written,
                expected = payload.len(),
                "short write"
            );
            return Err(KbdError::ShortWrite {
                path: target.path(),
                written,
                expected: payload.len(),
            });
        }

        tracing::info!(
            real_uid = self.identity.real_uid().as_raw(),
            control = target.name(),
            bytes = written,
            "wrote control file"
        );
        Ok(())
    }
}
