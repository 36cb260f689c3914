//! Keyboard backlight control files
//!
//! - `target` - the two compiled-in control files
//! - `payload` - validated values and their on-disk format
//! - `control` - filesystem seam (`ControlFs`) and the sysfs implementation
//! - `writer` - get / set color / set brightness

pub mod control;
pub mod payload;
pub mod target;
pub mod writer;

pub use control::{ControlFs, SysfsControl};
pub use payload::{Brightness, Color};
pub use target::{ControlTarget, ALLOW_GROUP, BRIGHTNESS_PATH, COLOR_PATH};
pub use writer::DeviceWriter;

use crate::error::{KbdError, Result};

/// Confirm both control files exist, color first. Uses a metadata query,
/// never an open.
pub fn ensure_present(control: &impl ControlFs) -> Result<()> {
    for target in ControlTarget::ALL {
        control
            .probe(target)
            .map_err(|source| KbdError::DeviceMissing {
                path: target.path(),
                source,
            })?;
    }
    Ok(())
}
