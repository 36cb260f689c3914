//! The two control files this binary may ever touch
//!
//! Paths are baked in at build time (see `build.rs`) and reached only through
//! [`ControlTarget`]. There is no constructor that takes a caller-supplied
//! path; adding one means adding a variant here.
//!
//! ```text
//! /sys/class/leds/rgb::kbd_backlight/   ← KBD_RGB_SYSFS_DIR
//! ├── multi_intensity                   ← ControlTarget::Color      "R G B\n"
//! └── brightness                        ← ControlTarget::Brightness "LEVEL\n"
//! ```

use std::path::Path;

/// LED class directory holding both control files
pub const SYSFS_DIR: &str = env!("KBD_RGB_SYSFS_DIR");

/// Color control file (multi-intensity triple)
pub const COLOR_PATH: &str = concat!(env!("KBD_RGB_SYSFS_DIR"), "/multi_intensity");

/// Brightness control file (single level)
pub const BRIGHTNESS_PATH: &str = concat!(env!("KBD_RGB_SYSFS_DIR"), "/brightness");

/// Group whose members may use this binary
pub const ALLOW_GROUP: &str = env!("KBD_RGB_GROUP");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlTarget {
    Color,
    Brightness,
}

impl ControlTarget {
    /// Both targets, in the order the existence guard checks them
    pub const ALL: [ControlTarget; 2] = [ControlTarget::Color, ControlTarget::Brightness];

    pub fn path(self) -> &'static Path {
        match self {
            ControlTarget::Color => Path::new(COLOR_PATH),
            ControlTarget::Brightness => Path::new(BRIGHTNESS_PATH),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlTarget::Color => "color",
            ControlTarget::Brightness => "brightness",
        }
    }
}
