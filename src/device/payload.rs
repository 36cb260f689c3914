//! Validated values and the exact bytes written for them
//!
//! A `u8` already spans 0..=255, so a [`Color`] or [`Brightness`] is in range
//! by construction. Formatting is plain decimal with no padding or sign.

/// Keyboard backlight color, one intensity per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Bytes for the color control file: `"R G B\n"`
    pub fn payload(&self) -> String {
        format!("{} {} {}\n", self.red, self.green, self.blue)
    }
}

/// Keyboard backlight brightness level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness(pub u8);

impl Brightness {
    /// Bytes for the brightness control file: `"LEVEL\n"`
    pub fn payload(&self) -> String {
        format!("{}\n", self.0)
    }
}
