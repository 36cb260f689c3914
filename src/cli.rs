//! Argument parsing and validation
//!
//! Three invocation shapes, nothing else:
//!
//! ```text
//! kbd-rgb --get        → Invocation::Get
//! kbd-rgb LEVEL        → Invocation::SetBrightness
//! kbd-rgb R G B        → Invocation::SetColor
//! ```
//!
//! Numbers are strict: ASCII digits only (no sign, no whitespace, no
//! trailing text), at least one digit, and at most 255. Values that would
//! overflow are rejected before the range check.

use std::ffi::OsString;

use crate::device::{Brightness, Color};
use crate::error::{KbdError, Result};

pub const GET_FLAG: &str = "--get";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Get,
    SetBrightness(Brightness),
    SetColor(Color),
}

impl Invocation {
    /// Classify the arguments that follow the program name
    pub fn parse(program: &str, args: &[OsString]) -> Result<Self> {
        match args {
            [single] => {
                let single = single.to_str().ok_or(KbdError::InvalidLevel)?;
                if single == GET_FLAG {
                    return Ok(Invocation::Get);
                }
                let level = parse_level(single).ok_or(KbdError::InvalidLevel)?;
                Ok(Invocation::SetBrightness(Brightness(level)))
            }
            [r, g, b] => {
                let channel = |arg: &OsString| arg.to_str().and_then(parse_level);
                match (channel(r), channel(g), channel(b)) {
                    (Some(red), Some(green), Some(blue)) => {
                        Ok(Invocation::SetColor(Color::new(red, green, blue)))
                    }
                    _ => Err(KbdError::InvalidColor),
                }
            }
            _ => Err(KbdError::Usage(usage(program))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Invocation::Get => "get",
            Invocation::SetBrightness(_) => "set-brightness",
            Invocation::SetColor(_) => "set-color",
        }
    }
}

/// Parse a decimal level in `0..=255`.
///
/// Rejects `""`, `"+5"`, `"-1"`, `" 7"`, `"12abc"`, `"256"` and anything
/// too large for a `u64`.
pub fn parse_level(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = s.parse().ok()?;
    u8::try_from(value).ok()
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} R G B   (0..255)\n  {program} LEVEL   (0..255)\n  {program} {GET_FLAG}"
    )
}
