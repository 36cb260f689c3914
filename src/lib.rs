//! kbd-rgb - setuid helper for the keyboard backlight
//!
//! Lets members of one group set the keyboard backlight color and brightness
//! through two fixed sysfs files, and read the current color back.
//!
//! # Modules
//!
//! - `security` - identity snapshot, group authorization, capability and seccomp lockdown
//! - `cli` - strict parsing of the three invocation shapes
//! - `device` - the two control files and the operations on them
//! - `dispatch` - stage ordering and exit-code propagation
//! - `error` - failure taxonomy and exit codes
//! - `logging` - tracing subscriber setup
//!
//! # Quick Start
//!
//! ```ignore
//! use kbd_rgb::{Dispatcher, Identity, SysfsControl, SystemGroups};
//!
//! let identity = Identity::capture();
//! let dispatcher = Dispatcher::new(&identity, SystemGroups, SysfsControl).with_lockdown(true);
//! dispatcher.run("kbd-rgb", &args, &mut std::io::stdout())?;
//! ```

pub mod cli;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod security;

pub use cli::Invocation;
pub use device::{Brightness, Color, ControlFs, ControlTarget, SysfsControl};
pub use dispatch::Dispatcher;
pub use error::{KbdError, Result};
pub use security::{GroupDirectory, Identity, SystemGroups};
