//! Build script for kbd-rgb
//!
//! Bakes the sysfs directory and the authorization group into the binary.
//! Both can be overridden from the build environment, never at runtime:
//!
//! ```text
//! KBD_RGB_SYSFS_DIR=/sys/class/leds/tuxedo::kbd_backlight KBD_RGB_GROUP=input cargo build --release
//! ```

use std::path::{Component, Path};

const DEFAULT_SYSFS_DIR: &str = "/sys/class/leds/rgb::kbd_backlight";
const DEFAULT_GROUP: &str = "kbdlight";

fn main() {
    println!("cargo:rerun-if-env-changed=KBD_RGB_SYSFS_DIR");
    println!("cargo:rerun-if-env-changed=KBD_RGB_GROUP");

    let dir = std::env::var("KBD_RGB_SYSFS_DIR").unwrap_or_else(|_| DEFAULT_SYSFS_DIR.to_string());
    let group = std::env::var("KBD_RGB_GROUP").unwrap_or_else(|_| DEFAULT_GROUP.to_string());

    let path = Path::new(&dir);
    if !path.is_absolute() {
        panic!("KBD_RGB_SYSFS_DIR must be an absolute path, got {dir:?}");
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        panic!("KBD_RGB_SYSFS_DIR must not contain '..', got {dir:?}");
    }
    if group.is_empty() || group.chars().any(|c| c == ':' || c == '\0' || c.is_whitespace()) {
        panic!("KBD_RGB_GROUP is not a valid group name: {group:?}");
    }

    println!("cargo:rustc-env=KBD_RGB_SYSFS_DIR={}", dir.trim_end_matches('/'));
    println!("cargo:rustc-env=KBD_RGB_GROUP={group}");
}
