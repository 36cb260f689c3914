//! Filesystem seam for the control files
//!
//! [`ControlFs`] is the only way the writer reaches the kernel. The real
//! implementation, [`SysfsControl`], resolves a [`ControlTarget`] to its
//! compiled-in path; tests substitute an in-memory double.
//!
//! Every handle is opened with `O_CLOEXEC` and `O_NOFOLLOW`, read-only or
//! write-only, never both, and never with `O_CREAT`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use super::target::ControlTarget;

const OPEN_FLAGS: libc::c_int = libc::O_CLOEXEC | libc::O_NOFOLLOW;

pub trait ControlFs {
    type Reader: Read;
    type Writer: Write;

    /// Metadata query only; must not open the file
    fn probe(&self, target: ControlTarget) -> io::Result<()>;

    fn open_read(&self, target: ControlTarget) -> io::Result<Self::Reader>;

    fn open_write(&self, target: ControlTarget) -> io::Result<Self::Writer>;
}

impl<T: ControlFs + ?Sized> ControlFs for &T {
    type Reader = T::Reader;
    type Writer = T::Writer;

    fn probe(&self, target: ControlTarget) -> io::Result<()> {
        (**self).probe(target)
    }

    fn open_read(&self, target: ControlTarget) -> io::Result<Self::Reader> {
        (**self).open_read(target)
    }

    fn open_write(&self, target: ControlTarget) -> io::Result<Self::Writer> {
        (**self).open_write(target)
    }
}

/// The LED class files under `/sys`
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsControl;

impl ControlFs for SysfsControl {
    type Reader = File;
    type Writer = File;

    fn probe(&self, target: ControlTarget) -> io::Result<()> {
        fs::metadata(target.path()).map(|_| ())
    }

    fn open_read(&self, target: ControlTarget) -> io::Result<File> {
        open_read_only(target.path())
    }

    fn open_write(&self, target: ControlTarget) -> io::Result<File> {
        open_write_only(target.path())
    }
}

pub(crate) fn open_read_only(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(OPEN_FLAGS)
        .open(path)
}

pub(crate) fn open_write_only(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .custom_flags(OPEN_FLAGS)
        .open(path)
}
