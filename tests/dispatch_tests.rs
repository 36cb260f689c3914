//! Integration tests for the full dispatch pipeline
//!
//! A recording in-memory filesystem stands in for sysfs, and a fixed group
//! table stands in for the group database, so every stage can be observed
//! without root or real hardware.

use std::cell::RefCell;
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use kbd_rgb::device::ALLOW_GROUP;
use kbd_rgb::error::{ErrorKind, EXIT_DEVICE_MISSING, EXIT_FAILURE, EXIT_UNAUTHORIZED};
use kbd_rgb::{
    Brightness, Color, ControlFs, ControlTarget, Dispatcher, GroupDirectory, Identity, Invocation,
    KbdError,
};
use nix::errno::Errno;
use nix::unistd::{Gid, Uid};

const KBD_GID: u32 = 998;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Probe(ControlTarget),
    OpenRead(ControlTarget),
    OpenWrite(ControlTarget),
    Write(ControlTarget, Vec<u8>),
    WriteFailed(ControlTarget),
}

#[derive(Default)]
struct FakeState {
    events: Vec<Event>,
    missing: HashSet<ControlTarget>,
    color: Vec<u8>,
    brightness: Vec<u8>,
    accept: Option<usize>,
    fail_open: Option<i32>,
    fail_write: Option<i32>,
}

/// Sysfs double that records every call
#[derive(Clone, Default)]
struct FakeSysfs(Rc<RefCell<FakeState>>);

impl FakeSysfs {
    fn with_color(color: &str) -> Self {
        let fs = Self::default();
        fs.0.borrow_mut().color = color.as_bytes().to_vec();
        fs
    }

    fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    fn opens(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::OpenRead(_) | Event::OpenWrite(_)))
            .count()
    }

    fn writes(&self) -> Vec<(ControlTarget, Vec<u8>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write(t, bytes) => Some((t, bytes)),
                _ => None,
            })
            .collect()
    }
}

struct FakeFile {
    fs: FakeSysfs,
    target: ControlTarget,
    cursor: Cursor<Vec<u8>>,
}

impl Read for FakeFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Write for FakeFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.fs.0.borrow_mut();
        if let Some(errno) = state.fail_write {
            state.events.push(Event::WriteFailed(self.target));
            return Err(io::Error::from_raw_os_error(errno));
        }
        let n = state.accept.map_or(buf.len(), |limit| buf.len().min(limit));
        let accepted = buf[..n].to_vec();
        state.events.push(Event::Write(self.target, accepted.clone()));
        match self.target {
            ControlTarget::Color => state.color = accepted,
            ControlTarget::Brightness => state.brightness = accepted,
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ControlFs for FakeSysfs {
    type Reader = FakeFile;
    type Writer = FakeFile;

    fn probe(&self, target: ControlTarget) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        state.events.push(Event::Probe(target));
        if state.missing.contains(&target) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        Ok(())
    }

    fn open_read(&self, target: ControlTarget) -> io::Result<FakeFile> {
        let mut state = self.0.borrow_mut();
        state.events.push(Event::OpenRead(target));
        if let Some(errno) = state.fail_open {
            return Err(io::Error::from_raw_os_error(errno));
        }
        let contents = match target {
            ControlTarget::Color => state.color.clone(),
            ControlTarget::Brightness => state.brightness.clone(),
        };
        Ok(FakeFile {
            fs: self.clone(),
            target,
            cursor: Cursor::new(contents),
        })
    }

    fn open_write(&self, target: ControlTarget) -> io::Result<FakeFile> {
        let mut state = self.0.borrow_mut();
        state.events.push(Event::OpenWrite(target));
        if let Some(errno) = state.fail_open {
            return Err(io::Error::from_raw_os_error(errno));
        }
        Ok(FakeFile {
            fs: self.clone(),
            target,
            cursor: Cursor::new(Vec::new()),
        })
    }
}

/// Group table with only the compiled-in group
struct FakeGroups;

impl GroupDirectory for FakeGroups {
    fn resolve(&self, name: &str) -> Option<Gid> {
        (name == ALLOW_GROUP).then(|| Gid::from_raw(KBD_GID))
    }
}

fn member() -> Identity {
    Identity::new(
        Uid::from_raw(1000),
        Uid::from_raw(0),
        Some(vec![Gid::from_raw(27), Gid::from_raw(KBD_GID)]),
    )
}

fn outsider() -> Identity {
    Identity::new(Uid::from_raw(1001), Uid::from_raw(0), Some(vec![Gid::from_raw(27)]))
}

fn args(list: &[&str]) -> Vec<OsString> {
    list.iter().map(OsString::from).collect()
}

fn run(identity: &Identity, fs: &FakeSysfs, list: &[&str]) -> (Result<Invocation, KbdError>, Vec<u8>) {
    let mut out = Vec::new();
    let result = Dispatcher::new(identity, FakeGroups, fs).run("kbd-rgb", &args(list), &mut out);
    (result, out)
}

/// A member can set the color; payload is exactly "R G B\n"
#[test]
fn test_set_color() {
    let fs = FakeSysfs::default();
    let (result, out) = run(&member(), &fs, &["0", "128", "255"]);

    assert_eq!(result.unwrap(), Invocation::SetColor(Color::new(0, 128, 255)));
    assert!(out.is_empty());
    assert_eq!(fs.writes(), vec![(ControlTarget::Color, b"0 128 255\n".to_vec())]);
}

/// A member can set the brightness; payload is exactly "LEVEL\n"
#[test]
fn test_set_brightness() {
    let fs = FakeSysfs::default();
    let (result, _) = run(&member(), &fs, &["42"]);

    assert_eq!(result.unwrap(), Invocation::SetBrightness(Brightness(42)));
    assert_eq!(fs.writes(), vec![(ControlTarget::Brightness, b"42\n".to_vec())]);
}

/// --get prints the color file verbatim and never touches brightness
#[test]
fn test_get_prints_color_verbatim() {
    let fs = FakeSysfs::with_color("12 34 56\n");
    let (result, out) = run(&member(), &fs, &["--get"]);

    assert_eq!(result.unwrap(), Invocation::Get);
    assert_eq!(out, b"12 34 56\n");
    assert_eq!(
        fs.events(),
        vec![
            Event::Probe(ControlTarget::Color),
            Event::Probe(ControlTarget::Brightness),
            Event::OpenRead(ControlTarget::Color),
        ]
    );
}

/// Set then get reflects what the device stored
#[test]
fn test_set_then_get_round_trip() {
    let fs = FakeSysfs::default();
    run(&member(), &fs, &["10", "20", "30"]).0.unwrap();
    let (result, out) = run(&member(), &fs, &["--get"]);

    result.unwrap();
    assert_eq!(out, b"10 20 30\n");
}

/// Outsiders are rejected before any filesystem access
#[test]
fn test_unauthorized_touches_nothing() {
    let fs = FakeSysfs::default();
    let (result, out) = run(&outsider(), &fs, &["1", "2", "3"]);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationDenied);
    assert_eq!(err.exit_code(), EXIT_UNAUTHORIZED);
    assert!(fs.events().is_empty());
    assert!(out.is_empty());
}

/// A failed group enumeration denies access, even to root
#[test]
fn test_group_lookup_failure_denies() {
    let fs = FakeSysfs::default();
    let unknown = Identity::without_groups(Uid::from_raw(0), Uid::from_raw(0), Errno::ENOMEM);
    let (result, _) = run(&unknown, &fs, &["--get"]);

    assert_eq!(result.unwrap_err().exit_code(), EXIT_UNAUTHORIZED);
    assert_eq!(fs.opens(), 0);
}

/// A missing control file stops the run before parsing or writing
#[test]
fn test_missing_device() {
    let fs = FakeSysfs::default();
    fs.0.borrow_mut().missing.insert(ControlTarget::Brightness);
    let (result, _) = run(&member(), &fs, &["1", "2", "3"]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), EXIT_DEVICE_MISSING);
    assert!(err.to_string().contains("brightness"));
    assert_eq!(fs.opens(), 0);
}

/// Missing device wins over bad arguments
#[test]
fn test_missing_device_checked_before_arguments() {
    let fs = FakeSysfs::default();
    fs.0.borrow_mut().missing.insert(ControlTarget::Color);
    let (result, _) = run(&member(), &fs, &["not-a-number"]);

    assert_eq!(result.unwrap_err().kind(), ErrorKind::DeviceMissing);
}

/// Wrong argument counts are usage errors with no write
#[test]
fn test_wrong_arity() {
    for list in [&[][..], &["1", "2"][..], &["1", "2", "3", "4", "5"][..]] {
        let fs = FakeSysfs::default();
        let (result, _) = run(&member(), &fs, list);

        let err = result.unwrap_err();
        assert!(matches!(err, KbdError::Usage(_)), "{list:?}");
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert_eq!(fs.opens(), 0);
    }
}

/// Malformed values are rejected with no write
#[test]
fn test_invalid_values() {
    for list in [&["256"][..], &["+5"][..], &["10x"][..], &[""][..], &["1", " 2", "3"][..]] {
        let fs = FakeSysfs::default();
        let (result, _) = run(&member(), &fs, list);

        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput, "{list:?}");
        assert_eq!(fs.opens(), 0);
    }
}

/// A short write is a failure, not success
#[test]
fn test_short_write_reported() {
    let fs = FakeSysfs::default();
    fs.0.borrow_mut().accept = Some(2);
    let (result, _) = run(&member(), &fs, &["100"]);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    assert!(err.to_string().contains("short write"));
    assert_eq!(fs.writes().len(), 1);
}

/// A control file that refuses to open fails the get with exit 1
#[test]
fn test_get_open_failure_reported() {
    let fs = FakeSysfs::with_color("1 2 3\n");
    fs.0.borrow_mut().fail_open = Some(libc::EACCES);
    let (result, out) = run(&member(), &fs, &["--get"]);

    let err = result.unwrap_err();
    assert!(matches!(err, KbdError::Io { op: "open", .. }));
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    let msg = err.to_string();
    assert!(msg.starts_with(&format!("open({}) failed: ", ControlTarget::Color.path().display())));
    assert_eq!(fs.opens(), 1);
    assert!(out.is_empty());
}

/// Opening for write fails the set with exit 1 and nothing written
#[test]
fn test_set_open_failure_reported() {
    let fs = FakeSysfs::default();
    fs.0.borrow_mut().fail_open = Some(libc::EACCES);
    let (result, _) = run(&member(), &fs, &["7"]);

    let err = result.unwrap_err();
    assert!(matches!(err, KbdError::Io { op: "open", .. }));
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    assert!(err
        .to_string()
        .starts_with(&format!("open({}) failed: ", ControlTarget::Brightness.path().display())));
    assert_eq!(fs.opens(), 1);
    assert!(fs.writes().is_empty());
}

/// A rejected write fails with exit 1 after a single attempt
#[test]
fn test_write_failure_reported() {
    let fs = FakeSysfs::default();
    fs.0.borrow_mut().fail_write = Some(libc::EINVAL);
    let (result, _) = run(&member(), &fs, &["1", "2", "3"]);

    let err = result.unwrap_err();
    assert!(matches!(err, KbdError::Io { op: "write", .. }));
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(err.exit_code(), EXIT_FAILURE);
    assert!(err
        .to_string()
        .starts_with(&format!("write({}) failed: ", ControlTarget::Color.path().display())));
    assert_eq!(fs.opens(), 1);
    assert_eq!(
        fs.events()
            .iter()
            .filter(|e| matches!(e, Event::WriteFailed(_)))
            .count(),
        1
    );
    assert!(fs.writes().is_empty());
}
