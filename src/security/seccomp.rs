//! Seccomp allow-list for the device write
//!
//! Once the arguments are validated, the only work left is opening one file,
//! one `read` or `write`, printing a line and exiting. The filter allows
//! exactly that; any other syscall returns `EPERM`.
//!
//! ```text
//! ┌──────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ Syscall  │────►│ BPF Program │────►│ ALLOW  or  EPERM │
//! └──────────┘     └─────────────┘     └──────────────────┘
//! ```

use seccompiler::{BpfProgram, SeccompAction, SeccompFilter, SeccompRule, TargetArch};
use std::convert::TryInto;
use std::io;

// ═══════════════════════════════════════════════════════════════════════════
// ControlSeccomp
// ═══════════════════════════════════════════════════════════════════════════
// WHAT IT IS:
//   A builder for the syscall allow-list applied before device I/O.
//
// MISMATCH ACTION:
//   Errno(EPERM). Teardown in libc and std may issue syscalls outside the
//   list after the device write has already completed.
// ═══════════════════════════════════════════════════════════════════════════

pub struct ControlSeccomp {
    allowed_syscalls: Vec<i64>,
}

impl ControlSeccomp {
    pub fn new() -> Self {
        Self {
            allowed_syscalls: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // with_control_defaults() - What get / set color / set brightness need
    // ═══════════════════════════════════════════════════════════════════════
    // SYSCALL CATEGORIES:
    //   1. Files: openat, read, write, close, stat family, fcntl
    //   2. Memory: mmap, munmap, mremap, mprotect, brk, madvise
    //   3. Signals: rt_sigaction, rt_sigprocmask, rt_sigreturn, sigaltstack
    //   4. Misc: futex, clock_gettime, getrandom
    //   5. Exit: exit, exit_group
    // ═══════════════════════════════════════════════════════════════════════
    pub fn with_control_defaults() -> Self {
        let mut filter = Self::new();

        // ─────────────────────────────────────────────────────────────────
        // Files - the control file, stdout, stderr
        // ─────────────────────────────────────────────────────────────────
        filter.allow(libc::SYS_openat);
        filter.allow(libc::SYS_read);
        filter.allow(libc::SYS_write);
        filter.allow(libc::SYS_writev);      // stderr diagnostics
        filter.allow(libc::SYS_close);
        filter.allow(libc::SYS_lseek);
        filter.allow(libc::SYS_fstat);
        filter.allow(libc::SYS_newfstatat);
        filter.allow(libc::SYS_statx);
        filter.allow(libc::SYS_fcntl);

        // ─────────────────────────────────────────────────────────────────
        // Memory - allocator
        // ─────────────────────────────────────────────────────────────────
        filter.allow(libc::SYS_mmap);
        filter.allow(libc::SYS_munmap);
        filter.allow(libc::SYS_mremap);
        filter.allow(libc::SYS_mprotect);
        filter.allow(libc::SYS_brk);
        filter.allow(libc::SYS_madvise);

        // ─────────────────────────────────────────────────────────────────
        // Signals
        // ─────────────────────────────────────────────────────────────────
        filter.allow(libc::SYS_rt_sigaction);
        filter.allow(libc::SYS_rt_sigprocmask);
        filter.allow(libc::SYS_rt_sigreturn);
        filter.allow(libc::SYS_sigaltstack);

        // ─────────────────────────────────────────────────────────────────
        // Misc
        // ─────────────────────────────────────────────────────────────────
        filter.allow(libc::SYS_futex);
        filter.allow(libc::SYS_clock_gettime);
        filter.allow(libc::SYS_getrandom);

        // ─────────────────────────────────────────────────────────────────
        // Exit
        // ─────────────────────────────────────────────────────────────────
        filter.allow(libc::SYS_exit);
        filter.allow(libc::SYS_exit_group);

        filter
    }

    pub fn allow(&mut self, syscall: i64) -> &mut Self {
        self.allowed_syscalls.push(syscall);
        self
    }

    /// Compile the allow-list into BPF for the running architecture
    pub fn build(&self) -> Result<BpfProgram, io::Error> {
        let rules: Vec<(i64, Vec<SeccompRule>)> = self
            .allowed_syscalls
            .iter()
            .map(|&syscall| (syscall, vec![]))
            .collect();

        let arch: TargetArch = std::env::consts::ARCH
            .try_into()
            .map_err(|e: seccompiler::BackendError| {
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;

        let filter = SeccompFilter::new(
            rules.into_iter().collect(),
            SeccompAction::Errno(libc::EPERM as u32),
            SeccompAction::Allow,
            arch,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        let bpf_prog: BpfProgram = filter
            .try_into()
            .map_err(|e: seccompiler::BackendError| {
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;

        Ok(bpf_prog)
    }

    /// Install the filter on the calling thread. Irreversible; also sets
    /// `PR_SET_NO_NEW_PRIVS`.
    pub fn apply(&self) -> Result<(), io::Error> {
        let bpf_prog = self.build()?;

        seccompiler::apply_filter(&bpf_prog)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        Ok(())
    }

    pub fn allowed_count(&self) -> usize {
        self.allowed_syscalls.len()
    }

    pub fn allows(&self, syscall: i64) -> bool {
        self.allowed_syscalls.contains(&syscall)
    }
}
