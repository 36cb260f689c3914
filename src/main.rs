use std::ffi::OsString;
use std::process::ExitCode;

use kbd_rgb::error::EXIT_SUCCESS;
use kbd_rgb::logging::init_logging;
use kbd_rgb::{Dispatcher, Identity, SysfsControl, SystemGroups};

fn main() -> ExitCode {
    let identity = Identity::capture();
    init_logging(&identity);

    let mut argv = std::env::args_os();
    let program = argv
        .next()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let args: Vec<OsString> = argv.collect();

    let dispatcher = Dispatcher::new(&identity, SystemGroups, SysfsControl).with_lockdown(true);
    let code = match dispatcher.run(&program, &args, &mut std::io::stdout().lock()) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "invocation failed");
            eprintln!("{e}");
            e.exit_code()
        }
    };

    ExitCode::from(code as u8)
}
