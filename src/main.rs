use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tree_bundle::Interrupted;

const INTERRUPTED_EXIT: i32 = 130;

fn abort_notice() -> ! {
    eprintln!("\nAborted by user.");
    process::exit(INTERRUPTED_EXIT);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Runs on the ctrlc thread and exits even while main is blocked in I/O.
    if let Err(e) = ctrlc::set_handler(|| {
        abort_notice();
    }) {
        log::warn!("Failed to set Ctrl+C handler: {}", e);
    }

    if let Err(err) = tree_bundle::run(Arc::new(AtomicBool::new(false))) {
        if err.chain().any(|cause| cause.is::<Interrupted>()) {
            abort_notice();
        }
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
