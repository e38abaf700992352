//! `rekindle watch` — poll a file and report each observed reload.

use std::time::Duration;

use crate::{GlobalArgs, WatchArgs};

/// Runs the `rekindle watch` command.
///
/// Creates the file's slot with hot reload forced on, then polls
/// `exports()` at the configured interval. A reload is reported whenever
/// the slot's observed mtime changes; read or materialization failures are
/// printed and polling continues.
pub fn run(args: &WatchArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = crate::build_registry(global)?;
    let slot = registry.slot_with(&args.path, Some(true))?;

    if !global.quiet {
        eprintln!(
            "   Watching {} every {}ms",
            slot.path().display(),
            args.interval_ms
        );
    }

    let mut last_seen = None;
    let mut tick = 0u64;
    loop {
        match slot.exports() {
            Ok(exports) => {
                let observed = slot.last_observed_mtime();
                if observed != last_seen {
                    last_seen = observed;
                    println!("reloaded {} ({})", slot.path().display(), exports.kind());
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }

        tick += 1;
        if args.ticks != 0 && tick >= args.ticks {
            break;
        }
        std::thread::sleep(Duration::from_millis(args.interval_ms));
    }
    Ok(0)
}
