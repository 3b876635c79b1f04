use streakr_core::LogAction;

use super::{close_tracker, open_tracker, split_names, CmdResult};

pub fn run(names: Vec<String>) -> CmdResult {
    let names = split_names(&names)?;
    let tracker = open_tracker()?;
    let report = tracker.log_today(&names)?;

    for entry in &report.entries {
        if entry.action == LogAction::AlreadyLogged {
            println!("{} was already logged today", entry.name);
        }
    }

    if report.all_quit {
        println!("✔️  logged");
    } else {
        match tracker.logged_today_count() {
            Ok((logged, total)) => println!("✔️  logged {logged}/{total} today"),
            Err(e) => {
                // the log itself succeeded
                tracing::error!(error = %e, "failed to count today's logs");
                println!("✔️  logged");
            }
        }
    }

    close_tracker(tracker);
    Ok(())
}
