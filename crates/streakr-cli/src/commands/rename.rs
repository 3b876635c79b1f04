use super::{close_tracker, open_tracker, CmdResult};

pub fn run(name: String, new_name: String) -> CmdResult {
    let tracker = open_tracker()?;
    let old = tracker.habit(&name)?;
    let renamed = tracker.rename_habit(&name, &new_name)?;
    close_tracker(tracker);

    println!("renamed {} to {}", old.name, renamed.name);
    Ok(())
}
