use super::{close_tracker, open_tracker, split_names, CmdResult};

pub fn run(names: Vec<String>) -> CmdResult {
    let names = split_names(&names)?;
    let tracker = open_tracker()?;
    let deleted = tracker.delete_habits(&names)?;
    close_tracker(tracker);

    for habit in deleted {
        println!("deleted {}", habit.name);
    }
    Ok(())
}
