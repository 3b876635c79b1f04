use streakr_core::Config;

use super::{close_tracker, open_tracker, CmdResult};
use crate::render;

pub fn run(json: bool) -> CmdResult {
    let config = Config::load_or_default();
    let tracker = open_tracker()?;
    let habits = tracker.list_habits()?;
    close_tracker(tracker);

    if json || config.display.json {
        println!("{}", serde_json::to_string_pretty(&habits)?);
    } else if habits.is_empty() {
        println!("no habits yet, add one with `streakr add <name>`");
    } else {
        print!("{}", render::habit_table(&habits));
    }
    Ok(())
}
