use clap::Subcommand;

use super::{close_tracker, open_tracker, CmdResult};

#[derive(Subcommand)]
pub enum AliasAction {
    /// Add an alias to a habit
    Add {
        /// Habit name or existing alias
        habit: String,
        /// New alias
        alias: String,
    },
    /// Remove an alias from a habit
    Remove {
        /// Habit name or existing alias
        habit: String,
        /// Alias to remove
        alias: String,
    },
}

pub fn run(action: AliasAction) -> CmdResult {
    let tracker = open_tracker()?;
    let habit = match action {
        AliasAction::Add { habit, alias } => tracker.add_alias(&habit, &alias)?,
        AliasAction::Remove { habit, alias } => tracker.remove_alias(&habit, &alias)?,
    };
    close_tracker(tracker);

    if habit.aliases.is_empty() {
        println!("{} has no aliases", habit.name);
    } else {
        println!("{}: {}", habit.name, habit.aliases.join(", "));
    }
    Ok(())
}
