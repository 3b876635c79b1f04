use clap::Args;
use streakr_core::{HabitType, NewHabit};

use super::{close_tracker, open_tracker, CmdResult};

#[derive(Args)]
pub struct AddArgs {
    /// Habit name, a single word
    pub name: String,
    /// Description of the habit
    #[arg(short, long)]
    pub description: Option<String>,
    /// Type of the habit: improve or quit
    #[arg(short = 't', long = "type", default_value = "improve", value_parser = parse_habit_type)]
    pub habit_type: HabitType,
    /// Alternative name usable anywhere the habit name is (repeatable)
    #[arg(short, long = "alias")]
    pub aliases: Vec<String>,
}

fn parse_habit_type(s: &str) -> Result<HabitType, String> {
    s.parse::<HabitType>().map_err(|e| e.to_string())
}

pub fn run(args: AddArgs) -> CmdResult {
    let mut habit = NewHabit::new(args.name, args.habit_type);
    habit.description = args.description;
    habit.aliases = args.aliases;

    let tracker = open_tracker()?;
    let created = tracker.add_habit(habit)?;
    close_tracker(tracker);

    println!("added {} ({})", created.name, created.habit_type);
    if !created.aliases.is_empty() {
        println!("aliases: {}", created.aliases.join(", "));
    }
    Ok(())
}
