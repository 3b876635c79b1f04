use clap::{Parser, Subcommand};
use streakr_core::storage::data_dir;
use streakr_core::Config;

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "streakr", version, about = "streakr is a habit tracking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new habit to track
    Add(commands::add::AddArgs),
    /// Log today's habit completion (or slip-up, for quit habits)
    Log {
        /// Habit names or aliases, separated by spaces or commas
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Delete habits and all their data
    Delete {
        /// Habit names or aliases, separated by spaces or commas
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Rename a habit, keeping its history
    Rename {
        /// Current name or alias
        name: String,
        /// New name
        new_name: String,
    },
    /// Manage habit aliases
    Alias {
        #[command(subcommand)]
        action: commands::alias::AliasAction,
    },
    /// List all habits being tracked
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Current and best streaks, or a month calendar for one habit
    Stats(commands::stats::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = run(cli);
    std::process::exit(code);
}

/// Run one command and return the process exit code.
///
/// Everything the command opened, including the log writer, is dropped
/// before this returns.
fn run(cli: Cli) -> i32 {
    let _guard = match data_dir() {
        Ok(dir) => {
            let config = Config::load_from(&dir).unwrap_or_default();
            logging::init(&dir, &config.logging)
                .map_err(|e| eprintln!("warning: logging disabled: {e}"))
                .ok()
        }
        Err(_) => None,
    };

    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args),
        Commands::Log { names } => commands::log::run(names),
        Commands::Delete { names } => commands::delete::run(names),
        Commands::Rename { name, new_name } => commands::rename::run(name, new_name),
        Commands::Alias { action } => commands::alias::run(action),
        Commands::List { json } => commands::list::run(json),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn stats_month_requires_a_habit() {
        assert!(Cli::try_parse_from(["streakr", "stats", "-m", "3"]).is_err());
        assert!(Cli::try_parse_from(["streakr", "stats", "gym", "-m", "3", "-y", "2025"]).is_ok());
    }

    #[test]
    fn add_parses_type_and_aliases() {
        let cli = Cli::try_parse_from([
            "streakr", "add", "smoking", "-t", "Quit", "-a", "smk", "-a", "cig",
        ])
        .unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.habit_type, streakr_core::HabitType::Quit);
        assert_eq!(args.aliases, ["smk", "cig"]);
    }

    #[test]
    fn log_requires_a_name() {
        assert!(Cli::try_parse_from(["streakr", "log"]).is_err());
    }
}
