pub mod add;
pub mod alias;
pub mod completions;
pub mod config;
pub mod delete;
pub mod list;
pub mod log;
pub mod rename;
pub mod stats;

use streakr_core::{CoreError, Database, Tracker};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the habit database on the system clock.
pub fn open_tracker() -> Result<Tracker<Database>, CoreError> {
    Ok(Tracker::new(Database::open()?))
}

/// Close the database explicitly so close errors end up in the log.
pub fn close_tracker(tracker: Tracker<Database>) {
    let db = tracker.into_store();
    let path = db.path().map(|p| p.display().to_string());
    match db.close() {
        Ok(()) => tracing::debug!(path = ?path, "database closed"),
        Err(e) => tracing::warn!(path = ?path, error = %e, "failed to close database"),
    }
}

/// Split arguments such as `read,run gym` into individual names.
pub fn split_names(args: &[String]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut names = Vec::new();
    for arg in args {
        for part in arg.split(',') {
            let name = part.trim();
            if name.is_empty() {
                return Err("habit name cannot be empty".into());
            }
            names.push(name.to_lowercase());
        }
    }
    if names.is_empty() {
        return Err("habit name cannot be empty".into());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn split_names_accepts_commas_and_spaces() {
        assert_eq!(
            split_names(&args(&["Read,run", "gym"])).unwrap(),
            ["read", "run", "gym"]
        );
        assert_eq!(split_names(&args(&[" yoga "])).unwrap(), ["yoga"]);
    }

    #[test]
    fn split_names_rejects_empty_parts() {
        assert!(split_names(&args(&[])).is_err());
        assert!(split_names(&args(&["read,,run"])).is_err());
        assert!(split_names(&args(&["read,"])).is_err());
    }
}
