//! Command-line arguments

use crate::state::forms::rules::parse_due_time;
use crate::state::FormLaunch;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "todo-forms", about = "Terminal forms for the to-do service")]
pub struct Cli {
    /// Form to open (defaults to login)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in
    Login,
    /// Create an account
    Signup,
    /// Add a new task
    Create,
    /// Edit an existing task
    Update {
        /// Task id on the server
        #[arg(long)]
        id: u32,
        /// When the task was created, as stored (YYYY-MM-DD HH:MM:SS.ffffff)
        #[arg(long, value_parser = parse_timestamp)]
        created_time: NaiveDateTime,
        /// Current title
        #[arg(long)]
        title: String,
        /// Current due time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        due_time: String,
    },
}

impl Cli {
    pub fn launch(&self) -> FormLaunch {
        match &self.command {
            None | Some(Commands::Login) => FormLaunch::Login,
            Some(Commands::Signup) => FormLaunch::Signup,
            Some(Commands::Create) => FormLaunch::TaskCreate,
            Some(Commands::Update {
                id,
                created_time,
                title,
                due_time,
            }) => FormLaunch::TaskUpdate {
                todo_id: *id,
                created_time: *created_time,
                title: title.clone(),
                due_time: due_time.clone(),
            },
        }
    }
}

/// Stored creation times carry seconds and a fraction
const CREATED_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    CREATED_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_due_time(trimmed))
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM[:SS[.ffffff]], got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::View;

    #[test]
    fn test_default_is_login() {
        let cli = Cli::try_parse_from(["todo-forms"]).unwrap();
        assert_eq!(cli.launch(), FormLaunch::Login);
    }

    #[test]
    fn test_update_arguments() {
        let cli = Cli::try_parse_from([
            "todo-forms",
            "update",
            "--id",
            "7",
            "--created-time",
            "2030-01-01T08:00",
            "--title",
            "Pay rent",
            "--due-time",
            "2030-01-02T08:00",
        ])
        .unwrap();
        let launch = cli.launch();
        assert_eq!(launch.view(), View::TaskUpdate);
        let FormLaunch::TaskUpdate { todo_id, title, .. } = launch else {
            panic!("expected update launch");
        };
        assert_eq!(todo_id, 7);
        assert_eq!(title, "Pay rent");
    }

    #[test]
    fn test_created_time_accepts_stored_form() {
        let parsed = parse_timestamp("2030-01-01 08:00:00.123456").unwrap();
        let expected = chrono::NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_micro_opt(8, 0, 0, 123_456)
            .unwrap();
        assert_eq!(parsed, expected);
        assert!(parse_timestamp("2030-01-01T08:00:05").is_ok());
        assert!(parse_timestamp("2030-01-01T08:00").is_ok());
    }

    #[test]
    fn test_bad_created_time_is_rejected() {
        let result = Cli::try_parse_from([
            "todo-forms",
            "update",
            "--id",
            "7",
            "--created-time",
            "yesterday",
            "--title",
            "x",
            "--due-time",
            "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
