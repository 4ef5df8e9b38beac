use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// access-console - access-control administration console core
#[derive(Parser, Debug)]
#[command(name = "access-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP console host
    Serve {
        /// Port to listen on
        #[arg(long, env = "CONSOLE_PORT", default_value_t = 8080)]
        port: u16,

        /// Address to bind
        #[arg(long, env = "CONSOLE_BIND", default_value = "0.0.0.0")]
        bind: String,

        /// Schedules JSON file to start from (demo schedules if omitted)
        #[arg(long, env = "CONSOLE_SCHEDULES")]
        schedules: Option<PathBuf>,
    },

    /// Detect schedule conflicts and print a report
    Conflicts {
        /// Schedules JSON file (demo schedules if omitted)
        #[arg(long, env = "CONSOLE_SCHEDULES")]
        schedules: Option<PathBuf>,

        /// Also write the report to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Assign doors or floors to users and emit the assignment records
    Assign {
        /// Grant floors instead of doors
        #[arg(long)]
        floors: bool,

        /// Door/floor catalog CSV (demo catalog if omitted)
        #[arg(long)]
        points_csv: Option<PathBuf>,

        /// User catalog CSV (demo catalog if omitted)
        #[arg(long)]
        users_csv: Option<PathBuf>,

        /// Comma-separated door or floor ids to assign
        #[arg(long, required = true)]
        points: String,

        /// Comma-separated user ids to assign
        #[arg(long, required = true)]
        users: String,

        /// Write the records to this CSV file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_and_env_fallbacks() {
        use clap::CommandFactory;
        use std::ffi::OsStr;

        let cli = Cli::command();
        let serve = cli.find_subcommand("serve").unwrap();
        let arg = |id: &str| serve.get_arguments().find(|a| a.get_id().as_str() == id).unwrap();
        let defaults = |id: &str| {
            arg(id)
                .get_default_values()
                .iter()
                .map(|v| v.to_str().unwrap().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(defaults("port"), vec!["8080"]);
        assert_eq!(defaults("bind"), vec!["0.0.0.0"]);
        assert!(defaults("schedules").is_empty());

        assert_eq!(arg("port").get_env(), Some(OsStr::new("CONSOLE_PORT")));
        assert_eq!(arg("bind").get_env(), Some(OsStr::new("CONSOLE_BIND")));
        assert_eq!(arg("schedules").get_env(), Some(OsStr::new("CONSOLE_SCHEDULES")));
    }

    #[test]
    fn assign_requires_points_and_users() {
        assert!(Cli::try_parse_from(["access-console", "assign", "--points", "d1"]).is_err());
        let cli = Cli::try_parse_from([
            "access-console",
            "assign",
            "--floors",
            "--points",
            "floor-1,floor-2",
            "--users",
            "user-1",
        ])
        .unwrap();
        match cli.command {
            Command::Assign { floors, points, users, out, .. } => {
                assert!(floors);
                assert_eq!(points, "floor-1,floor-2");
                assert_eq!(users, "user-1");
                assert!(out.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
