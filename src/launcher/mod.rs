/*
* Startup sequencer: wait for the database, apply migrations, then hand the
* process over to the API server. Strictly sequential and fail-fast; the
* first failing step aborts the whole launch.
*/

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::environment::{APP_CONFIG_VAR, APP_ENV_VAR};

/// Which of the two static configurations the server is launched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Reads `APP_ENV` from the process environment.
    pub fn detect() -> Self {
        Self::from_var(std::env::var(APP_ENV_VAR).ok().as_deref())
    }

    /// "production" selects production; any other value or unset means development.
    pub fn from_var(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// The static dotenv file handed to the server process.
    pub fn config_file(self) -> &'static str {
        match self {
            Self::Production => "config/production.env",
            Self::Development => "config/development.env",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One blocking startup step, run to completion before the next starts.
#[derive(Debug)]
pub struct Step {
    pub description: &'static str,
    pub program: PathBuf,
    pub args: &'static [&'static str],
}

impl Step {
    pub fn command(&self) -> Command {
        let mut command: Command = Command::new(&self.program);
        command.args(self.args);
        command
    }
}

/// The ordered startup sequence: database readiness first, then migrations.
///
/// The readiness check is our own `wait_for_db` binary built next to the
/// launcher; the migration tool is the external `sqlx` CLI resolved from PATH.
pub fn startup_steps(bin_dir: &Path) -> Vec<Step> {
    vec![
        Step {
            description: "Waiting for database connection",
            program: sibling_binary(bin_dir, "wait_for_db"),
            args: &[],
        },
        Step {
            description: "Running database migrations",
            program: PathBuf::from("sqlx"),
            args: &["migrate", "run"],
        },
    ]
}

/// The server invocation for the selected environment. The chosen config
/// file travels to the server via `APP_CONFIG`.
pub fn server_command(environment: AppEnvironment, bin_dir: &Path) -> Command {
    let mut command: Command = Command::new(sibling_binary(bin_dir, env!("CARGO_PKG_NAME")));
    command.env(APP_ENV_VAR, environment.as_str());
    command.env(APP_CONFIG_VAR, environment.config_file());
    command
}

/// Directory the launcher binary itself lives in; sibling binaries of this
/// crate are expected there.
pub fn launcher_bin_dir() -> Result<PathBuf> {
    let exe: PathBuf = std::env::current_exe().context("Failed to resolve current executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Prefers a binary built next to the launcher, falling back to PATH lookup.
fn sibling_binary(bin_dir: &Path, name: &str) -> PathBuf {
    let candidate: PathBuf = bin_dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
    if candidate.is_file() {
        candidate
    } else {
        PathBuf::from(name)
    }
}

/// Runs a single step, failing on spawn errors and non-zero exits.
pub fn run_step(step: &Step) -> Result<()> {
    info!("{}", step.description);

    let status: std::process::ExitStatus = step
        .command()
        .status()
        .with_context(|| format!("Failed to launch `{}`", step.program.display()))?;

    if !status.success() {
        bail!("{} failed ({})", step.description, status);
    }

    Ok(())
}

/// Runs the steps strictly in order, aborting on the first failure so a
/// later step is never attempted after an earlier one fails.
pub fn run_sequence<F>(steps: &[Step], mut run: F) -> Result<()>
where
    F: FnMut(&Step) -> Result<()>,
{
    for step in steps {
        run(step)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_flag_selects_production() {
        assert_eq!(
            AppEnvironment::from_var(Some("production")),
            AppEnvironment::Production
        );
    }

    #[test]
    fn anything_else_selects_development() {
        assert_eq!(AppEnvironment::from_var(None), AppEnvironment::Development);
        assert_eq!(
            AppEnvironment::from_var(Some("staging")),
            AppEnvironment::Development
        );
        assert_eq!(
            AppEnvironment::from_var(Some("Production")),
            AppEnvironment::Development
        );
    }

    #[test]
    fn config_files_are_static_per_environment() {
        assert_eq!(
            AppEnvironment::Production.config_file(),
            "config/production.env"
        );
        assert_eq!(
            AppEnvironment::Development.config_file(),
            "config/development.env"
        );
    }

    #[test]
    fn database_wait_precedes_migrations() {
        let steps: Vec<Step> = startup_steps(Path::new("/nonexistent"));

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].description, "Waiting for database connection");
        assert_eq!(steps[1].description, "Running database migrations");
        assert_eq!(steps[1].args, ["migrate", "run"]);
    }

    #[test]
    fn server_command_carries_the_selected_config() {
        let command: Command =
            server_command(AppEnvironment::Production, Path::new("/nonexistent"));

        let envs: Vec<(std::ffi::OsString, Option<std::ffi::OsString>)> = command
            .get_envs()
            .map(|(k, v)| (k.to_os_string(), v.map(|v| v.to_os_string())))
            .collect();

        assert!(envs.contains(&("APP_ENV".into(), Some("production".into()))));
        assert!(envs.contains(&("APP_CONFIG".into(), Some("config/production.env".into()))));
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let steps: Vec<Step> = startup_steps(Path::new("/nonexistent"));
        let mut attempted: Vec<&'static str> = Vec::new();

        let result: Result<()> = run_sequence(&steps, |step| {
            attempted.push(step.description);
            bail!("boom")
        });

        assert!(result.is_err());
        assert_eq!(attempted, ["Waiting for database connection"]);
    }

    #[test]
    fn sequence_runs_every_step_in_order_on_success() {
        let steps: Vec<Step> = startup_steps(Path::new("/nonexistent"));
        let mut attempted: Vec<&'static str> = Vec::new();

        run_sequence(&steps, |step| {
            attempted.push(step.description);
            Ok(())
        })
        .unwrap();

        assert_eq!(
            attempted,
            [
                "Waiting for database connection",
                "Running database migrations"
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn run_step_reports_nonzero_exits() {
        let failing: Step = Step {
            description: "Exiting nonzero",
            program: PathBuf::from("false"),
            args: &[],
        };
        assert!(run_step(&failing).is_err());

        let passing: Step = Step {
            description: "Exiting zero",
            program: PathBuf::from("true"),
            args: &[],
        };
        assert!(run_step(&passing).is_ok());
    }
}
