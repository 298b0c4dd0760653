// Application entrypoint: wait for the database, run migrations, then exec
// the API server with the configuration matching APP_ENV.

use std::path::PathBuf;
use std::process::Command;

use tracing::{error, info};

use axum_api_starter::core::logging;
use axum_api_starter::launcher::{
    launcher_bin_dir, run_sequence, run_step, server_command, startup_steps, AppEnvironment, Step,
};

fn main() {
    logging::init_tracing();

    info!("Starting application...");

    let bin_dir: PathBuf = match launcher_bin_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    };

    let steps: Vec<Step> = startup_steps(&bin_dir);
    if let Err(err) = run_sequence(&steps, run_step) {
        error!("{err:#}");
        std::process::exit(1);
    }

    let environment: AppEnvironment = AppEnvironment::detect();
    info!("Starting {environment} server...");

    exec_server(server_command(environment, &bin_dir));
}

/// Replaces this process with the server; only returns on launch failure.
#[cfg(unix)]
fn exec_server(mut command: Command) -> ! {
    use std::os::unix::process::CommandExt;

    let err: std::io::Error = command.exec();
    error!("Failed to exec server: {err}");
    std::process::exit(1);
}

/// Windows has no exec; run the server as a child and mirror its exit code.
#[cfg(not(unix))]
fn exec_server(mut command: Command) -> ! {
    match command.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => {
            error!("Failed to launch server: {err}");
            std::process::exit(1);
        }
    }
}
