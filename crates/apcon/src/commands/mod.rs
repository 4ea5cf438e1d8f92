//! Command dispatch: bridges CLI args -> Console calls -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod portal;
pub mod provision;
pub mod util;

use apcon_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Password => auth::change_password(console, global).await,
        Command::Devices(args) => devices::handle(console, args, global).await,
        Command::Portal(args) => portal::handle(console, args, global).await,
        Command::Provision(args) => provision::handle(console, args, global).await,
        // Login, Logout, Config, and Completions are handled before dispatch
        Command::Login(_) | Command::Logout | Command::Config(_) | Command::Completions(_) => {
            unreachable!()
        }
    }
}
