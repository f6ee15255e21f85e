//! Command handlers, one module per top-level subcommand.

pub mod applications;
pub mod blog;
pub mod config_cmd;
pub mod contacts;
pub mod forms;
pub mod portfolio;
pub mod services;
pub mod util;

use agency_core::Site;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a site-backed command to its handler.
pub async fn dispatch(cmd: Command, site: &Site, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Blog(args) => blog::handle(site, args, global).await,
        Command::Portfolio(args) => portfolio::handle(site, args, global).await,
        Command::Services(args) => services::handle(site, args, global).await,
        Command::Contacts(args) => contacts::handle(site, args, global).await,
        Command::Applications(args) => applications::handle(site, args, global).await,
        Command::Contact(args) => forms::contact(site, args).await,
        Command::Apply(args) => forms::apply(site, args, global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
