//! appmenu - dmenu-driven application launcher.
//!
//! Discovers desktop entries, streams them (with inline icon payloads)
//! to an external picker, and execs the chosen application's command.

mod command;
mod config;
mod dispatcher;
mod picker;

use appmenu_apps::Catalog;
use appmenu_icons::Icons;
use command::ExecLauncher;
use config::Config;
use dispatcher::Outcome;
use log::{error, info};
use std::process;

fn main() {
    env_logger::init();

    let config = Config::load();
    let catalog = Catalog::discover(&appmenu_apps::entry_roots());
    info!("discovered {} desktop entries", catalog.len());
    let icons = Icons::new();

    let mut launcher = ExecLauncher;
    match dispatcher::run(&config, &catalog, &icons, &mut launcher) {
        // On success exec replaced this process; Launched is only
        // observable with a non-replacing launcher.
        Ok(Outcome::Launched) => {}
        Ok(Outcome::Cancelled) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
