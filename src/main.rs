#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use mapty::controller::{App, Services};
use mapty::terminal::{
    self, FixedPosition, Output, TerminalForm, TerminalMap, TerminalNotifier, TerminalSidebar,
};
use mapty::{cli, utils};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

#[macro_use]
extern crate mapty;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let config = cli.config();
    dlog!(
        "mode=replay script={} zoom={} hide_delay={:?}",
        cli.script.display(),
        config.zoom,
        config.hide_delay
    );

    let out: Output = Rc::new(RefCell::new(io::stdout()));
    let mut app = App::new(
        Services {
            geolocation: FixedPosition(cli.position()),
            map: TerminalMap::new(Rc::clone(&out)),
            form: TerminalForm::default(),
            sidebar: TerminalSidebar::new(Rc::clone(&out)),
            notifier: TerminalNotifier::new(Rc::clone(&out)),
        },
        config,
    );

    // Without a position the session carries on map-less; clicks are ignored.
    if let Err(e) = app.start() {
        dlog!("start degraded err={e}");
    }

    let reader = utils::open_script(&cli.script)?;
    terminal::run(&mut app, reader, &out)?;

    if cli.json {
        terminal::print_json(&app, &out)?;
    }

    tracing::info!(workouts = app.workouts().len(), "session done");
    Ok(())
}
