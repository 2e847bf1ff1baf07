use anyhow::Result;
use log::debug;
use std::env;
use std::io;

use expense_tracker::{stdin_keys, Config, Dispatcher, SqliteStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Store failures are fatal: report and exit non-zero, no retry
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = Config::from_env();
    debug!("Using {:?}", config);

    let mut store = SqliteStore::open(&config)?;
    let mut keys = stdin_keys();

    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(&mut store, keys.as_mut(), stdout.lock());
    dispatcher.run(args.as_slice())
}
