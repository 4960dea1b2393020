// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendtrail::{cli, commands, config::Config, db, logging, store::SlotStore, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::from_matches(&matches)?;
    logging::init(&cfg.log_filter);

    let conn = db::open_or_init(&cfg.db_path)?;
    let seeded = SlotStore::new(&conn).seed_if_empty(utils::today())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized at {}", cfg.db_path.display());
            if seeded {
                println!("Seeded demonstration transactions");
            }
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
