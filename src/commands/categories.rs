// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::table;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CategoryRow {
    name: &'static str,
    color: &'static str,
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let data: Vec<CategoryRow> = table()
            .into_iter()
            .map(|(c, color)| CategoryRow {
                name: c.name(),
                color,
            })
            .collect();
        if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
            let rows = data
                .iter()
                .map(|r| vec![r.name.to_string(), r.color.to_string()])
                .collect();
            println!("{}", pretty_table(&["Category", "Color"], rows));
        }
    }
    Ok(())
}
