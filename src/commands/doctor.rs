// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::scan;
use crate::models::Diagnostic;
use crate::store::SlotStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn check(conn: &Connection) -> Result<Vec<Diagnostic>> {
    let loaded = SlotStore::new(conn).load()?;
    let mut issues = loaded.diagnostics();
    issues.extend(scan(&loaded.records));
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = check(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .iter()
            .map(|d| vec![d.id.clone(), d.issue.to_string()])
            .collect();
        println!("{}", pretty_table(&["Record", "Issue"], rows));
    }
    Ok(())
}
