// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::summarize;
use crate::models::{FilterSpec, Summary};
use crate::store::SlotStore;
use crate::utils::{filter_spec, fmt_money, maybe_print_json, pretty_table, today, warn_skipped};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Loads the store and runs every aggregation for the filter in `sub`.
pub fn build(conn: &Connection, sub: &clap::ArgMatches) -> Result<(FilterSpec, Summary)> {
    let spec = filter_spec(sub, today())?;
    let loaded = SlotStore::new(conn).load()?;
    let mut s = summarize(&loaded.records, &spec);
    let mut skipped = loaded.diagnostics();
    skipped.append(&mut s.diagnostics);
    s.diagnostics = skipped;
    warn_skipped(&s.diagnostics);
    Ok((spec, s))
}

#[derive(Serialize)]
struct SummaryOut {
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    transactions: usize,
    income: String,
    expense: String,
    net: String,
    skipped: usize,
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (spec, s) = build(conn, sub)?;
    let out = SummaryOut {
        start: spec.date_range.start,
        end: spec.date_range.end,
        transactions: s.transactions.len(),
        income: fmt_money(&s.totals.income),
        expense: fmt_money(&s.totals.expense),
        net: fmt_money(&s.totals.net),
        skipped: s.diagnostics.len(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        println!("Period: {} to {}", out.start, out.end);
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Net", "Transactions"],
                vec![vec![
                    out.income,
                    out.expense,
                    out.net,
                    out.transactions.to_string()
                ]],
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryOut {
    category: String,
    amount: String,
    color: &'static str,
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (_, s) = build(conn, sub)?;
    let data: Vec<CategoryOut> = s
        .breakdown
        .iter()
        .map(|e| CategoryOut {
            category: e.category.name().to_string(),
            amount: fmt_money(&e.amount),
            color: e.color,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.category, r.amount, r.color.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct TrendOut {
    date: chrono::NaiveDate,
    amount: String,
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (_, s) = build(conn, sub)?;
    let data: Vec<TrendOut> = s
        .trend
        .iter()
        .map(|p| TrendOut {
            date: p.date,
            amount: fmt_money(&p.amount),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.date.to_string(), r.amount])
            .collect();
        println!("{}", pretty_table(&["Date", "Spent"], rows));
    }
    Ok(())
}
