// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{filter_transactions, parse_record_date, sort_transactions};
use crate::form::TransactionDraft;
use crate::ledger;
use crate::models::{Category, SortDirection, SortKey};
use crate::store::SlotStore;
use crate::utils::{filter_spec, fmt_money, maybe_print_json, pretty_table, today, warn_skipped};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn category_arg(sub: &clap::ArgMatches) -> Result<Option<Category>> {
    sub.get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()
        .map_err(Into::into)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut draft = TransactionDraft::blank(today());
    draft.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    draft.description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    if let Some(date) = sub.get_one::<String>("date") {
        draft.date = date.clone();
    }
    draft.is_expense = !sub.get_flag("income");
    draft.category = match category_arg(sub)? {
        Some(c) => c,
        None if !draft.is_expense => Category::Income,
        None => Category::Other,
    };
    let new = draft.validate()?;

    let store = SlotStore::new(conn);
    let mut loaded = store.load()?;
    let stored = ledger::add(&mut loaded.records, new);
    store.save(&loaded)?;
    println!(
        "Recorded {} {} on {} '{}' [{}] (id: {})",
        if stored.is_expense { "expense" } else { "income" },
        fmt_money(&stored.amount),
        stored.date,
        stored.description,
        stored.category,
        stored.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let store = SlotStore::new(conn);
    let mut loaded = store.load()?;
    let existing = ledger::find(&loaded.records, id)
        .ok_or_else(|| anyhow!("Transaction '{}' not found", id))?
        .clone();

    let category = match category_arg(sub)? {
        Some(c) => c,
        None => existing.category.parse::<Category>().with_context(|| {
            format!("Stored category of '{}' is invalid; pass --category", id)
        })?,
    };
    let is_expense = if sub.get_flag("income") {
        false
    } else if sub.get_flag("expense") {
        true
    } else {
        existing.is_expense
    };
    let draft = TransactionDraft {
        amount: sub
            .get_one::<String>("amount")
            .cloned()
            .unwrap_or_else(|| existing.amount.to_string()),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or(existing.description),
        category,
        date: match sub.get_one::<String>("date") {
            Some(d) => d.clone(),
            None => parse_record_date(&existing.date)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or(existing.date),
        },
        is_expense,
    };
    let new = draft.validate()?;
    ledger::update(&mut loaded.records, id, new)?;
    store.save(&loaded)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let store = SlotStore::new(conn);
    let mut loaded = store.load()?;
    let gone = ledger::remove(&mut loaded.records, id)?;
    store.save(&loaded)?;
    println!("Removed '{}' ({})", gone.description, gone.id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub, today())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.description.clone(),
                    r.category.clone(),
                    r.kind.to_string(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Kind", "Amount", "ID"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: &'static str,
    pub amount: String,
}

/// Filtered and sorted rows for `tx list`. Default order is newest first.
pub fn query_rows(
    conn: &Connection,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<TransactionRow>> {
    let spec = filter_spec(sub, today)?;
    let loaded = SlotStore::new(conn).load()?;
    let filtered = filter_transactions(&loaded.records, &spec);
    let mut skipped = loaded.diagnostics();
    skipped.extend(filtered.diagnostics);
    warn_skipped(&skipped);

    let key = match sub.get_one::<String>("sort").map(String::as_str) {
        Some("amount") => SortKey::Amount,
        Some("category") => SortKey::Category,
        _ => SortKey::Date,
    };
    let dir = if sub.get_flag("asc") {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    let mut items = filtered.transactions;
    sort_transactions(&mut items, key, dir);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        items.truncate(*limit);
    }

    Ok(items
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date,
            description: t.description,
            category: t.category.name().to_string(),
            kind: if t.is_expense { "expense" } else { "income" },
            amount: fmt_money(&t.amount),
        })
        .collect())
}
