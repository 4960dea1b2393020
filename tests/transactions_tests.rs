// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendtrail::{
    cli,
    commands::transactions,
    db,
    models::StoredTransaction,
    store::{SlotStore, TRANSACTIONS_SLOT},
};

fn rec(id: &str, amt: &str, cat: &str, date: &str, expense: bool) -> StoredTransaction {
    StoredTransaction {
        id: id.into(),
        amount: amt.parse().unwrap(),
        description: format!("P{}", id),
        category: cat.into(),
        date: date.into(),
        is_expense: expense,
    }
}

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let store = SlotStore::new(&conn);
    let recs: Vec<_> = (1..=3)
        .map(|i| rec(&i.to_string(), "10", "Food", &format!("2025-01-0{}", i), true))
        .collect();
    store.save_transactions(&recs).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["spendtrail", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(conn, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["spendtrail", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m, today()).unwrap();
        }
    }
    panic!("no list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");
}

#[test]
fn list_defaults_to_current_month() {
    let conn = setup();
    let store = SlotStore::new(&conn);
    let mut recs = store.load_transactions().unwrap();
    recs.push(rec("old", "99", "Food", "2024-12-31", true));
    store.save_transactions(&recs).unwrap();

    assert_eq!(list_rows(&conn, &[]).len(), 3);
    assert_eq!(list_rows(&conn, &["--month", "2024-12"]).len(), 1);
    assert_eq!(list_rows(&conn, &["--range", "all"]).len(), 4);
    assert_eq!(list_rows(&conn, &["--offset", "-1"]).len(), 1);
    assert_eq!(list_rows(&conn, &["--month", "2025-02", "--offset", "-2"]).len(), 1);
    assert!(list_rows(&conn, &["--offset", "1"]).is_empty());
}

#[test]
fn list_sorts_by_amount_ascending() {
    let conn = setup();
    let store = SlotStore::new(&conn);
    let mut recs = store.load_transactions().unwrap();
    recs.push(rec("big", "500", "Housing", "2025-01-04", true));
    recs.push(rec("small", "1.5", "Travel", "2025-01-05", true));
    store.save_transactions(&recs).unwrap();

    let rows = list_rows(&conn, &["--sort", "amount", "--asc"]);
    assert_eq!(rows.first().unwrap().id, "small");
    assert_eq!(rows.last().unwrap().id, "big");
    assert_eq!(rows.last().unwrap().amount, "500.00");
}

#[test]
fn list_skips_malformed_records() {
    let conn = setup();
    let store = SlotStore::new(&conn);
    let mut recs = store.load_transactions().unwrap();
    recs.push(rec("bad", "5", "Food", "2025-13-01", true));
    store.save_transactions(&recs).unwrap();
    assert_eq!(list_rows(&conn, &[]).len(), 3);
}

#[test]
fn add_edit_remove_round_trip() {
    let conn = setup();
    run(
        &conn,
        &[
            "add",
            "--amount",
            "42.10",
            "--description",
            "Train ticket",
            "--category",
            "transportation",
            "--date",
            "2025-01-15",
        ],
    )
    .unwrap();

    let store = SlotStore::new(&conn);
    let recs = store.load_transactions().unwrap();
    assert_eq!(recs.len(), 4);
    let added = recs[0].clone();
    assert_eq!(added.description, "Train ticket");
    assert_eq!(added.category, "Transportation");
    assert_eq!(added.amount, "42.10".parse::<Decimal>().unwrap());
    assert!(added.is_expense);

    run(&conn, &["edit", &added.id, "--amount", "40", "--income"]).unwrap();
    let recs = store.load_transactions().unwrap();
    let edited = recs.iter().find(|r| r.id == added.id).unwrap();
    assert_eq!(edited.amount, Decimal::from(40));
    assert!(!edited.is_expense);
    assert_eq!(edited.description, "Train ticket");
    assert_eq!(edited.date, "2025-01-15");

    run(&conn, &["rm", &added.id]).unwrap();
    assert_eq!(store.load_transactions().unwrap().len(), 3);
}

#[test]
fn add_income_defaults_category_to_income() {
    let conn = setup();
    run(
        &conn,
        &["add", "--amount", "1000", "-d", "Salary", "--date", "2025-01-10", "--income"],
    )
    .unwrap();
    let recs = SlotStore::new(&conn).load_transactions().unwrap();
    assert_eq!(recs[0].category, "Income");
    assert!(!recs[0].is_expense);
}

#[test]
fn add_rejects_invalid_input() {
    let conn = setup();
    let err = run(&conn, &["add", "--amount", "-3", "--description", " "]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("greater than zero"), "{}", msg);
    assert!(msg.contains("Description is required"), "{}", msg);
    assert_eq!(SlotStore::new(&conn).load_transactions().unwrap().len(), 3);
}

#[test]
fn edit_and_remove_unknown_id_fail() {
    let conn = setup();
    assert!(run(&conn, &["edit", "nope", "--amount", "3"]).is_err());
    let err = run(&conn, &["rm", "nope"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn edit_keeps_a_stored_timestamp_as_its_date() {
    let conn = setup();
    let store = SlotStore::new(&conn);
    let mut recs = store.load_transactions().unwrap();
    recs.push(rec("stamped", "8", "Food", "2025-01-05T10:00:00", true));
    store.save_transactions(&recs).unwrap();

    run(&conn, &["edit", "stamped", "--amount", "12"]).unwrap();
    let recs = store.load_transactions().unwrap();
    let edited = recs.iter().find(|r| r.id == "stamped").unwrap();
    assert_eq!(edited.amount, Decimal::from(12));
    assert_eq!(edited.date, "2025-01-05");
}

#[test]
fn writes_keep_undecodable_elements() {
    let conn = setup();
    let store = SlotStore::new(&conn);
    let raw = store.get(TRANSACTIONS_SLOT).unwrap().unwrap();
    let patched = raw.replacen('[', r#"[{"id":"broken","amount":1,"date":null},"#, 1);
    store.set(TRANSACTIONS_SLOT, &patched).unwrap();

    assert_eq!(list_rows(&conn, &[]).len(), 3);
    run(&conn, &["add", "--amount", "4", "-d", "Coffee", "--date", "2025-01-06"]).unwrap();
    run(&conn, &["rm", "1"]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.records.len(), 3);
    assert_eq!(loaded.undecodable.len(), 1);
    assert_eq!(loaded.undecodable[0].diagnostic.id, "broken");
}
