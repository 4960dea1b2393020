// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendtrail::{
    cli,
    commands::{doctor, reports},
    db,
    models::{Category, RecordIssue, StoredTransaction},
    store::{SlotStore, TRANSACTIONS_SLOT},
};
use tempfile::tempdir;

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

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup(recs: &[StoredTransaction]) -> Connection {
    let conn = db::open_in_memory().unwrap();
    SlotStore::new(&conn).save_transactions(recs).unwrap();
    conn
}

fn report_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendtrail", "report"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    match m.subcommand() {
        Some(("report", r)) => match r.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no report subcommand"),
        },
        _ => panic!("no report command"),
    }
}

#[test]
fn january_summary_from_store() {
    let conn = setup(&[
        rec("1", "100", "Food", "2024-01-05", true),
        rec("2", "50", "Food", "2024-01-05", true),
        rec("3", "2000", "Income", "2024-01-01", false),
        rec("4", "75", "Utilities", "2024-02-01", true),
    ]);
    let sub = report_matches(&["summary", "--from", "2024-01-01", "--to", "2024-01-31"]);
    let (spec, s) = reports::build(&conn, &sub).unwrap();
    assert_eq!(spec.date_range.end.to_string(), "2024-01-31");
    assert_eq!(s.totals.income, dec("2000"));
    assert_eq!(s.totals.expense, dec("150"));
    assert_eq!(s.totals.net, dec("1850"));
    assert_eq!(s.breakdown.len(), 1);
    assert_eq!(s.breakdown[0].category, Category::Food);
    assert_eq!(s.trend.len(), 1);
    assert_eq!(s.trend[0].amount, dec("150"));
}

#[test]
fn category_filter_narrows_report() {
    let conn = setup(&[
        rec("1", "30", "Food", "2024-03-02", true),
        rec("2", "80", "Travel", "2024-03-03", true),
        rec("3", "900", "Income", "2024-03-04", false),
    ]);
    let sub = report_matches(&["categories", "--month", "2024-03", "--category", "travel"]);
    let (_, s) = reports::build(&conn, &sub).unwrap();
    assert_eq!(s.transactions.len(), 1);
    assert_eq!(s.totals.income, Decimal::ZERO);
    assert_eq!(s.totals.expense, dec("80"));
    assert_eq!(s.breakdown[0].category, Category::Travel);
}

#[test]
fn unknown_category_filter_is_an_error() {
    let conn = setup(&[]);
    let sub = report_matches(&["trend", "--category", "Groceries"]);
    let err = reports::build(&conn, &sub).unwrap_err();
    assert!(err.to_string().contains("Unknown category"));
}

#[test]
fn empty_store_reports_zero() {
    let conn = setup(&[]);
    let sub = report_matches(&["summary", "--range", "all"]);
    let (_, s) = reports::build(&conn, &sub).unwrap();
    assert!(s.transactions.is_empty());
    assert_eq!(s.totals.net, Decimal::ZERO);
    assert!(s.breakdown.is_empty() && s.trend.is_empty() && s.diagnostics.is_empty());
}

#[test]
fn malformed_records_surface_as_diagnostics() {
    let conn = setup(&[
        rec("1", "30", "Food", "2024-03-02", true),
        rec("2", "30", "Food", "03/02/2024", true),
        rec("3", "5", "Snacks", "2024-03-02", true),
    ]);
    let sub = report_matches(&["summary", "--month", "2024-03"]);
    let (_, s) = reports::build(&conn, &sub).unwrap();
    assert_eq!(s.totals.expense, dec("30"));
    assert_eq!(s.diagnostics.len(), 2);

    let issues = doctor::check(&conn).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].issue, RecordIssue::InvalidDate("03/02/2024".into()));
    assert_eq!(issues[1].issue, RecordIssue::UnknownCategory("Snacks".into()));
}

#[test]
fn undecodable_element_does_not_hide_the_rest() {
    let conn = db::open_in_memory().unwrap();
    SlotStore::new(&conn)
        .set(
            TRANSACTIONS_SLOT,
            r#"[
            {"id":"1","amount":40,"description":"Rent","category":"Housing","date":"2024-03-01","isExpense":true},
            {"id":"2","amount":15,"description":"Lunch","category":"Food","date":null,"isExpense":true},
            {"id":"3","amount":60,"description":"Pay","category":"Income","date":"2024-03-04","isExpense":false}
        ]"#,
        )
        .unwrap();

    let sub = report_matches(&["summary", "--month", "2024-03"]);
    let (_, s) = reports::build(&conn, &sub).unwrap();
    assert_eq!(s.transactions.len(), 2);
    assert_eq!(s.totals.expense, dec("40"));
    assert_eq!(s.totals.net, dec("20"));
    assert_eq!(s.diagnostics.len(), 1);
    assert!(matches!(s.diagnostics[0].issue, RecordIssue::Undecodable(_)));

    let issues = doctor::check(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "2");
}

#[test]
fn file_store_persists_between_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("store.sqlite");
    {
        let conn = db::open_or_init(&path).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert!(SlotStore::new(&conn).seed_if_empty(today).unwrap());
    }
    let conn = db::open_or_init(&path).unwrap();
    let store = SlotStore::new(&conn);
    assert_eq!(store.load_transactions().unwrap().len(), 10);
    assert!(!store.seed_if_empty(chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()).unwrap());

    let sub = report_matches(&["categories", "--from", "2024-06-01", "--to", "2024-06-30"]);
    let (_, s) = reports::build(&conn, &sub).unwrap();
    let cats: Vec<Category> = s.breakdown.iter().map(|e| e.category).collect();
    assert_eq!(cats[0], Category::Housing);
    assert!(!cats.contains(&Category::Income));
}
