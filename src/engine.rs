// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filtering and aggregation over a transaction collection.
//!
//! Every function here is pure: inputs are borrowed, never mutated, and the
//! same inputs always produce the same output. Records that fail integrity
//! checks are skipped and reported as [`Diagnostic`]s instead of aborting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::categories;
use crate::models::{
    BreakdownEntry, Category, Diagnostic, FilterSpec, Filtered, RecordIssue, SortDirection,
    SortKey, StoredTransaction, Summary, Totals, Transaction, TrendPoint, max_amount,
};

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a stored date, dropping any time-of-day part.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .map(|dt| dt.date())
}

impl TryFrom<&StoredTransaction> for Transaction {
    type Error = RecordIssue;

    fn try_from(raw: &StoredTransaction) -> Result<Self, Self::Error> {
        let date = parse_record_date(&raw.date)
            .ok_or_else(|| RecordIssue::InvalidDate(raw.date.clone()))?;
        let category = raw
            .category
            .parse::<Category>()
            .map_err(|_| RecordIssue::UnknownCategory(raw.category.clone()))?;
        if raw.amount <= Decimal::ZERO {
            return Err(RecordIssue::NonPositiveAmount(raw.amount));
        }
        if raw.amount > max_amount() {
            return Err(RecordIssue::AmountTooLarge(raw.amount));
        }
        Ok(Transaction {
            id: raw.id.clone(),
            amount: raw.amount,
            description: raw.description.clone(),
            category,
            date,
            is_expense: raw.is_expense,
        })
    }
}

/// Saturating sum; per-record amounts are capped at `max_amount()`.
fn add(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or(Decimal::MAX)
}

fn skipped(raw: &StoredTransaction, issue: RecordIssue) -> Diagnostic {
    tracing::warn!(id = %raw.id, %issue, "skipping malformed transaction record");
    Diagnostic {
        id: raw.id.clone(),
        issue,
    }
}

/// Records dated within `spec.date_range` (both ends inclusive) whose
/// category passes `spec.category`, in input order.
pub fn filter_transactions(all: &[StoredTransaction], spec: &FilterSpec) -> Filtered {
    let mut out = Filtered::default();
    for raw in all {
        match Transaction::try_from(raw) {
            Ok(t) => {
                if spec.date_range.contains(t.date) && spec.category.matches(t.category) {
                    out.transactions.push(t);
                }
            }
            Err(issue) => out.diagnostics.push(skipped(raw, issue)),
        }
    }
    tracing::debug!(
        kept = out.transactions.len(),
        skipped = out.diagnostics.len(),
        start = %spec.date_range.start,
        end = %spec.date_range.end,
        "filtered transactions"
    );
    out
}

pub fn compute_totals(filtered: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in filtered {
        if t.is_expense {
            expense = add(expense, t.amount);
        } else {
            income = add(income, t.amount);
        }
    }
    Totals {
        income,
        expense,
        net: income - expense,
    }
}

/// Expense totals per category, largest first. Income never appears here.
pub fn compute_category_breakdown(filtered: &[Transaction]) -> Vec<BreakdownEntry> {
    let mut by_cat: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in filtered.iter().filter(|t| t.is_expense) {
        let sum = by_cat.entry(t.category).or_insert(Decimal::ZERO);
        *sum = add(*sum, t.amount);
    }
    let mut entries: Vec<BreakdownEntry> = by_cat
        .into_iter()
        .map(|(category, amount)| BreakdownEntry {
            category,
            amount,
            color: categories::color(category),
        })
        .collect();
    // stable: equal amounts keep category declaration order
    entries.sort_by(|a, b| b.amount.cmp(&a.amount));
    entries
}

/// Daily expense totals, oldest first. Days without expenses are absent.
pub fn compute_trend(filtered: &[Transaction]) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for t in filtered.iter().filter(|t| t.is_expense) {
        let sum = by_day.entry(t.date).or_insert(Decimal::ZERO);
        *sum = add(*sum, t.amount);
    }
    by_day
        .into_iter()
        .map(|(date, amount)| TrendPoint { date, amount })
        .collect()
}

pub fn summarize(all: &[StoredTransaction], spec: &FilterSpec) -> Summary {
    let Filtered {
        transactions,
        diagnostics,
    } = filter_transactions(all, spec);
    Summary {
        totals: compute_totals(&transactions),
        breakdown: compute_category_breakdown(&transactions),
        trend: compute_trend(&transactions),
        transactions,
        diagnostics,
    }
}

pub fn sort_transactions(items: &mut [Transaction], key: SortKey, dir: SortDirection) {
    let cmp = |a: &Transaction, b: &Transaction| -> Ordering {
        match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Category => a.category.name().cmp(b.category.name()),
        }
    };
    match dir {
        SortDirection::Asc => items.sort_by(cmp),
        SortDirection::Desc => items.sort_by(|a, b| cmp(b, a)),
    }
}

/// Integrity report over the whole collection, independent of any filter.
pub fn scan(all: &[StoredTransaction]) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in all {
        if !seen.insert(raw.id.as_str()) {
            out.push(skipped(raw, RecordIssue::DuplicateId));
        }
        if let Err(issue) = Transaction::try_from(raw) {
            out.push(skipped(raw, issue));
        }
    }
    out
}
