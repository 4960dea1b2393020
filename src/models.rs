// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseCategoryError;

/// Largest amount a single transaction may carry. Keeps every sum over a
/// realistic collection far below `Decimal::MAX`.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

/// Fixed set of spending/earning categories. Declaration order is the
/// display order and the tie-break order for breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    Healthcare,
    Entertainment,
    Shopping,
    Personal,
    Education,
    Travel,
    Investments,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Housing,
        Category::Transportation,
        Category::Food,
        Category::Utilities,
        Category::Insurance,
        Category::Healthcare,
        Category::Entertainment,
        Category::Shopping,
        Category::Personal,
        Category::Education,
        Category::Travel,
        Category::Investments,
        Category::Income,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Insurance => "Insurance",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Personal => "Personal",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Investments => "Investments",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(wanted.to_string()))
    }
}

/// Persisted shape of a transaction. `date` and `category` stay textual so
/// that one damaged record cannot make the whole collection unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTransaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: String, // YYYY-MM-DD
    pub is_expense: bool,
}

/// A stored record that passed integrity checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub is_expense: bool,
}

impl From<&Transaction> for StoredTransaction {
    fn from(t: &Transaction) -> Self {
        StoredTransaction {
            id: t.id.clone(),
            amount: t.amount,
            description: t.description.clone(),
            category: t.category.name().to_string(),
            date: t.date.format("%Y-%m-%d").to_string(),
            is_expense: t.is_expense,
        }
    }
}

/// Why a stored record was left out of aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordIssue {
    InvalidDate(String),
    UnknownCategory(String),
    NonPositiveAmount(Decimal),
    AmountTooLarge(Decimal),
    Undecodable(String),
    DuplicateId,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::InvalidDate(d) => write!(f, "invalid date '{}'", d),
            RecordIssue::UnknownCategory(c) => write!(f, "unknown category '{}'", c),
            RecordIssue::NonPositiveAmount(a) => write!(f, "amount {} is not positive", a),
            RecordIssue::AmountTooLarge(a) => {
                write!(f, "amount {} exceeds the maximum of {}", a, max_amount())
            }
            RecordIssue::Undecodable(e) => write!(f, "unreadable record: {}", e),
            RecordIssue::DuplicateId => f.write_str("id used by more than one record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub id: String,
    pub issue: RecordIssue,
}

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_range: DateRange,
    pub category: CategoryFilter,
}

/// Output of filtering: the surviving records plus any records skipped for
/// integrity problems.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Filtered {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub category: Category,
    pub amount: Decimal,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub breakdown: Vec<BreakdownEntry>,
    pub trend: Vec<TrendPoint>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}
