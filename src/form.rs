// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Raw user input for a transaction and its validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Field, ValidationErrors};
use crate::models::{Category, StoredTransaction, max_amount};

pub const AMOUNT_MSG: &str = "Please enter a valid amount greater than zero";
pub const AMOUNT_TOO_LARGE_MSG: &str = "Amount is larger than the allowed maximum";
pub const DESCRIPTION_MSG: &str = "Description is required";
pub const DATE_MISSING_MSG: &str = "Date is required";
pub const DATE_FORMAT_MSG: &str = "Date must be YYYY-MM-DD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub amount: String,
    pub description: String,
    pub category: Category,
    pub date: String,
    pub is_expense: bool,
}

impl TransactionDraft {
    /// Blank expense form dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        TransactionDraft {
            amount: String::new(),
            description: String::new(),
            category: Category::Food,
            date: today.format("%Y-%m-%d").to_string(),
            is_expense: true,
        }
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<NewTransaction, ValidationErrors> {
        let mut errs = ValidationErrors::default();

        let amount = match self.amount.trim().parse::<Decimal>() {
            Ok(a) if a > max_amount() => {
                errs.push(Field::Amount, AMOUNT_TOO_LARGE_MSG);
                None
            }
            Ok(a) if a > Decimal::ZERO => Some(a),
            _ => {
                errs.push(Field::Amount, AMOUNT_MSG);
                None
            }
        };

        let description = self.description.trim();
        if description.is_empty() {
            errs.push(Field::Description, DESCRIPTION_MSG);
        }

        let raw_date = self.date.trim();
        let date = if raw_date.is_empty() {
            errs.push(Field::Date, DATE_MISSING_MSG);
            None
        } else {
            let parsed = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").ok();
            if parsed.is_none() {
                errs.push(Field::Date, DATE_FORMAT_MSG);
            }
            parsed
        };

        match (amount, date) {
            (Some(amount), Some(date)) if errs.is_empty() => Ok(NewTransaction {
                amount,
                description: description.to_string(),
                category: self.category,
                date,
                is_expense: self.is_expense,
            }),
            _ => Err(errs),
        }
    }
}

/// Validated field values, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub is_expense: bool,
}

impl NewTransaction {
    pub fn into_stored(self, id: String) -> StoredTransaction {
        StoredTransaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category.name().to_string(),
            date: self.date.format("%Y-%m-%d").to_string(),
            is_expense: self.is_expense,
        }
    }
}
