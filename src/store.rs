// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key/value slot store holding the serialized transaction list.

use chrono::{Days, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde_json::value::RawValue;

use crate::error::StoreError;
use crate::models::{Category, Diagnostic, RecordIssue, StoredTransaction};

pub const TRANSACTIONS_SLOT: &str = "transactions";

/// Contents of the transactions slot.
#[derive(Debug, Clone, Default)]
pub struct LoadedTransactions {
    pub records: Vec<StoredTransaction>,
    /// Elements that are not a readable transaction, kept verbatim so that
    /// saving does not destroy them.
    pub undecodable: Vec<Undecodable>,
}

#[derive(Debug, Clone)]
pub struct Undecodable {
    pub raw: Box<RawValue>,
    pub diagnostic: Diagnostic,
}

impl LoadedTransactions {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.undecodable
            .iter()
            .map(|u| u.diagnostic.clone())
            .collect()
    }
}

/// Best-effort id of an element that failed to decode.
fn record_id(raw: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(raw).ok()?.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub struct SlotStore<'a> {
    conn: &'a Connection,
}

impl<'a> SlotStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SlotStore { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM slots WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO slots(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// Decodes the slot element by element. A missing slot reads as empty;
    /// only a slot that is not a JSON array at all is `Corrupt`.
    pub fn load(&self) -> Result<LoadedTransactions, StoreError> {
        let Some(raw) = self.get(TRANSACTIONS_SLOT)? else {
            return Ok(LoadedTransactions::default());
        };
        let items: Vec<Box<RawValue>> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                slot: TRANSACTIONS_SLOT,
                source,
            })?;
        let mut loaded = LoadedTransactions::default();
        for (pos, item) in items.into_iter().enumerate() {
            match serde_json::from_str::<StoredTransaction>(item.get()) {
                Ok(rec) => loaded.records.push(rec),
                Err(e) => {
                    let id = record_id(item.get()).unwrap_or_else(|| format!("#{}", pos));
                    tracing::warn!(%id, error = %e, "undecodable transaction record");
                    loaded.undecodable.push(Undecodable {
                        raw: item,
                        diagnostic: Diagnostic {
                            id,
                            issue: RecordIssue::Undecodable(e.to_string()),
                        },
                    });
                }
            }
        }
        tracing::debug!(
            count = loaded.records.len(),
            undecodable = loaded.undecodable.len(),
            "loaded transactions"
        );
        Ok(loaded)
    }

    /// Writes the records followed by the untouched undecodable elements.
    pub fn save(&self, loaded: &LoadedTransactions) -> Result<(), StoreError> {
        let encode = |source| StoreError::Encode {
            slot: TRANSACTIONS_SLOT,
            source,
        };
        let mut items = Vec::with_capacity(loaded.records.len() + loaded.undecodable.len());
        for rec in &loaded.records {
            items.push(serde_json::value::to_raw_value(rec).map_err(encode)?);
        }
        items.extend(loaded.undecodable.iter().map(|u| u.raw.clone()));
        let raw = serde_json::to_string(&items).map_err(encode)?;
        self.set(TRANSACTIONS_SLOT, &raw)?;
        tracing::debug!(count = items.len(), "saved transactions");
        Ok(())
    }

    /// Decodable records only.
    pub fn load_transactions(&self) -> Result<Vec<StoredTransaction>, StoreError> {
        Ok(self.load()?.records)
    }

    /// Replaces the whole slot with `records`.
    pub fn save_transactions(&self, records: &[StoredTransaction]) -> Result<(), StoreError> {
        self.save(&LoadedTransactions {
            records: records.to_vec(),
            undecodable: Vec::new(),
        })
    }

    /// Writes the demo dataset when the slot has never been written.
    /// An existing but empty list is left alone.
    pub fn seed_if_empty(&self, today: NaiveDate) -> Result<bool, StoreError> {
        if self.get(TRANSACTIONS_SLOT)?.is_some() {
            return Ok(false);
        }
        let demo = demo_transactions(today);
        self.save_transactions(&demo)?;
        tracing::info!(count = demo.len(), "seeded demonstration transactions");
        Ok(true)
    }
}

/// Ten sample records dated relative to `today`.
pub fn demo_transactions(today: NaiveDate) -> Vec<StoredTransaction> {
    let rows: [(&str, i64, &str, Category, u64, bool); 10] = [
        ("1", 2000, "Monthly Salary", Category::Income, 2, false),
        ("2", 800, "Rent Payment", Category::Housing, 5, true),
        ("3", 120, "Grocery Shopping", Category::Food, 7, true),
        ("4", 50, "Gas", Category::Transportation, 10, true),
        ("5", 35, "Movie Night", Category::Entertainment, 12, true),
        ("6", 500, "Freelance Work", Category::Income, 15, false),
        ("7", 200, "Health Insurance", Category::Insurance, 18, true),
        ("8", 75, "Internet Bill", Category::Utilities, 20, true),
        ("9", 60, "Phone Bill", Category::Utilities, 25, true),
        ("10", 150, "New Clothes", Category::Shopping, 28, true),
    ];
    rows.into_iter()
        .map(|(id, amount, desc, cat, days_ago, is_expense)| {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            StoredTransaction {
                id: id.to_string(),
                amount: Decimal::from(amount),
                description: desc.to_string(),
                category: cat.name().to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                is_expense,
            }
        })
        .collect()
}
