// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use uuid::Uuid;

use crate::error::LedgerError;
use crate::form::NewTransaction;
use crate::models::StoredTransaction;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Newest records go to the front of the list.
pub fn add(records: &mut Vec<StoredTransaction>, new: NewTransaction) -> StoredTransaction {
    let stored = new.into_stored(new_id());
    records.insert(0, stored.clone());
    tracing::debug!(id = %stored.id, "added transaction");
    stored
}

pub fn find<'a>(records: &'a [StoredTransaction], id: &str) -> Option<&'a StoredTransaction> {
    records.iter().find(|r| r.id == id)
}

/// Replaces every field of the record with `id`, keeping its position.
pub fn update(
    records: &mut [StoredTransaction],
    id: &str,
    new: NewTransaction,
) -> Result<(), LedgerError> {
    let slot = records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
    *slot = new.into_stored(id.to_string());
    tracing::debug!(id, "updated transaction");
    Ok(())
}

pub fn remove(records: &mut Vec<StoredTransaction>, id: &str) -> Result<StoredTransaction, LedgerError> {
    let pos = records
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
    tracing::debug!(id, "removed transaction");
    Ok(records.remove(pos))
}
