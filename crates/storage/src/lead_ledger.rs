//! Append-idempotent lead ledger (§4.1: `append_leads`, `existing_lead_keys`,
//! `mark_verified`).

use crate::atomic::{write_atomic, AtomicWriter};
use crate::error::StorageError;
use crate::paths::SlotPaths;
use chrono::Utc;
use gk_core::Lead;
use std::collections::BTreeMap;

/// Default bound for `existing_lead_keys`, matching §4.1's contract.
pub const DEFAULT_DEDUP_WINDOW: usize = 5000;

fn read_ledger(paths: &SlotPaths) -> Result<BTreeMap<String, Lead>, StorageError> {
    let path = paths.leads_file();
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    let mut map = BTreeMap::new();
    for (lineno, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Lead>(line) {
            Ok(lead) => {
                map.insert(lead.key.clone(), lead);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), line = lineno, error = %e, "skipping unparseable ledger line");
            }
        }
    }
    Ok(map)
}

fn write_ledger(writer: &dyn AtomicWriter, paths: &SlotPaths, ledger: &BTreeMap<String, Lead>) -> Result<(), StorageError> {
    let mut buf = String::new();
    for lead in ledger.values() {
        buf.push_str(&serde_json::to_string(lead)?);
        buf.push('\n');
    }
    write_atomic(writer, &paths.leads_file(), buf.as_bytes())
}

/// Idempotent-by-key append: a lead whose key already exists has its
/// mutable fields merged via [`Lead::apply_update`] rather than duplicated.
pub fn append_leads(writer: &dyn AtomicWriter, paths: &SlotPaths, leads: &[Lead]) -> Result<(), StorageError> {
    if leads.is_empty() {
        return Ok(());
    }
    let mut ledger = read_ledger(paths)?;
    for lead in leads {
        match ledger.get_mut(&lead.key) {
            Some(existing) => existing.apply_update(lead),
            None => {
                ledger.insert(lead.key.clone(), lead.clone());
            }
        }
    }
    write_ledger(writer, paths, &ledger)
}

/// Returns a bounded recent window of known keys for dedup, ordered by
/// `fetched_at` descending, per §4.1.
pub fn existing_lead_keys(paths: &SlotPaths, limit: usize) -> Result<Vec<String>, StorageError> {
    let ledger = read_ledger(paths)?;
    let mut leads: Vec<&Lead> = ledger.values().collect();
    leads.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));
    Ok(leads.into_iter().take(limit).map(|l| l.key.clone()).collect())
}

/// Bulk status transition to `verified` with `verified_at = now`.
/// Verification is monotonic (P4): leads already verified are left as-is.
pub fn mark_verified(writer: &dyn AtomicWriter, paths: &SlotPaths, keys: &[String]) -> Result<usize, StorageError> {
    let mut ledger = read_ledger(paths)?;
    let now = Utc::now();
    let mut changed = 0;
    for key in keys {
        if let Some(lead) = ledger.get_mut(key) {
            if !matches!(lead.status, gk_core::LeadStatus::Verified) {
                lead.mark_verified(now);
                changed += 1;
            }
        }
    }
    if changed > 0 {
        write_ledger(writer, paths, &ledger)?;
    }
    Ok(changed)
}

#[cfg(test)]
#[path = "lead_ledger_tests.rs"]
mod tests;
