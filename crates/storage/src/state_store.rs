//! Atomic read/write of a slot's state document (§4.1 contract).

use crate::atomic::{write_atomic, AtomicWriter};
use crate::error::StorageError;
use crate::paths::SlotPaths;
use gk_core::{Slot, SlotId};
use std::path::Path;

/// Reads the state document, returning `None` if it has never been
/// created. Never blocks on a concurrent writer because writes are atomic
/// renames — a reader observes either the pre- or post-write document.
pub fn read_state(paths: &SlotPaths) -> Result<Option<Slot>, StorageError> {
    let path = paths.state_file();
    match std::fs::read(&path) {
        Ok(bytes) => {
            let slot: Slot = serde_json::from_slice(&bytes).map_err(|e| {
                StorageError::Corrupt {
                    path: path.display().to_string(),
                    detail: e.to_string(),
                }
            })?;
            Ok(Some(slot))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes the state document via write-temp + fsync + rename. On failure
/// the prior document is left intact.
pub fn write_state(writer: &dyn AtomicWriter, paths: &SlotPaths, slot: &Slot) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(slot)?;
    write_atomic(writer, &paths.state_file(), &bytes)
}

/// Loads the state document, creating and persisting a default one (per
/// `DEFAULT_SLOT_WORKER`/`DEFAULT_SLOT_MODE` env overrides) if absent. This
/// is `ensure_state_defaults` from the original supervisor, expressed as a
/// read-or-create instead of dict-default-filling since our documents are
/// typed records.
pub fn read_or_create_state(
    writer: &dyn AtomicWriter,
    paths: &SlotPaths,
    slot_id: SlotId,
) -> Result<Slot, StorageError> {
    if let Some(slot) = read_state(paths)? {
        return Ok(slot);
    }
    let slot = Slot::new_default(slot_id);
    write_state(writer, paths, &slot)?;
    Ok(slot)
}

/// Confirms the document directory path matches `slot.id` to guard against
/// a slot directory being renamed out from under a stale handle.
pub fn path_for(slots_root: &Path, slot_id: &SlotId) -> SlotPaths {
    SlotPaths::new(slots_root.join(slot_id.as_str()))
}

#[cfg(test)]
#[path = "state_store_tests.rs"]
mod tests;
