use super::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn write_atomic_creates_target_with_content() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("state.json");
    write_atomic(&FsAtomicWriter, &target, b"{\"a\":1}").unwrap();
    let contents = std::fs::read_to_string(&target).unwrap();
    assert_eq!(contents, "{\"a\":1}");
}

#[test]
fn write_atomic_leaves_no_tmp_file_behind() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("state.json");
    write_atomic(&FsAtomicWriter, &target, b"x").unwrap();
    let tmp = tmp_path_for(&target);
    assert!(!tmp.exists());
}

#[test]
fn write_atomic_overwrites_existing_target() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("state.json");
    write_atomic(&FsAtomicWriter, &target, b"first").unwrap();
    write_atomic(&FsAtomicWriter, &target, b"second").unwrap();
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
}

struct FailingWriter {
    fail_rename: AtomicBool,
    inner: FsAtomicWriter,
}

impl AtomicWriter for FailingWriter {
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        self.inner.write_tmp(path, data)
    }
    fn fsync_file(&self, path: &Path) -> Result<(), StorageError> {
        self.inner.fsync_file(path)
    }
    fn rename(&self, from: &Path, to: &Path) -> Result<(), StorageError> {
        if self.fail_rename.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected rename failure",
            )));
        }
        self.inner.rename(from, to)
    }
    fn fsync_dir(&self, path: &Path) -> Result<(), StorageError> {
        self.inner.fsync_dir(path)
    }
}

#[test]
fn failed_rename_leaves_target_absent() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("state.json");
    let writer = FailingWriter {
        fail_rename: AtomicBool::new(true),
        inner: FsAtomicWriter,
    };
    let result = write_atomic(&writer, &target, b"data");
    assert!(result.is_err());
    assert!(!target.exists());
}

#[test]
fn failed_write_never_produces_partial_target() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("state.json");
    write_atomic(&FsAtomicWriter, &target, b"stable").unwrap();

    let writer = Arc::new(FailingWriter {
        fail_rename: AtomicBool::new(true),
        inner: FsAtomicWriter,
    });
    let _ = write_atomic(writer.as_ref(), &target, b"corrupt-attempt");
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "stable");
}
