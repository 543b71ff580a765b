use std::fs;
use tempfile::TempDir;
use wp_docx_engine::{require_output_dir, AtomicFileWriter, PersistError};

#[test]
fn missing_output_dir_is_not_created() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    let err = require_output_dir(&new_dir).unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(ref dir) if *dir == new_dir));
    assert!(!new_dir.exists());
    require_output_dir(temp.path()).unwrap();
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("export.docx");
    let writer = AtomicFileWriter::new(&target);

    let first = writer.write(b"hello").unwrap();
    assert_eq!(first, target);
    assert_eq!(fs::read(&first).unwrap(), b"hello");

    // Replace existing
    let second = writer.write(b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");
}

#[test]
fn write_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("deeper").join("out.docx");

    let err = AtomicFileWriter::new(&target).write(b"data").unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(_)));
    assert!(!temp.path().join("nested").exists());
}

#[test]
fn no_partial_file_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.join("doc.docx"));
    let result = writer.write(b"data");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}

#[test]
fn directory_destination_is_rejected() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());
    let err = writer.write(b"data").unwrap_err();
    assert!(matches!(err, PersistError::DestinationIsDir(_)));
}
