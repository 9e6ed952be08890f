//! # Storage Layer
//!
//! The [`RecordStore`] trait is the repository boundary for paired record
//! files: `{id:05}-{slug}.md` for the document and `{id:05}-{slug}.json`
//! for the metadata sidecar.
//!
//! Storage is abstracted behind a trait to keep the command logic testable
//! with [`memory::InMemoryStore`] and decoupled from the filesystem layout
//! that [`fs::FileStore`] implements.
//!
//! Absence is routine at this boundary: a missing metadata file reads as
//! `None` and a missing document reads as an empty line vector, because
//! "record doesn't exist yet" is a normal state in the link and sync
//! workflows. Only structural problems (unwritable files, invalid records)
//! surface as errors.

use crate::error::Result;
use crate::model::Record;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub trait RecordStore {
    /// Metadata for a record id; `None` when no matching sidecar exists.
    /// A corrupt sidecar yields a synthetic record with `Error` status and
    /// the parse failure as its title, never a hard error.
    fn read_metadata(&self, record_id: u32) -> Result<Option<Record>>;

    /// Document lines for a record id; empty when no matching file exists.
    fn read_content(&self, record_id: u32) -> Result<Vec<String>>;

    /// Assign the next id, validate, derive the file name, render the
    /// template and write both files. Returns the assigned id.
    fn write_record(&mut self, record: &mut Record) -> Result<u32>;

    /// Rewrite (or, for a bootstrapped record, create) the metadata sidecar
    /// only. Returns the number of bytes written.
    fn update_metadata(&mut self, record_id: u32, record: &Record) -> Result<usize>;

    /// Rewrite the document with backup-then-commit safety. Returns the
    /// number of characters written.
    fn update_content(&mut self, record: &Record, lines: &[String]) -> Result<usize>;

    /// Max existing id + 1; 1 for an empty folder.
    fn next_record_id(&self) -> Result<u32>;

    /// All record ids present, ascending and de-duplicated.
    fn record_ids(&self) -> Result<Vec<u32>>;

    /// Path of the record's document, for launching an editor.
    fn content_path(&self, record: &Record) -> Result<PathBuf>;

    /// Toggle the read-only flag on both files. Applied as a policy when a
    /// record enters or leaves the Accepted state.
    fn set_read_only(&mut self, record: &Record, read_only: bool) -> Result<()>;

    /// Whether the store already holds an initialized record folder.
    fn initialized(&self) -> bool;
}
