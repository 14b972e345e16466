//! Storage layer for fitlog.
//!
//! The [`Store`] owns the in-memory list of activities and mirrors it to a
//! comma-delimited file. The whole file is read once at startup and rewritten
//! after every append; no handle is kept open between operations.

pub mod schema;

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::activity::Activity;
use crate::error::{Error, Result};
use crate::summary::Summary;

use self::schema::{ColumnIndex, RowError, HEADER};

/// A data row that was left out while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file, when known.
    pub line: Option<u64>,
    /// Raw fields of the row as read.
    pub fields: Vec<String>,
    /// Why the row was rejected.
    pub reason: RowError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "[{}] ({})", self.fields.join(", "), self.reason)
    }
}

/// Activities read from a store file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    /// Valid rows, in file order.
    pub activities: Vec<Activity>,
    /// Rows that could not be turned into activities.
    pub skipped: Vec<SkippedRow>,
}

/// What happened when a [`Store`] was opened.
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file at the path; the store starts empty.
    Missing,
    /// The file was read. Malformed rows were skipped.
    Loaded {
        /// Number of activities kept.
        count: usize,
        /// Rows that were dropped.
        skipped: Vec<SkippedRow>,
    },
    /// The file exists but could not be read; the store starts empty.
    Failed(Error),
}

/// The activity log and its file mirror.
#[derive(Debug)]
pub struct Store {
    /// Path to the store file.
    path: PathBuf,
    /// Every logged activity, in insertion order.
    activities: Vec<Activity>,
}

impl Store {
    /// Create an empty store that will save to `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            activities: Vec::new(),
        }
    }

    /// Open the store at `path`, loading whatever it holds.
    ///
    /// Never fails: a missing or unreadable file yields an empty store, and
    /// the returned [`LoadOutcome`] says which case applied.
    pub fn open(path: impl AsRef<Path>) -> (Self, LoadOutcome) {
        let mut store = Self::new(path);

        let outcome = match load(&store.path) {
            Ok(Loaded {
                activities,
                skipped,
            }) => {
                store.activities = activities;
                LoadOutcome::Loaded {
                    count: store.activities.len(),
                    skipped,
                }
            }
            Err(e) if e.is_not_found() => {
                debug!("No store at {}, starting empty", store.path.display());
                LoadOutcome::Missing
            }
            Err(e) => {
                warn!("Failed to read store at {}: {e}", store.path.display());
                LoadOutcome::Failed(e)
            }
        };

        (store, outcome)
    }

    /// Get the path to the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All activities, oldest first.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Number of activities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Check whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Totals over every activity.
    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        Summary::of(&self.activities)
    }

    /// Rewrite the store file from memory.
    ///
    /// The new contents go to a temporary file next to the target which then
    /// replaces it, so a failed save leaves the previous file intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; memory is unaffected.
    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.activities).inspect_err(|e| {
            warn!("Failed to save store at {}: {e}", self.path.display());
        })
    }

    /// Add an activity to the end of the log and save.
    ///
    /// The activity is kept in memory even when saving fails.
    ///
    /// # Errors
    ///
    /// Returns the save error, if any.
    pub fn append(&mut self, activity: Activity) -> Result<()> {
        debug!("Appending activity: {activity}");
        self.activities.push(activity);
        self.save()
    }
}

/// Read every activity from the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if its header
/// lacks a required column. Malformed data rows are not errors; they are
/// reported in [`Loaded::skipped`].
pub fn load(path: &Path) -> Result<Loaded> {
    debug!("Loading activities from {}", path.display());
    let file = File::open(path).map_err(|source| Error::store_read(path, source))?;
    let loaded = read_activities(file, path)?;
    debug!(
        "Loaded {} activities ({} skipped) from {}",
        loaded.activities.len(),
        loaded.skipped.len(),
        path.display()
    );
    Ok(loaded)
}

fn read_activities(source: impl Read, path: &Path) -> Result<Loaded> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| read_error(path, e))?
        .clone();
    if headers.is_empty() {
        return Ok(Loaded::default());
    }

    let columns = ColumnIndex::resolve(&headers).map_err(|columns| Error::MissingColumns {
        path: path.to_path_buf(),
        columns,
    })?;

    let mut loaded = Loaded::default();
    for result in reader.byte_records() {
        let raw = result.map_err(|e| read_error(path, e))?;
        match StringRecord::from_byte_record(raw) {
            Ok(record) => match columns.parse(&record) {
                Ok(activity) => loaded.activities.push(activity),
                Err(reason) => {
                    loaded
                        .skipped
                        .push(skipped_row(&record.into_byte_record(), reason));
                }
            },
            Err(e) => {
                let reason = RowError::Unreadable(e.utf8_error().to_string());
                loaded.skipped.push(skipped_row(&e.into_byte_record(), reason));
            }
        }
    }

    Ok(loaded)
}

fn skipped_row(record: &ByteRecord, reason: RowError) -> SkippedRow {
    debug!("Skipping row: {reason}");
    SkippedRow {
        line: record.position().map(csv::Position::line),
        fields: record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect(),
        reason,
    }
}

fn read_error(path: &Path, err: csv::Error) -> Error {
    if err.is_io_error() {
        Error::store_read(path, io::Error::from(err))
    } else {
        Error::Csv(err)
    }
}

/// Write `activities` to `path`, replacing any existing file.
///
/// A symlinked store is written through to its target. A read-only store is
/// left alone.
///
/// # Errors
///
/// Returns an error if the existing file is read-only, or if the temporary
/// file cannot be written or moved into place.
pub fn save(path: &Path, activities: &[Activity]) -> Result<()> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = std::fs::metadata(&target).ok();

    if existing
        .as_ref()
        .is_some_and(|metadata| metadata.permissions().readonly())
    {
        return Err(Error::store_write(
            path,
            io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }

    let bytes = encode(activities).map_err(|source| Error::store_write(path, source))?;

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| Error::store_write(path, source))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|source| Error::store_write(path, source))?;

    // Keep the mode of the file being replaced.
    if let Some(metadata) = existing {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|source| Error::store_write(path, source))?;
    }

    tmp.persist(&target)
        .map_err(|e| Error::store_write(path, e.error))?;

    debug!(
        "Saved {} activities to {}",
        activities.len(),
        path.display()
    );
    Ok(())
}

fn encode(activities: &[Activity]) -> io::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for activity in activities {
        writer.serialize(activity)?;
    }

    writer.into_inner().map_err(|e| e.into_error())
}
