//! Batch loading of people from a plain text file.
//!
//! Each non-blank line names one person:
//!
//! ```text
//! OLUWAFEMI SULE FELLOW Y
//! DOMINIC WALTERS STAFF
//! # comment lines are skipped
//! SIMON PATTERSON FELLOW N
//! ```
//!
//! The fields are first name, last name, role (`FELLOW` or `STAFF`) and an
//! optional accommodation flag (`Y` or `N`, default `N`). Matching is
//! case-insensitive.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::person::{Accommodation, Role};

/// One parsed line of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    /// First name as written.
    pub first_name: String,
    /// Last name as written.
    pub last_name: String,
    /// Staff or fellow.
    pub role: Role,
    /// Whether a living space was requested. Ignored for staff.
    pub accommodation: Accommodation,
}

impl PersonRecord {
    /// The person's display name, `"FIRST LAST"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Parses a single batch line.
///
/// Returns `Ok(None)` for blank and comment lines. `line_number` is 1-based
/// and only used in error messages.
///
/// # Errors
///
/// Returns [`Error::BatchFormat`] if the line has too few or too many fields,
/// or an unknown role or accommodation token.
///
/// # Examples
///
/// ```
/// use amity::batch::parse_line;
/// use amity::{Accommodation, Role};
///
/// let record = parse_line("Jane Doe fellow y", 1).unwrap().unwrap();
/// assert_eq!(record.full_name(), "Jane Doe");
/// assert_eq!(record.role, Role::Fellow);
/// assert_eq!(record.accommodation, Accommodation::Requested);
///
/// assert!(parse_line("   ", 2).unwrap().is_none());
/// assert!(parse_line("Jane Doe", 3).is_err());
/// ```
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<PersonRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let format_error = |reason: String| Error::BatchFormat {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let (first_name, last_name, role, accommodation) = match fields.as_slice() {
        [first, last, role] => (*first, *last, *role, None),
        [first, last, role, acc] => (*first, *last, *role, Some(*acc)),
        _ => {
            return Err(format_error(format!(
                "expected FIRST LAST ROLE [Y|N], found {} fields",
                fields.len()
            )))
        }
    };

    let role = role
        .parse::<Role>()
        .map_err(|_| format_error(format!("unknown role '{role}'")))?;
    let accommodation = accommodation
        .map(|token| {
            token
                .parse::<Accommodation>()
                .map_err(|_| format_error(format!("unknown accommodation flag '{token}'")))
        })
        .transpose()?
        .unwrap_or_default();

    Ok(Some(PersonRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role,
        accommodation,
    }))
}

/// Lazily parses records from any buffered reader.
///
/// I/O errors and malformed lines are yielded in place; iteration continues
/// past them.
pub fn read_records<B: BufRead>(reader: B) -> impl Iterator<Item = Result<PersonRecord>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(line) => parse_line(&line, index + 1).transpose(),
            Err(e) => Some(Err(Error::Io(e))),
        })
}

/// A batch file on disk.
///
/// Opening only checks that the file exists; every call to
/// [`BatchFile::records`] re-reads it from the start.
///
/// # Examples
///
/// ```
/// use amity::{Amity, BatchFile, RoomKind};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("people.txt");
/// std::fs::write(&path, "JANE DOE FELLOW Y\nJOHN ROE STAFF\n").unwrap();
///
/// let batch = BatchFile::open(&path).unwrap();
/// let mut amity = Amity::new();
/// amity.create_room("Blue", RoomKind::Office).unwrap();
/// let ids = amity.load_people(batch.records().unwrap()).unwrap();
/// assert_eq!(ids.len(), 2);
///
/// // Restartable
/// assert_eq!(batch.records().unwrap().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BatchFile {
    path: PathBuf,
}

impl BatchFile {
    /// Opens a batch file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the path does not name a regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound {
                resource: format!("batch file {}", path.display()),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Starts a fresh pass over the file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file can no longer be opened.
    pub fn records(&self) -> Result<impl Iterator<Item = Result<PersonRecord>>> {
        let file = File::open(&self.path)?;
        Ok(read_records(BufReader::new(file)))
    }
}
