//! Reading and writing allocation state.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::error::{Error, Result};
use crate::id::{IdGenerator, PersonId};
use crate::person::{Accommodation, Person, Role};
use crate::room::{Room, RoomKind};
use crate::snapshot::StateSnapshot;

use super::config::DatabaseConfig;
use super::connection::Database;
use super::schema::{
    CLEAR_STATE, FELLOW_COUNTER_KEY, INSERT_OCCUPANT, INSERT_PERSON, INSERT_ROOM, SAVED_AT_KEY,
    SELECT_METADATA, SELECT_OCCUPANTS, SELECT_PEOPLE, SELECT_ROOMS, STAFF_COUNTER_KEY,
    UPSERT_METADATA,
};

fn corruption(details: impl Into<String>) -> Error {
    Error::DatabaseCorruption {
        details: details.into(),
    }
}

/// One row of the people table, before validation.
struct PersonRow {
    id: String,
    name: String,
    role: String,
    accommodation: Option<String>,
    office: Option<String>,
    living_space: Option<String>,
}

impl PersonRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            role: row.get(2)?,
            accommodation: row.get(3)?,
            office: row.get(4)?,
            living_space: row.get(5)?,
        })
    }

    fn into_person(self) -> Result<Person> {
        let id: PersonId = self
            .id
            .parse()
            .map_err(|_| corruption(format!("invalid person id '{}'", self.id)))?;
        let role: Role = self
            .role
            .parse()
            .map_err(|_| corruption(format!("{id} has unknown role '{}'", self.role)))?;

        let person = match role {
            Role::Staff => Person::staff(id.clone(), &self.name),
            Role::Fellow => {
                let accommodation = self
                    .accommodation
                    .as_deref()
                    .map(str::parse::<Accommodation>)
                    .transpose()
                    .map_err(|_| corruption(format!("{id} has an invalid accommodation flag")))?
                    .unwrap_or_default();
                Person::fellow(id.clone(), &self.name, accommodation)
            }
        };

        person
            .and_then(|p| p.with_assignments(self.office, self.living_space))
            .map_err(|e| corruption(format!("{id}: {e}")))
    }
}

impl Database {
    /// Replaces the stored state with `snapshot`.
    ///
    /// Runs in a single IMMEDIATE transaction, so readers see either the old
    /// state or the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started, any write
    /// fails, or the commit fails.
    pub fn write_snapshot(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(CLEAR_STATE)?;

        let mut position: i64 = 0;
        for room in snapshot.rooms() {
            tx.execute(INSERT_ROOM, params![room.name(), room.kind().as_str(), position])?;
            let mut seat: i64 = 0;
            for occupant in room.occupants() {
                tx.execute(INSERT_OCCUPANT, params![room.name(), occupant.as_str(), seat])?;
                seat += 1;
            }
            position += 1;
        }

        let mut position: i64 = 0;
        for person in snapshot.people() {
            tx.execute(
                INSERT_PERSON,
                params![
                    person.id().as_str(),
                    person.name(),
                    person.role().to_string(),
                    person.accommodation().map(Accommodation::token),
                    person.office(),
                    person.living_space(),
                    position,
                ],
            )?;
            position += 1;
        }

        let counters = [
            (STAFF_COUNTER_KEY, snapshot.ids.last_issued(Role::Staff)),
            (FELLOW_COUNTER_KEY, snapshot.ids.last_issued(Role::Fellow)),
        ];
        for (key, value) in counters {
            tx.execute(UPSERT_METADATA, params![key, value.to_string()])?;
        }
        tx.execute(UPSERT_METADATA, params![SAVED_AT_KEY, Utc::now().to_rfc3339()])?;

        tx.commit()?;
        log::debug!(
            "wrote {} rooms and {} people to {}",
            snapshot.offices.len() + snapshot.living_spaces.len(),
            snapshot.staff.len() + snapshot.fellows.len(),
            self.config().path.display()
        );
        Ok(())
    }

    /// Reads the stored state.
    ///
    /// Returns `Ok(None)` if nothing has been saved to this store yet, or if
    /// what was saved is an empty state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if stored rows cannot be turned
    /// back into rooms and people, or a database error if a query fails.
    pub fn read_snapshot(&self) -> Result<Option<StateSnapshot>> {
        if self.saved_at()?.is_none() {
            return Ok(None);
        }

        let ids = IdGenerator::resume(
            self.read_counter(STAFF_COUNTER_KEY)?,
            self.read_counter(FELLOW_COUNTER_KEY)?,
        );
        let mut snapshot = StateSnapshot {
            ids,
            ..StateSnapshot::default()
        };

        let rooms = {
            let mut stmt = self.conn.prepare(SELECT_ROOMS)?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        let mut occupants_stmt = self.conn.prepare(SELECT_OCCUPANTS)?;
        for (name, kind) in rooms {
            let kind: RoomKind = kind
                .parse()
                .map_err(|_| corruption(format!("room '{name}' has unknown kind '{kind}'")))?;
            let occupants = occupants_stmt
                .query_map([&name], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?
                .into_iter()
                .map(|raw| {
                    raw.parse::<PersonId>()
                        .map_err(|_| corruption(format!("room '{name}' lists invalid id '{raw}'")))
                })
                .collect::<Result<Vec<_>>>()?;

            let room = Room::with_occupants(&name, kind, occupants)?;
            match kind {
                RoomKind::Office => snapshot.offices.push(room),
                RoomKind::LivingSpace => snapshot.living_spaces.push(room),
            }
        }

        let rows = {
            let mut stmt = self.conn.prepare(SELECT_PEOPLE)?;
            let rows = stmt.query_map([], PersonRow::from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        for row in rows {
            let person = row.into_person()?;
            match person.role() {
                Role::Staff => snapshot.staff.push(person),
                Role::Fellow => snapshot.fellows.push(person),
            }
        }

        if snapshot.is_empty() {
            return Ok(None);
        }
        Ok(Some(snapshot))
    }

    /// When state was last written to this store, if ever.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored time is not valid
    /// RFC 3339.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.read_metadata(SAVED_AT_KEY)? else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(&raw)
            .map(|time| Some(time.with_timezone(&Utc)))
            .map_err(|e| corruption(format!("invalid save time '{raw}': {e}")))
    }

    fn read_metadata(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(SELECT_METADATA, [key], |row| row.get(0))
            .optional()?)
    }

    fn read_counter(&self, key: &str) -> Result<u32> {
        match self.read_metadata(key)? {
            Some(raw) => raw
                .parse()
                .map_err(|_| corruption(format!("{key} '{raw}' is not a number"))),
            None => Ok(0),
        }
    }
}

/// Writes `snapshot` to a fresh store at `path`.
///
/// Any existing file at `path` is deleted first; the store holds exactly
/// this snapshot afterwards.
///
/// # Errors
///
/// Returns an error if the old file cannot be removed or the new store
/// cannot be written.
pub fn save_state(path: impl AsRef<Path>, snapshot: &StateSnapshot) -> Result<()> {
    save_state_with(DatabaseConfig::new(path), snapshot)
}

/// [`save_state`] with explicit connection settings.
///
/// # Errors
///
/// See [`save_state`].
pub fn save_state_with(config: DatabaseConfig, snapshot: &StateSnapshot) -> Result<()> {
    if config.path.exists() {
        log::info!("replacing previous state store {}", config.path.display());
        for path in store_files(&config.path) {
            match std::fs::remove_file(&path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
    }

    let mut db = Database::open(config)?;
    db.write_snapshot(snapshot)
}

/// Reads the state stored at `path`.
///
/// Returns `Ok(None)` if the store exists but holds no saved state.
///
/// # Errors
///
/// Returns [`Error::StoreNotFound`] if there is no file at `path`,
/// [`Error::UnsupportedSchemaVersion`] or [`Error::DatabaseCorruption`] if
/// the store cannot be understood, or a database error.
pub fn load_state(path: impl AsRef<Path>) -> Result<Option<StateSnapshot>> {
    load_state_with(DatabaseConfig::new(path))
}

/// [`load_state`] with explicit connection settings.
///
/// # Errors
///
/// See [`load_state`].
pub fn load_state_with(config: DatabaseConfig) -> Result<Option<StateSnapshot>> {
    if !config.path.is_file() {
        return Err(Error::StoreNotFound { path: config.path });
    }
    let db = Database::open(config.existing_only())?;
    db.read_snapshot()
}

/// The database file plus its WAL companions.
fn store_files(path: &Path) -> [PathBuf; 3] {
    let with_suffix = |suffix: &str| {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    };
    [path.to_path_buf(), with_suffix("-wal"), with_suffix("-shm")]
}
