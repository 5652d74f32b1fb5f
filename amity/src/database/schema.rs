//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key-value pairs: schema version, id counters, save time.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Rooms of both kinds. `position` preserves creation order within a kind.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        name TEXT PRIMARY KEY NOT NULL,
        kind TEXT NOT NULL CHECK (kind IN ('office', 'living_space')),
        position INTEGER NOT NULL
    )";

/// People of both roles with their current assignments.
pub const CREATE_PEOPLE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS people (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('STAFF', 'FELLOW')),
        accommodation TEXT,
        office TEXT,
        living_space TEXT,
        position INTEGER NOT NULL
    )";

/// Room occupant lists. `seat` preserves move-in order within a room.
pub const CREATE_OCCUPANCY_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS occupancy (
        room_name TEXT NOT NULL,
        person_id TEXT NOT NULL,
        seat INTEGER NOT NULL,
        PRIMARY KEY (room_name, person_id)
    )";

/// Speeds up loading a room's occupants.
pub const CREATE_OCCUPANCY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_occupancy_room ON occupancy(room_name, seat)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Upserts one metadata entry.
pub const UPSERT_METADATA: &str = "INSERT OR REPLACE INTO metadata (key, value) VALUES (?, ?)";

/// Reads one metadata entry.
pub const SELECT_METADATA: &str = "SELECT value FROM metadata WHERE key = ?";

/// Metadata key of the last issued staff sequence number.
pub const STAFF_COUNTER_KEY: &str = "staff_counter";

/// Metadata key of the last issued fellow sequence number.
pub const FELLOW_COUNTER_KEY: &str = "fellow_counter";

/// Metadata key of the RFC 3339 time of the last save.
pub const SAVED_AT_KEY: &str = "saved_at";

/// Insert one room at its creation position.
pub const INSERT_ROOM: &str = "INSERT INTO rooms (name, kind, position) VALUES (?, ?, ?)";

/// Insert one person with their room assignments.
pub const INSERT_PERSON: &str = r"
    INSERT INTO people (id, name, role, accommodation, office, living_space, position)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

/// Insert one occupancy row; `seat` keeps move-in order.
pub const INSERT_OCCUPANT: &str =
    "INSERT INTO occupancy (room_name, person_id, seat) VALUES (?, ?, ?)";

/// Select all rooms in creation order.
pub const SELECT_ROOMS: &str = "SELECT name, kind FROM rooms ORDER BY position";

/// Select all people in creation order.
pub const SELECT_PEOPLE: &str = r"
    SELECT id, name, role, accommodation, office, living_space
    FROM people
    ORDER BY position
";

/// Select one room's occupants in move-in order.
pub const SELECT_OCCUPANTS: &str =
    "SELECT person_id FROM occupancy WHERE room_name = ? ORDER BY seat";

/// Remove all rooms, people and occupancy rows before a rewrite.
pub const CLEAR_STATE: &str = r"
    DELETE FROM occupancy;
    DELETE FROM people;
    DELETE FROM rooms;
";
