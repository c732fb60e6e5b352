use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::record::{GameModeStats, Mode, VehicleRecord};

/// File name of the store inside the user's home directory.
pub const DB_FILE: &str = "thunderskill.db";

pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get a home dir")?;
    Ok(home.join(DB_FILE))
}

/// Deletes any previous dump at `path` and opens a fresh store with the
/// schema in place. Every run starts from scratch.
pub fn recreate(path: &Path) -> Result<Connection> {
    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "Removed previous dump"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to remove a previous dump at {:?}", path))
        }
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Opens an existing store without creating one.
pub fn connect(path: &Path) -> Result<Connection> {
    if !path.exists() {
        anyhow::bail!("No store at {:?}. Run 'run' first.", path);
    }
    Connection::open(path).with_context(|| format!("Failed to open {:?}", path))
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE vehicles (
            id                          INTEGER PRIMARY KEY NOT NULL,
            name                        TEXT NOT NULL,
            role                        TEXT NOT NULL,
            country                     TEXT NOT NULL,
            rank                        INTEGER NOT NULL,
            arcade_br                   INTEGER,
            arcade_battles              INTEGER,
            arcade_win_rate             REAL,
            arcade_downs_per_battle     REAL,
            arcade_downs_per_death      REAL,
            arcade_kills_per_battle     REAL,
            arcade_kills_per_death      REAL,
            realistic_br                INTEGER,
            realistic_battles           INTEGER,
            realistic_win_rate          REAL,
            realistic_downs_per_battle  REAL,
            realistic_downs_per_death   REAL,
            realistic_kills_per_battle  REAL,
            realistic_kills_per_death   REAL,
            simulation_br               INTEGER,
            simulation_battles          INTEGER,
            simulation_win_rate         REAL,
            simulation_downs_per_battle REAL,
            simulation_downs_per_death  REAL,
            simulation_kills_per_battle REAL,
            simulation_kills_per_death  REAL
        );
        ",
    )
    .context("Failed to create dump table")?;
    Ok(())
}

/// Durable destination for assembled records.
pub trait RecordSink {
    fn store(&mut self, record: &VehicleRecord) -> Result<()>;
}

const INSERT_VEHICLE: &str = "INSERT INTO vehicles (id, name, role, country, rank,
     arcade_br, arcade_battles, arcade_win_rate,
     arcade_downs_per_battle, arcade_downs_per_death, arcade_kills_per_battle, arcade_kills_per_death,
     realistic_br, realistic_battles, realistic_win_rate,
     realistic_downs_per_battle, realistic_downs_per_death, realistic_kills_per_battle, realistic_kills_per_death,
     simulation_br, simulation_battles, simulation_win_rate,
     simulation_downs_per_battle, simulation_downs_per_death, simulation_kills_per_battle, simulation_kills_per_death)
     VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,?22,?23,?24,?25,?26)";

/// SQLite-backed sink. One plain INSERT per record, no batching, so a
/// duplicate id is refused by the primary key.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordSink for Store {
    fn store(&mut self, record: &VehicleRecord) -> Result<()> {
        let a = ModeColumns::from(record.mode(Mode::Arcade));
        let r = ModeColumns::from(record.mode(Mode::Realistic));
        let s = ModeColumns::from(record.mode(Mode::Simulation));

        let mut stmt = self.conn.prepare_cached(INSERT_VEHICLE)?;
        stmt.execute(rusqlite::params![
            record.id, record.identity.name, record.identity.role, record.identity.country, record.rank,
            a.battle_rating, a.battles, a.win_rate, a.downs_per_battle, a.downs_per_death, a.kills_per_battle, a.kills_per_death,
            r.battle_rating, r.battles, r.win_rate, r.downs_per_battle, r.downs_per_death, r.kills_per_battle, r.kills_per_death,
            s.battle_rating, s.battles, s.win_rate, s.downs_per_battle, s.downs_per_death, s.kills_per_battle, s.kills_per_death,
        ])
        .with_context(|| format!("Failed to insert stats for vehicle {}", record.id))?;
        Ok(())
    }
}

/// The seven nullable columns of one mode.
#[derive(Default)]
struct ModeColumns {
    battle_rating: Option<u32>,
    battles: Option<u32>,
    win_rate: Option<f64>,
    downs_per_battle: Option<f64>,
    downs_per_death: Option<f64>,
    kills_per_battle: Option<f64>,
    kills_per_death: Option<f64>,
}

impl From<Option<&GameModeStats>> for ModeColumns {
    fn from(stats: Option<&GameModeStats>) -> Self {
        match stats {
            Some(s) => ModeColumns {
                battle_rating: Some(s.battle_rating),
                battles: Some(s.battles),
                win_rate: Some(s.win_rate),
                downs_per_battle: s.downs.per_battle,
                downs_per_death: s.downs.per_death,
                kills_per_battle: s.kills.per_battle,
                kills_per_death: s.kills.per_death,
            },
            None => ModeColumns::default(),
        }
    }
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub arcade: usize,
    pub realistic: usize,
    pub simulation: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM vehicles", [], |r| r.get(0))?;
    let arcade: usize = conn.query_row(
        "SELECT COUNT(*) FROM vehicles WHERE arcade_battles IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let realistic: usize = conn.query_row(
        "SELECT COUNT(*) FROM vehicles WHERE realistic_battles IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let simulation: usize = conn.query_row(
        "SELECT COUNT(*) FROM vehicles WHERE simulation_battles IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        total,
        arcade,
        realistic,
        simulation,
    })
}
