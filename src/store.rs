//! JSON snapshot persistence.
//!
//! Clients and events persist as two independent files, each a versioned
//! wrapper around a plain ordered list of records. The store knows nothing
//! about engine semantics: it loads what is on disk and writes what it is
//! given; the engine re-derives conflict state on load.

use anyhow::{bail, Context, Result};
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::models::{Client, Event};

pub const SCHEMA_VERSION: u32 = 1;

const CLIENTS_FILE: &str = "clients.json";
const EVENTS_FILE: &str = "events.json";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile<T> {
    schema_version: u32,
    records: Vec<T>,
}

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    pub fn load_clients(&self) -> Result<Vec<Client>> {
        self.load(CLIENTS_FILE)
    }

    pub fn load_events(&self) -> Result<Vec<Event>> {
        self.load(EVENTS_FILE)
    }

    pub fn save_clients(&self, clients: &[Client]) -> Result<()> {
        self.save(CLIENTS_FILE, clients)
    }

    pub fn save_events(&self, events: &[Event]) -> Result<()> {
        self.save(EVENTS_FILE, events)
    }

    /// Load one collection; a missing file is an empty collection, a snapshot
    /// written by a newer schema is an error rather than a silent reinterpretation.
    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: SnapshotFile<T> = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

        if snapshot.schema_version > SCHEMA_VERSION {
            bail!(
                "snapshot {} has schema version {} but this build supports up to {}",
                path.display(),
                snapshot.schema_version,
                SCHEMA_VERSION
            );
        }

        info!(
            "Loaded {} record(s) from {}",
            snapshot.records.len(),
            path.display()
        );
        Ok(snapshot.records)
    }

    fn save<T: Serialize + Clone>(&self, file: &str, records: &[T]) -> Result<()> {
        let path = self.dir.join(file);
        let snapshot = SnapshotFile {
            schema_version: SCHEMA_VERSION,
            records: records.to_vec(),
        };
        let serialized = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, serialized)
            .with_context(|| format!("failed to write snapshot {}", path.display()))
    }
}
