//! Seed-aware record store with an in-memory session cache.
//!
//! The record list lives in three layers: the bundled JSON seed, the
//! session cache, and the persisted store file in the data directory.
//! Reads never hard-fail: a missing or unreadable store file falls back to
//! the seed. Writes go through a temp file and rename so an interrupted
//! save never leaves a corrupt file behind.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, warn};

use crate::config;
use crate::error::{PissenlitsError, Result};
use crate::models::FundraisingRecord;

/// Loads and persists the flat record list.
///
/// There is exactly one logical writer; every read recomputes from the full
/// cached list, so no aggregate state is ever mutated incrementally.
pub struct RecordStore {
    /// Directory holding the store file (and the auth file).
    pub data_dir: PathBuf,
    latency: Duration,
    seed: String,
    cached: Option<Vec<FundraisingRecord>>,
}

impl RecordStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// `latency` is the fixed artificial delay applied to every read,
    /// simulating the network round-trip the site historically made; pass
    /// `Duration::ZERO` to disable it.
    pub fn new(data_dir: PathBuf, seed: String, latency: Duration) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            latency,
            seed,
            cached: None,
        })
    }

    /// Path of the persisted store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(config::STORE_FILE)
    }

    /// Whether a session cache is currently held.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Return the current record list.
    ///
    /// Serves the session cache when present; otherwise reads the store
    /// file, falling back to the bundled seed when the file is missing or
    /// unparsable (the failure is logged, never propagated).
    pub fn load(&mut self) -> Result<Vec<FundraisingRecord>> {
        if self.latency > Duration::ZERO {
            std::thread::sleep(self.latency);
        }

        if let Some(records) = &self.cached {
            return Ok(records.clone());
        }

        let path = self.store_path();
        let records = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(records) => records,
                Err(e) => {
                    warn!("store file {} is unreadable ({e}), using seed", path.display());
                    self.seed_records()?
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no store file at {}, using seed", path.display());
                self.seed_records()?
            }
            Err(e) => {
                warn!("cannot read store file {} ({e}), using seed", path.display());
                self.seed_records()?
            }
        };

        self.cached = Some(records.clone());
        Ok(records)
    }

    /// Replace the stored record list, in memory and on disk.
    ///
    /// Written to a temp file first and renamed into place. Write failures
    /// propagate to the caller, which is responsible for surfacing them.
    pub fn save(&mut self, records: Vec<FundraisingRecord>) -> Result<()> {
        let json = serde_json::to_string_pretty(&records)?;

        let path = self.store_path();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(PissenlitsError::Save)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PissenlitsError::Save(e));
        }

        self.cached = Some(records);
        Ok(())
    }

    /// Drop the session cache.
    ///
    /// Called before a refresh recomputes, so a stale read can never
    /// interleave after a refresh is requested.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    fn seed_records(&self) -> Result<Vec<FundraisingRecord>> {
        serde_json::from_str(&self.seed).map_err(Into::into)
    }
}
