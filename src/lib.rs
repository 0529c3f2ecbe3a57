//! Pissenlits SDK.
//!
//! Data layer of the troop's fundraising site: loads the record list from a
//! bundled JSON snapshot (cached per session, persisted in a local data
//! directory) and derives everything the pages render: per-person totals,
//! activity breakdowns, the daily cumulative series and the monthly
//! objectives table.
//!
//! # Quick start
//!
//! ```no_run
//! use pissenlits_sdk::{config, PissenlitsSdk};
//!
//! let sdk = PissenlitsSdk::builder().build().unwrap();
//!
//! let summary = sdk.summary().summary(config::today()).unwrap();
//! println!("Richesse actuelle: {}", summary.total_funds);
//!
//! let standings = sdk.rankings().standings(config::today()).unwrap();
//! for row in &standings.rows {
//!     println!("{} ({} mois)", row.name, row.months.len());
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod gallery;
pub mod models;
pub mod queries;
pub mod split;
pub mod store;
pub mod transfer;

#[cfg(feature = "async")]
pub use async_client::AsyncPissenlitsSdk;
pub use auth::AuthGate;
pub use config::Campaign;
pub use error::{PissenlitsError, Result};
pub use gallery::PhotoGallery;
pub use models::{Amount, FundraisingRecord, IndividualRecord, RecordId, Standings, Summary};
pub use store::RecordStore;
pub use transfer::Export;

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// PissenlitsSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PissenlitsSdk`] instance.
///
/// Use [`PissenlitsSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PissenlitsSdkBuilder::build) to create the
/// SDK.
pub struct PissenlitsSdkBuilder {
    data_dir: Option<PathBuf>,
    latency: Duration,
    passphrase: String,
    campaign: Campaign,
    retired: HashSet<String>,
    base_url: String,
    seed_json: Option<String>,
}

impl Default for PissenlitsSdkBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            latency: Duration::from_millis(300),
            passphrase: config::DEFAULT_PASSPHRASE.to_string(),
            campaign: Campaign::default(),
            retired: HashSet::new(),
            base_url: String::new(),
            seed_json: None,
        }
    }
}

impl PissenlitsSdkBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/pissenlits-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the artificial read latency.
    ///
    /// The site historically fetched its data over HTTP; the stored list is
    /// served with the same fixed delay so the loading states stay visible.
    /// Defaults to 300 ms; pass `Duration::ZERO` to disable.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Override the login passphrase.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    /// Override the campaign window and monthly objective.
    pub fn campaign(mut self, campaign: Campaign) -> Self {
        self.campaign = campaign;
        self
    }

    /// Names excluded from ranking eligibility (still displayed with their
    /// history, sorted after active people).
    pub fn retired<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retired = names.into_iter().map(Into::into).collect();
        self
    }

    /// Base URL of the deployed site, used to build photo asset URLs.
    ///
    /// Empty for a site served at the domain root, a path prefix (e.g.
    /// `/site-pis`) for subdirectory hosting.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the bundled seed dataset (primarily for tests).
    pub fn seed_json(mut self, json: impl Into<String>) -> Self {
        self.seed_json = Some(json.into());
        self
    }

    /// Build the SDK, initializing the data directory and record store.
    pub fn build(self) -> Result<PissenlitsSdk> {
        let data_dir = self.data_dir.unwrap_or_else(config::default_data_dir);
        let seed = self
            .seed_json
            .unwrap_or_else(|| config::SEED_JSON.to_string());
        let store = RecordStore::new(data_dir.clone(), seed, self.latency)?;
        let auth = AuthGate::new(&data_dir, self.passphrase);
        Ok(PissenlitsSdk {
            store: RefCell::new(store),
            auth,
            campaign: self.campaign,
            retired: self.retired,
            base_url: self.base_url,
        })
    }
}

// ---------------------------------------------------------------------------
// PissenlitsSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Pissenlits SDK.
///
/// Owns the [`RecordStore`] and the [`AuthGate`] and exposes the derived
/// views as lightweight borrowing wrappers. Created via
/// [`PissenlitsSdk::builder()`]; one instance per app session.
pub struct PissenlitsSdk {
    store: RefCell<RecordStore>,
    auth: AuthGate,
    campaign: Campaign,
    retired: HashSet<String>,
    base_url: String,
}

impl PissenlitsSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> PissenlitsSdkBuilder {
        PissenlitsSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the record list interface (the detailed, filterable table).
    pub fn records(&self) -> queries::RecordQuery<'_> {
        queries::RecordQuery::new(&self.store)
    }

    /// Access the aggregation interface (totals, breakdowns, cumulative
    /// series).
    pub fn summary(&self) -> queries::SummaryQuery<'_> {
        queries::SummaryQuery::new(&self.store, &self.campaign)
    }

    /// Access the monthly objectives interface.
    pub fn rankings(&self) -> queries::RankingQuery<'_> {
        queries::RankingQuery::new(&self.store, &self.campaign, &self.retired)
    }

    /// Access the login gate.
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Access the photo gallery for the configured base URL.
    pub fn gallery(&self) -> PhotoGallery {
        PhotoGallery::new(self.base_url.clone(), Duration::from_secs(10))
    }

    /// The campaign this instance aggregates over.
    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    // -- Mutations ---------------------------------------------------------

    /// Append one record and persist the list.
    pub fn add_record(&self, record: FundraisingRecord) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let mut records = store.load()?;
        records.push(record);
        store.save(records)
    }

    /// Remove a record by its stable id and persist the list.
    ///
    /// Returns the removed record.
    pub fn remove_record(&self, id: RecordId) -> Result<FundraisingRecord> {
        let mut store = self.store.borrow_mut();
        let mut records = store.load()?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(PissenlitsError::RecordNotFound(id))?;
        let removed = records.remove(index);
        store.save(records)?;
        Ok(removed)
    }

    /// Replace the whole stored list from a bulk-import document.
    ///
    /// All-or-nothing: a rejected document leaves the stored list untouched.
    /// Returns the number of imported records.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let records = transfer::parse_import(json)?;
        let count = records.len();
        self.store.borrow_mut().save(records)?;
        Ok(count)
    }

    /// Serialize the stored list for download, named after today.
    pub fn export_json(&self) -> Result<Export> {
        let records = self.store.borrow_mut().load()?;
        transfer::export(&records, config::today())
    }

    /// Drop the session cache and reload from disk (or the seed).
    ///
    /// The cache is invalidated before the reload, so no read issued after a
    /// refresh can observe the stale list.
    pub fn refresh(&self) -> Result<usize> {
        let mut store = self.store.borrow_mut();
        store.invalidate();
        Ok(store.load()?.len())
    }

    /// Consume the SDK and release its resources.
    ///
    /// Dropping the instance is equivalent; this exists for deterministic
    /// shutdown at the end of an app session.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PissenlitsSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.borrow();
        write!(
            f,
            "PissenlitsSdk(data_dir={}, cached={}, campaign={}..{})",
            store.data_dir.display(),
            store.is_cached(),
            self.campaign.start,
            self.campaign.end
        )
    }
}
