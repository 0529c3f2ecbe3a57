//! Async wrapper around [`PissenlitsSdk`] for use in async runtimes.
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. Every
//! operation is small and CPU-bound (plus the fixed artificial latency), so
//! this is all the asynchrony the data layer needs.
//!
//! # Example
//!
//! ```no_run
//! use pissenlits_sdk::{config, AsyncPissenlitsSdk};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncPissenlitsSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK call via closure
//!     let total = sdk.run(|s| s.summary().total_funds()).await.unwrap();
//!
//!     // Or use a typed convenience method
//!     let summary = sdk.summary(config::today()).await.unwrap();
//!     assert_eq!(summary.total_funds, total);
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{PissenlitsError, Result};
use crate::models::{FundraisingRecord, RecordId, Standings, Summary};
use crate::transfer::Export;
use crate::{Campaign, PissenlitsSdk};

// ---------------------------------------------------------------------------
// AsyncPissenlitsSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPissenlitsSdk`]
/// instance.
#[derive(Default)]
pub struct AsyncPissenlitsSdkBuilder {
    data_dir: Option<PathBuf>,
    latency: Option<Duration>,
    passphrase: Option<String>,
    campaign: Option<Campaign>,
    retired: Option<HashSet<String>>,
    base_url: Option<String>,
}

impl AsyncPissenlitsSdkBuilder {
    /// Set a custom data directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the artificial read latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Override the login passphrase.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Override the campaign window and monthly objective.
    pub fn campaign(mut self, campaign: Campaign) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Names excluded from ranking eligibility.
    pub fn retired<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retired = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Base URL of the deployed site.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncPissenlitsSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PissenlitsSdk::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(latency) = self.latency {
                builder = builder.latency(latency);
            }
            if let Some(passphrase) = self.passphrase {
                builder = builder.passphrase(passphrase);
            }
            if let Some(campaign) = self.campaign {
                builder = builder.campaign(campaign);
            }
            if let Some(retired) = self.retired {
                builder = builder.retired(retired);
            }
            if let Some(base_url) = self.base_url {
                builder = builder.base_url(base_url);
            }
            let sdk = builder.build()?;
            Ok(AsyncPissenlitsSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| PissenlitsError::Task(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPissenlitsSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`PissenlitsSdk`].
///
/// Cheap to clone; clones share the same underlying SDK instance.
#[derive(Clone)]
pub struct AsyncPissenlitsSdk {
    inner: Arc<Mutex<PissenlitsSdk>>,
}

impl AsyncPissenlitsSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncPissenlitsSdkBuilder {
        AsyncPissenlitsSdkBuilder::default()
    }

    /// Run any sync SDK operation on the blocking thread pool.
    pub async fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&PissenlitsSdk) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let sdk = inner
                .lock()
                .map_err(|e| PissenlitsError::Task(format!("sdk lock poisoned: {e}")))?;
            f(&sdk)
        })
        .await
        .map_err(|e| PissenlitsError::Task(format!("task join error: {e}")))?
    }

    // -- Typed convenience methods -----------------------------------------

    /// The full summary for the dashboard pages.
    pub async fn summary(&self, today: NaiveDate) -> Result<Summary> {
        self.run(move |sdk| sdk.summary().summary(today)).await
    }

    /// The full monthly objectives table.
    pub async fn standings(&self, today: NaiveDate) -> Result<Standings> {
        self.run(move |sdk| sdk.rankings().standings(today)).await
    }

    /// All records, most recent first.
    pub async fn records(&self) -> Result<Vec<FundraisingRecord>> {
        self.run(|sdk| sdk.records().all()).await
    }

    /// Append one record and persist the list.
    pub async fn add_record(&self, record: FundraisingRecord) -> Result<()> {
        self.run(move |sdk| sdk.add_record(record)).await
    }

    /// Remove a record by its stable id.
    pub async fn remove_record(&self, id: RecordId) -> Result<FundraisingRecord> {
        self.run(move |sdk| sdk.remove_record(id)).await
    }

    /// Replace the whole stored list from a bulk-import document.
    pub async fn import_json(&self, json: String) -> Result<usize> {
        self.run(move |sdk| sdk.import_json(&json)).await
    }

    /// Serialize the stored list for download.
    pub async fn export_json(&self) -> Result<Export> {
        self.run(|sdk| sdk.export_json()).await
    }

    /// Drop the session cache and reload.
    pub async fn refresh(&self) -> Result<usize> {
        self.run(|sdk| sdk.refresh()).await
    }
}
