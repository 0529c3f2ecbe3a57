//! Photo gallery manifest: generation at build time, consumption at runtime.
//!
//! The deployed site serves a `photos/` directory next to the app. A build
//! step scans it and writes `photos.json`, a flat JSON array of filenames;
//! at runtime the gallery fetches that manifest from the site base URL (or
//! reads it locally) and turns it into asset URLs. A missing or broken
//! manifest yields an empty gallery, never an error.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::warn;
use reqwest::blocking::Client;

use crate::config::{MANIFEST_FILE, PHOTOS_DIR};
use crate::error::Result;

/// File extensions recognized as gallery photos (matched case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

// ---------------------------------------------------------------------------
// Manifest generation
// ---------------------------------------------------------------------------

/// Scan `dir` for image files and write the manifest into it.
///
/// Non-recursive: only direct children are considered. The manifest lists
/// the filenames alphabetically and is returned for convenience.
pub fn generate_manifest(dir: &Path) -> Result<Vec<String>> {
    let mut photos = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_image(name) {
            photos.push(name.to_string());
        }
    }
    photos.sort();

    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&photos)?)?;
    Ok(photos)
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// PhotoGallery
// ---------------------------------------------------------------------------

/// Runtime view of the gallery for one site base URL.
///
/// The base URL is empty for a site served at the domain root and a path
/// prefix (e.g. `/site-pis`) for subdirectory hosting.
pub struct PhotoGallery {
    base_url: String,
    timeout: Duration,
}

impl PhotoGallery {
    pub(crate) fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    /// URL of the deployed manifest.
    pub fn manifest_url(&self) -> String {
        format!("{}/{}/{}", self.base_url, PHOTOS_DIR, MANIFEST_FILE)
    }

    /// Asset URL for one photo filename.
    pub fn photo_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, PHOTOS_DIR, name)
    }

    /// Fetch and parse the deployed manifest.
    pub fn fetch(&self) -> Result<Vec<String>> {
        let client = Client::builder().timeout(self.timeout).build()?;
        let names: Vec<String> = client
            .get(self.manifest_url())
            .send()?
            .error_for_status()?
            .json()?;
        Ok(names)
    }

    /// Asset URLs from the deployed manifest; an unreachable or broken
    /// manifest logs and yields an empty gallery.
    pub fn photo_urls(&self) -> Vec<String> {
        match self.fetch() {
            Ok(names) => names.iter().map(|name| self.photo_url(name)).collect(),
            Err(e) => {
                warn!("cannot load photo manifest from {}: {e}", self.manifest_url());
                Vec::new()
            }
        }
    }

    /// Asset URLs from a local manifest file, for development and tests.
    pub fn photo_urls_from(&self, manifest_path: &Path) -> Vec<String> {
        let names: Vec<String> = match fs::read_to_string(manifest_path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(names) => names,
                Err(e) => {
                    warn!("manifest {} is unreadable: {e}", manifest_path.display());
                    return Vec::new();
                }
            },
            Err(e) => {
                warn!("cannot read manifest {}: {e}", manifest_path.display());
                return Vec::new();
            }
        };
        names.iter().map(|name| self.photo_url(name)).collect()
    }
}
