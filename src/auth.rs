//! Shared-passphrase gate backing the login screen.
//!
//! One passphrase for the whole troop, stored in clear form in the data
//! directory once entered correctly. This mirrors the site's historical
//! behavior and is explicitly not real authentication.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::Result;

/// The login gate. Constructed by the SDK builder alongside the store.
pub struct AuthGate {
    path: PathBuf,
    passphrase: String,
}

impl AuthGate {
    pub(crate) fn new(data_dir: &Path, passphrase: String) -> Self {
        Self {
            path: data_dir.join(config::AUTH_FILE),
            passphrase,
        }
    }

    /// Try to log in. A correct attempt is persisted so the session survives
    /// a restart; an incorrect one stores nothing.
    pub fn login(&self, attempt: &str) -> Result<bool> {
        if attempt != self.passphrase {
            return Ok(false);
        }
        fs::write(&self.path, attempt)?;
        Ok(true)
    }

    /// Whether a previously stored passphrase still matches.
    pub fn is_authenticated(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|stored| stored == self.passphrase)
            .unwrap_or(false)
    }

    /// Forget the stored passphrase.
    pub fn logout(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
