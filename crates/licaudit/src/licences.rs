//! Licence registry: turns licence identifiers into accepted hashes.
//!
//! An identifier is either a 64-digit hex hash, used as given, or a short
//! name such as `mit`, which names the file `COPYING.MIT` in the licence
//! directory. Named licences are identified by the SHA-256 of the file's
//! exact bytes.

use std::fs;
use std::path::{Path, PathBuf};

use licaudit_authz::AcceptedLicences;
use licaudit_core::LicenceHash;
use tracing::debug;

use crate::error::{AuditError, Result};

/// Directory under each data directory that holds licence texts.
const LICENCE_SUBDIR: &str = "licaudit/licences";

/// Prefix of a licence file name; the upper-cased short name follows.
pub const LICENCE_FILE_PREFIX: &str = "COPYING.";

/// File name holding the licence with short name `name`.
pub fn licence_file_name(name: &str) -> String {
    format!("{LICENCE_FILE_PREFIX}{}", name.to_uppercase())
}

/// Directories searched, in order, when no licence directory is configured:
/// the user's data directory, then the system-wide shares.
pub fn default_search_path() -> Vec<PathBuf> {
    let mut search = Vec::new();

    if let Some(data) = dirs::data_dir() {
        search.push(data.join(LICENCE_SUBDIR));
    }
    search.push(Path::new("/usr/local/share").join(LICENCE_SUBDIR));
    search.push(Path::new("/usr/share").join(LICENCE_SUBDIR));

    search
}

/// Pick the licence directory.
///
/// A configured directory must exist. Otherwise the first existing entry of
/// `search` wins.
pub fn locate_licence_dir(configured: Option<&Path>, search: &[PathBuf]) -> Result<PathBuf> {
    if let Some(dir) = configured {
        if !dir.is_dir() {
            return Err(AuditError::LicencePathInvalid(dir.to_path_buf()));
        }
        return Ok(dir.to_path_buf());
    }

    search
        .iter()
        .find(|dir| dir.is_dir())
        .cloned()
        .ok_or_else(|| AuditError::LicencePathMissing {
            searched: search.to_vec(),
        })
}

/// Resolves licence identifiers against one licence directory.
#[derive(Debug, Clone)]
pub struct LicenceRegistry {
    dir: PathBuf,
}

impl LicenceRegistry {
    /// Use `dir` as the licence directory without checking it.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the configured directory, or search the default locations.
    pub fn open(configured: Option<&Path>) -> Result<Self> {
        let dir = locate_licence_dir(configured, &default_search_path())?;
        debug!(dir = %dir.display(), "using licence directory");
        Ok(Self::new(dir))
    }

    /// The licence directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for short name `name`.
    pub fn licence_file(&self, name: &str) -> PathBuf {
        self.dir.join(licence_file_name(name))
    }

    /// Resolve one identifier to a licence hash.
    pub fn resolve(&self, identifier: &str) -> Result<LicenceHash> {
        if LicenceHash::is_hex_literal(identifier) {
            return Ok(LicenceHash::from_hex(identifier)?);
        }

        let path = self.licence_file(identifier);
        let text = fs::read(&path).map_err(|source| AuditError::LicenceUnreadable {
            name: identifier.to_string(),
            path: path.clone(),
            source,
        })?;

        let hash = LicenceHash::digest(&text);
        debug!(licence = identifier, %hash, "loaded licence");
        Ok(hash)
    }

    /// Resolve every identifier. Fails on the first unreadable licence.
    pub fn accepted<I, S>(&self, identifiers: I) -> Result<AcceptedLicences>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = AcceptedLicences::new();
        for identifier in identifiers {
            accepted.insert(self.resolve(identifier.as_ref())?);
        }
        Ok(accepted)
    }
}
