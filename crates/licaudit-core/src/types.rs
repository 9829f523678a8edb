//! Strong type definitions for licaudit.
//!
//! Licence identifiers are newtypes so a raw string never stands in for a
//! validated digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Length of a hex-encoded SHA-256 digest.
pub const LICENCE_HASH_HEX_LEN: usize = 64;

/// A 32-byte licence identifier, computed as SHA256(licence text).
///
/// Declarations name the licence they grant under by this digest. Parsing is
/// case-insensitive; the canonical textual form is lower-case hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenceHash(pub [u8; 32]);

impl LicenceHash {
    /// Hash the full byte content of a licence text.
    pub fn digest(text: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lower-case hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string, in either case.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != LICENCE_HASH_HEX_LEN {
            return Err(CoreError::InvalidHashLength {
                value: s.to_string(),
                len: s.len(),
            });
        }
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidHash {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Whether `s` looks like a literal hash rather than a licence name.
    pub fn is_hex_literal(s: &str) -> bool {
        s.len() == LICENCE_HASH_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Debug for LicenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LicenceHash({}...)", &self.to_hex()[..12])
    }
}

impl fmt::Display for LicenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for LicenceHash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for LicenceHash {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<LicenceHash> for String {
    fn from(hash: LicenceHash) -> Self {
        hash.to_hex()
    }
}

impl From<[u8; 32]> for LicenceHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for LicenceHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The identity recorded on a commit: a name and an email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Signature {
    /// Create a new signature.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The `Name <email>` form used to name persons in declarations.
    pub fn composite(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
