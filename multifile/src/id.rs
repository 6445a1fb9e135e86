use std::fmt;

use crate::error::{MultiFileError, MultiFileResult};

const PREFIX: &str = "file_";
const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque identifier binding a registry entry to its rendered row.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(String);

impl FileId {
    /// Wrap an existing identifier, e.g. one read back from a row attribute.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Generate a fresh identifier: `file_` followed by nine base-36 characters.
///
/// The suffix space is 36^9 (about 10^14), so collisions are negligible for the
/// tens to hundreds of files a single field holds. Nothing is remembered
/// between calls; [`FileRegistry`](crate::FileRegistry) rerolls on the rare
/// clash inside one registry.
pub fn generate_file_id() -> MultiFileResult<FileId> {
    let mut seed = [0u8; 8];
    getrandom::getrandom(&mut seed)
        .map_err(|e| MultiFileError::random_source(e.to_string()))?;
    let mut n = u64::from_le_bytes(seed);

    let mut out = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
    out.push_str(PREFIX);
    for _ in 0..SUFFIX_LEN {
        out.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    Ok(FileId(out))
}
