use spacesign_core::Error;
use std::fmt;
use std::str::FromStr;

/// Canned ACL applied to a bucket when it's created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CannedAcl {
    /// Owner gets full control, nobody else has access.
    #[default]
    Private,
    /// Everyone can read.
    PublicRead,
    /// Everyone can read and write.
    PublicReadWrite,
    /// Authenticated users can read.
    AuthenticatedRead,
}

impl CannedAcl {
    /// Value sent in the `x-amz-acl` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            CannedAcl::Private => "private",
            CannedAcl::PublicRead => "public-read",
            CannedAcl::PublicReadWrite => "public-read-write",
            CannedAcl::AuthenticatedRead => "authenticated-read",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CannedAcl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(CannedAcl::Private),
            "public-read" => Ok(CannedAcl::PublicRead),
            "public-read-write" => Ok(CannedAcl::PublicReadWrite),
            "authenticated-read" => Ok(CannedAcl::AuthenticatedRead),
            v => Err(Error::request_invalid(format!("unknown canned acl {v:?}"))),
        }
    }
}

/// Default for [`ListObjectsOptions::max_keys`].
pub const DEFAULT_MAX_KEYS: usize = 1000;

/// Parameters of a bucket listing.
///
/// Parameters left at their default are not sent at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListObjectsOptions {
    /// Character used to group keys.
    pub delimiter: String,
    /// Only list keys starting with this prefix.
    pub prefix: String,
    /// Key to start listing after.
    pub marker: String,
    /// Maximum number of keys returned.
    pub max_keys: usize,
}

impl Default for ListObjectsOptions {
    fn default() -> Self {
        Self {
            delimiter: String::new(),
            prefix: String::new(),
            marker: String::new(),
            max_keys: DEFAULT_MAX_KEYS,
        }
    }
}

impl ListObjectsOptions {
    /// Query pairs for the non-default parameters, not percent-encoded.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut q = Vec::new();

        if !self.delimiter.is_empty() {
            q.push(("delimiter".to_string(), self.delimiter.clone()));
        }
        if !self.marker.is_empty() {
            q.push(("marker".to_string(), self.marker.clone()));
        }
        if self.max_keys != DEFAULT_MAX_KEYS {
            q.push(("max-keys".to_string(), self.max_keys.to_string()));
        }
        if !self.prefix.is_empty() {
            q.push(("prefix".to_string(), self.prefix.clone()));
        }

        q
    }
}
