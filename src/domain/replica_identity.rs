//! Replica identity as stored in `pg_class.relreplident`.

use std::fmt;

/// Which columns logical decoding writes for the old row image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicaIdentity {
    /// Primary key columns only (`d`)
    Default,
    /// No old row image (`n`)
    Nothing,
    /// Every column (`f`)
    Full,
    /// Columns of a chosen unique index (`i`)
    Index,
}

impl ReplicaIdentity {
    /// Parse the single-character catalog code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "d" => Some(Self::Default),
            "n" => Some(Self::Nothing),
            "f" => Some(Self::Full),
            "i" => Some(Self::Index),
            _ => None,
        }
    }

    pub fn is_full(self) -> bool {
        self == Self::Full
    }
}

impl fmt::Display for ReplicaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Default => "DEFAULT",
            Self::Nothing => "NOTHING",
            Self::Full => "FULL",
            Self::Index => "INDEX",
        };
        f.write_str(keyword)
    }
}
