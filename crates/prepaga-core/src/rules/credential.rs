//! Credential parsing and the relationship-from-credential fallback.
//!
//! A credential is `GGGGGGG-SS`: a 7-digit family-group id and a 2-digit
//! sequence within the group. Sequence `01` is always the titular. The
//! remaining sequence numbers only carry a display convention (02 spouse,
//! 03–05 children, 06+ other dependents) that is used when the record has
//! no explicit `parentesco`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::{fold, is_blank};

/// Suffix carried by every titular credential.
pub const TITULAR_SUFFIX: &str = "-01";

/// Digits in the family-group part.
pub const GROUP_DIGITS: usize = 7;

/// Digits in the sequence part.
pub const SEQUENCE_DIGITS: usize = 2;

/// Credential errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Credential must have the form GGGGGGG-SS: {0}")]
    Malformed(String),

    #[error("Credential sequence must start at 01: {0}")]
    ZeroSequence(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// A strictly parsed credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Credential {
    /// Family-group id, always 7 digits
    group: String,
    /// Sequence within the group, 1..=99
    sequence: u8,
}

impl Credential {
    /// Build a credential from a group id and a sequence number.
    pub fn new(group: &str, sequence: u8) -> CredentialResult<Self> {
        Self::from_str(&format!("{}-{:02}", group, sequence))
    }

    /// Titular credential for a group.
    pub fn titular(group: &str) -> CredentialResult<Self> {
        Self::new(group, 1)
    }

    /// Family-group id.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Sequence number within the group.
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Whether this is the group's primary member.
    pub fn is_titular(&self) -> bool {
        self.sequence == 1
    }

    /// Relationship implied by the numbering convention.
    pub fn relationship(&self) -> Relationship {
        Relationship::from_sequence(u32::from(self.sequence))
    }

    /// Whether both credentials belong to the same family group.
    pub fn same_group(&self, other: &Credential) -> bool {
        self.group == other.group
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.group, self.sequence)
    }
}

impl FromStr for Credential {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CredentialError::Malformed(s.to_string());
        let (group, seq) = s.trim().split_once('-').ok_or_else(malformed)?;

        let all_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !all_digits(group, GROUP_DIGITS) || !all_digits(seq, SEQUENCE_DIGITS) {
            return Err(malformed());
        }

        let sequence: u8 = seq.parse().map_err(|_| malformed())?;
        if sequence == 0 {
            return Err(CredentialError::ZeroSequence(s.to_string()));
        }

        Ok(Self {
            group: group.to_string(),
            sequence,
        })
    }
}

impl Serialize for Credential {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Credential {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Relationship of a member to the titular of the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Titular,
    Spouse,
    Child,
    Dependent,
}

impl Relationship {
    /// Label used by the back office and the backend `parentesco` field.
    pub fn label(self) -> &'static str {
        match self {
            Relationship::Titular => "Titular",
            Relationship::Spouse => "Cónyuge",
            Relationship::Child => "Hijo",
            Relationship::Dependent => "Familiar a cargo",
        }
    }

    /// Numbering convention: 1 titular, 2 spouse, 3–5 child, else dependent.
    pub fn from_sequence(sequence: u32) -> Self {
        match sequence {
            1 => Relationship::Titular,
            2 => Relationship::Spouse,
            3..=5 => Relationship::Child,
            _ => Relationship::Dependent,
        }
    }

    /// Parse a `parentesco` label, ignoring case and accents.
    pub fn from_label(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "titular" => Some(Relationship::Titular),
            "conyuge" | "esposo" | "esposa" | "esposo/a" => Some(Relationship::Spouse),
            "hijo" | "hija" | "hijo/a" => Some(Relationship::Child),
            "familiar a cargo" | "familiar" | "otro" => Some(Relationship::Dependent),
            _ => None,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relationship derived from the credential text alone.
///
/// Lenient on purpose: anything that does not split into exactly two parts,
/// or whose second part is not a number, is a dependent.
pub fn relationship_from_credential(credential: &str) -> Relationship {
    let parts: Vec<&str> = credential.split('-').collect();
    if parts.len() != 2 {
        return Relationship::Dependent;
    }
    match leading_integer(parts[1]) {
        Some(n) => Relationship::from_sequence(n),
        None => Relationship::Dependent,
    }
}

/// Display label for a member: the explicit `parentesco` when present,
/// otherwise the credential heuristic.
pub fn resolve_relationship(explicit: Option<&str>, credential: &str) -> String {
    match explicit {
        Some(label) if !is_blank(label) => label.to_string(),
        _ => relationship_from_credential(credential).label().to_string(),
    }
}

/// Whether a credential denotes a titular (ends with `-01`).
pub fn is_titular(credential: &str) -> bool {
    credential.ends_with(TITULAR_SUFFIX)
}

/// Family-group part of a credential (text before the first dash).
pub fn group_prefix(credential: &str) -> Option<&str> {
    let prefix = credential.split('-').next()?;
    if prefix.is_empty() {
        None
    } else {
        Some(prefix)
    }
}

/// Integer prefix of a string, the way the sequence was read historically
/// (`"03"` → 3, `"4x"` → 4, `"x4"` → none).
fn leading_integer(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Saturate huge sequences instead of failing; they are dependents anyway.
    Some(digits.parse().unwrap_or(u32::MAX))
}
