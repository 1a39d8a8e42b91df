//! Validated free-text battle descriptors.

use super::ArenaDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_TOPIC_LENGTH: usize = 3;
const MAX_TEXT_LENGTH: usize = 256;

/// Subject the agents roast each other about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Creates a validated topic.
    ///
    /// The input is trimmed before its length is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaDomainError::InvalidTopic`] when the trimmed topic is
    /// shorter than 3 or longer than 256 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ArenaDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();
        if !(MIN_TOPIC_LENGTH..=MAX_TEXT_LENGTH).contains(&length) {
            return Err(ArenaDomainError::InvalidTopic(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the topic as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Topic {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form descriptor framing a battle, such as `ffa` or `dethrone:gpt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matchup(String);

impl Matchup {
    /// Matchup used when the caller does not supply one.
    pub const FREE_FOR_ALL: &'static str = "ffa";

    /// Creates a validated matchup descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaDomainError::EmptyMatchup`] when the value is empty after
    /// trimming or [`ArenaDomainError::MatchupTooLong`] when it exceeds 256
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ArenaDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ArenaDomainError::EmptyMatchup);
        }
        if normalized.chars().count() > MAX_TEXT_LENGTH {
            return Err(ArenaDomainError::MatchupTooLong(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the free-for-all matchup.
    #[must_use]
    pub fn free_for_all() -> Self {
        Self(Self::FREE_FOR_ALL.to_owned())
    }

    /// Returns the matchup descriptor for a dethrone battle.
    ///
    /// The descriptor names the reigning champion when there is one.
    #[must_use]
    pub fn dethrone(champion: Option<super::AgentSlot>) -> Self {
        match champion {
            Some(slot) => Self(format!("dethrone:{slot}")),
            None => Self("dethrone".to_owned()),
        }
    }

    /// Returns the matchup as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Matchup {
    fn default() -> Self {
        Self::free_for_all()
    }
}

impl AsRef<str> for Matchup {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
