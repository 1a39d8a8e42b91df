//! Champion streak derivation and scoreboard types.

use super::{AgentSlot, PerAgent};
use serde::{Deserialize, Serialize};

/// Current champion and the length of its unbroken winning streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionStreak {
    /// Agent holding the most recent streak, if any battle was decided.
    pub champion: Option<AgentSlot>,
    /// Number of consecutive decided battles won by the champion.
    pub streak: u32,
}

/// Cumulative win/loss record for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Battles won.
    pub wins: u64,
    /// Battles lost.
    pub losses: u64,
}

/// Scoreboard snapshot: champion, streak, and every agent's record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Agent holding the most recent streak, if any.
    pub champion: Option<AgentSlot>,
    /// Length of the champion's streak.
    pub streak: u32,
    /// Win/loss record per agent.
    pub records: PerAgent<AgentRecord>,
}

/// Derives the champion streak from battle winners ordered most recent first.
///
/// Undecided battles (`None`) are skipped without breaking or extending the
/// streak. The first decided battle names the champion; the scan stops at the
/// first decided battle won by a different agent.
#[must_use]
pub fn derive_champion_streak<I>(winners_most_recent_first: I) -> ChampionStreak
where
    I: IntoIterator<Item = Option<AgentSlot>>,
{
    let mut result = ChampionStreak::default();
    for winner in winners_most_recent_first.into_iter().flatten() {
        match result.champion {
            None => {
                result.champion = Some(winner);
                result.streak = 1;
            }
            Some(champion) if champion == winner => {
                result.streak = result.streak.saturating_add(1);
            }
            Some(_) => break,
        }
    }
    result
}
