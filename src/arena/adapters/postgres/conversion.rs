//! Row and domain conversions for battle persistence.

use super::models::{AgentRow, BattleRow, NewAgentRow, NewRoundRow, RoundRow};
use crate::arena::{
    domain::{
        Agent, AgentRecord, AgentSlot, Battle, BattleId, BattleSummary, Matchup,
        PersistedBattleData, Phase, PerAgent, Round, Topic,
    },
    ports::{ArenaRepositoryError, ArenaRepositoryResult},
};
use chrono::{DateTime, Utc};

pub(super) fn summary_to_row(summary: &BattleSummary) -> BattleRow {
    BattleRow {
        id: summary.id.into_inner(),
        topic: summary.topic.as_str().to_owned(),
        matchup: summary.matchup.as_str().to_owned(),
        winner: summary.winner.map(|slot| slot.as_str().to_owned()),
        created_at: summary.created_at,
    }
}

pub(super) fn round_to_row(
    battle_id: BattleId,
    round: &Round,
    written_at: DateTime<Utc>,
) -> NewRoundRow {
    let outputs = round.outputs();
    NewRoundRow {
        battle_id: battle_id.into_inner(),
        phase: round.phase().as_str().to_owned(),
        claude_roast: outputs.claude.clone(),
        gpt_roast: outputs.gpt.clone(),
        gemini_roast: outputs.gemini.clone(),
        created_at: written_at,
    }
}

pub(super) fn seed_row(slot: AgentSlot, seeded_at: DateTime<Utc>) -> NewAgentRow {
    NewAgentRow {
        slot: slot.as_str().to_owned(),
        wins: 0,
        losses: 0,
        created_at: seeded_at,
    }
}

pub(super) fn row_to_summary(row: BattleRow) -> ArenaRepositoryResult<BattleSummary> {
    let BattleRow {
        id,
        topic,
        matchup,
        winner,
        created_at,
    } = row;
    Ok(BattleSummary {
        id: BattleId::from_uuid(id),
        topic: Topic::new(topic).map_err(ArenaRepositoryError::invalid_persisted_data)?,
        matchup: Matchup::new(matchup).map_err(ArenaRepositoryError::invalid_persisted_data)?,
        winner: winner
            .as_deref()
            .map(AgentSlot::try_from)
            .transpose()
            .map_err(ArenaRepositoryError::invalid_persisted_data)?,
        created_at,
    })
}

pub(super) fn row_to_round(row: RoundRow) -> ArenaRepositoryResult<Round> {
    let RoundRow {
        phase,
        claude_roast,
        gpt_roast,
        gemini_roast,
    } = row;
    let parsed_phase = Phase::try_from(phase.as_str())?;
    Ok(Round::new(
        parsed_phase,
        PerAgent::new(claude_roast, gpt_roast, gemini_roast),
    ))
}

/// Assembles a battle, ordering rounds by phase.
pub(super) fn rows_to_battle(
    battle: BattleRow,
    round_rows: Vec<RoundRow>,
) -> ArenaRepositoryResult<Battle> {
    let summary = row_to_summary(battle)?;
    let mut rounds = round_rows
        .into_iter()
        .map(row_to_round)
        .collect::<ArenaRepositoryResult<Vec<_>>>()?;
    rounds.sort_by_key(Round::phase);
    Ok(Battle::from_persisted(PersistedBattleData {
        id: summary.id,
        topic: summary.topic,
        matchup: summary.matchup,
        created_at: summary.created_at,
        winner: summary.winner,
        rounds,
    }))
}

pub(super) fn row_to_agent(row: AgentRow) -> ArenaRepositoryResult<Agent> {
    let AgentRow {
        slot,
        wins,
        losses,
        created_at,
    } = row;
    let parsed_slot =
        AgentSlot::try_from(slot.as_str()).map_err(ArenaRepositoryError::invalid_persisted_data)?;
    let record = AgentRecord {
        wins: u64::try_from(wins).map_err(ArenaRepositoryError::invalid_persisted_data)?,
        losses: u64::try_from(losses).map_err(ArenaRepositoryError::invalid_persisted_data)?,
    };
    Ok(Agent::from_persisted(parsed_slot, record, created_at))
}
