//! Application services for battle orchestration and scoreboard queries.

mod champion;
mod error;
mod gateway;
mod history;
mod orchestrator;
mod prompt;
mod round;
mod vote;

pub use champion::ChampionTracker;
pub use error::{ArenaServiceError, ArenaServiceResult};
pub use gateway::{AgentGateway, render_outcome};
pub use history::BattleHistoryService;
pub use orchestrator::{BattleOrchestrator, StartBattleRequest};
pub use prompt::{PromptBuilder, PromptRenderError, PromptResult};
pub use round::RoundExecutor;
pub use vote::{VoteRequest, VoteService};
