//! Diesel schema for battle persistence.

diesel::table! {
    /// Roster agents and their cumulative records.
    agents (slot) {
        /// Roster seat key.
        #[max_length = 16]
        slot -> Varchar,
        /// Battles won.
        wins -> Int8,
        /// Battles lost.
        losses -> Int8,
        /// Seeding timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Completed battles.
    battles (id) {
        /// Battle identifier.
        id -> Uuid,
        /// Roast topic.
        #[max_length = 256]
        topic -> Varchar,
        /// Matchup descriptor.
        #[max_length = 256]
        matchup -> Varchar,
        /// Seat of the voted winner, once recorded.
        #[max_length = 16]
        winner -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rounds belonging to a battle, one per phase.
    rounds (id) {
        /// Surrogate key.
        id -> Int8,
        /// Owning battle.
        battle_id -> Uuid,
        /// Phase name.
        #[max_length = 16]
        phase -> Varchar,
        /// Claude's output.
        claude_roast -> Text,
        /// GPT's output.
        gpt_roast -> Text,
        /// Gemini's output.
        gemini_roast -> Text,
        /// Write timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(rounds -> battles (battle_id));
diesel::allow_tables_to_appear_in_same_query!(agents, battles, rounds);
