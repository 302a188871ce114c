/// Block Miner game state definitions.

/// Milestones the player can reach. Display order is declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Achievement {
    BlocksMined,
    ResourcesCollected,
    ToolLevel,
    ItemsCrafted,
}

impl Achievement {
    /// All achievements in their fixed enumeration order.
    pub fn all() -> &'static [Achievement] {
        &[
            Achievement::BlocksMined,
            Achievement::ResourcesCollected,
            Achievement::ToolLevel,
            Achievement::ItemsCrafted,
        ]
    }

    /// Label shown to the player and written into saves.
    pub fn label(&self) -> &'static str {
        match self {
            Achievement::BlocksMined => "100 Blocks Mined",
            Achievement::ResourcesCollected => "500 Resources Collected",
            Achievement::ToolLevel => "Tool Level 10",
            Achievement::ItemsCrafted => "10 Items Crafted",
        }
    }

    /// Whether the given state currently satisfies this achievement.
    pub fn is_met(&self, state: &GameState) -> bool {
        match self {
            Achievement::BlocksMined => state.blocks_mined >= 100,
            Achievement::ResourcesCollected => state.resources >= 500,
            Achievement::ToolLevel => state.tool_level >= 10,
            Achievement::ItemsCrafted => state.crafted_items >= 10,
        }
    }
}

/// Full state of one mining session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Manual mine actions performed.
    pub blocks_mined: u64,
    /// Spendable resources.
    pub resources: u64,
    /// Multiplier for every mine and tick. Starts at 1.
    pub tool_level: u32,
    /// Successful crafts.
    pub crafted_items: u64,
    /// Derived from the four counters above; see [`derive_achievements`].
    pub achievements: Vec<Achievement>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            blocks_mined: 0,
            resources: 0,
            tool_level: 1,
            crafted_items: 0,
            achievements: Vec::new(),
        }
    }

    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }
}

/// Recompute the achievement set from the current counters.
///
/// Pure and from scratch: an entry whose stat has since dropped (resources
/// spent below 500) is absent from the result.
pub fn derive_achievements(state: &GameState) -> Vec<Achievement> {
    Achievement::all()
        .iter()
        .copied()
        .filter(|a| a.is_met(state))
        .collect()
}

/// Log entry for the message feed.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}
