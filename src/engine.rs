//! Block Miner game logic. Every mutation of `GameState` goes through here.

use crate::actions::Action;
use crate::config::EngineConfig;
use crate::console;
use crate::error::{GameError, GameResult};
use crate::save;
use crate::state::{derive_achievements, Achievement, GameState, LogEntry};

/// Maximum number of messages kept in the feed.
const LOG_CAPACITY: usize = 50;

/// Side effects of a successful transition worth telling the player about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// Achievements present after the transition that were absent before it.
    pub unlocked: Vec<Achievement>,
}

impl Outcome {
    fn merge(&mut self, other: Outcome) {
        for a in other.unlocked {
            if !self.unlocked.contains(&a) {
                self.unlocked.push(a);
            }
        }
    }
}

#[derive(Debug)]
pub struct GameEngine {
    config: EngineConfig,
    state: GameState,
    log: Vec<LogEntry>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: GameState::new(),
            log: Vec::new(),
        }
    }

    /// Start from an existing state. Achievements are re-derived.
    pub fn from_state(config: EngineConfig, mut state: GameState) -> Self {
        state.achievements = derive_achievements(&state);
        Self {
            config,
            state,
            log: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    /// Price of the next tool upgrade.
    pub fn upgrade_cost(&self) -> u64 {
        self.config.upgrade_cost(self.state.tool_level)
    }

    pub fn can_upgrade(&self) -> bool {
        self.state.resources >= self.upgrade_cost()
    }

    pub fn can_craft(&self) -> bool {
        self.state.resources >= self.config.craft_cost
    }

    /// Manual mine: one block, `tool_level` resources.
    pub fn mine(&mut self) -> Outcome {
        self.state.blocks_mined = self.state.blocks_mined.saturating_add(1);
        self.state.resources = self.state.resources.saturating_add(self.yield_per_action());
        self.refresh_achievements()
    }

    /// Spend `tool_level × upgrade_base_cost` to raise the tool level by one.
    pub fn upgrade(&mut self) -> GameResult<Outcome> {
        let cost = self.upgrade_cost();
        if let Err(e) = self.spend(cost) {
            self.add_log("Not enough resources to upgrade the tool.", false);
            console::log("not enough resources to upgrade the tool");
            return Err(e);
        }
        self.state.tool_level = self.state.tool_level.saturating_add(1);
        let msg = format!("Tool upgraded to level {}", self.state.tool_level);
        self.add_log(&msg, false);
        console::log(&msg);
        Ok(self.refresh_achievements())
    }

    /// Spend `craft_cost` to craft one item.
    pub fn craft(&mut self) -> GameResult<Outcome> {
        let cost = self.config.craft_cost;
        if let Err(e) = self.spend(cost) {
            self.add_log("Not enough resources to craft an item.", false);
            console::log("not enough resources to craft an item");
            return Err(e);
        }
        self.state.crafted_items = self.state.crafted_items.saturating_add(1);
        let msg = format!("Item crafted! ({} total)", self.state.crafted_items);
        self.add_log(&msg, false);
        console::log(&msg);
        Ok(self.refresh_achievements())
    }

    /// One auto-mine event: same resource gain as `mine`, no block counted.
    pub fn tick(&mut self) -> Outcome {
        self.state.resources = self.state.resources.saturating_add(self.yield_per_action());
        self.refresh_achievements()
    }

    /// Apply `ticks` auto-mine events in a row.
    pub fn advance(&mut self, ticks: u32) -> Outcome {
        let mut outcome = Outcome::default();
        for _ in 0..ticks {
            outcome.merge(self.tick());
        }
        outcome
    }

    /// Throw away all progress.
    pub fn reset(&mut self) -> Outcome {
        self.state = GameState::new();
        self.add_log("Game reset.", true);
        Outcome::default()
    }

    /// Dispatch a player action to its transition.
    pub fn apply(&mut self, action: Action) -> GameResult<Outcome> {
        match action {
            Action::Mine => Ok(self.mine()),
            Action::Upgrade => self.upgrade(),
            Action::Craft => self.craft(),
            Action::Reset => Ok(self.reset()),
        }
    }

    /// Snapshot the current state as a save blob.
    pub fn serialize(&self) -> GameResult<String> {
        save::to_json(&self.state)
    }

    /// Replace the whole state with a save blob.
    ///
    /// `None` means the store had nothing; the state is left as is and
    /// `NoSavedState` is returned. A blob that fails to parse also leaves the
    /// state untouched.
    pub fn deserialize(&mut self, snapshot: Option<&str>) -> GameResult<()> {
        let json = snapshot.ok_or(GameError::NoSavedState)?;
        self.state = save::from_json(json)?;
        Ok(())
    }

    fn yield_per_action(&self) -> u64 {
        self.state.tool_level as u64
    }

    fn spend(&mut self, cost: u64) -> GameResult<()> {
        if self.state.resources < cost {
            return Err(GameError::InsufficientResources {
                cost,
                available: self.state.resources,
            });
        }
        self.state.resources -= cost;
        Ok(())
    }

    fn refresh_achievements(&mut self) -> Outcome {
        let derived = derive_achievements(&self.state);
        let unlocked: Vec<Achievement> = derived
            .iter()
            .copied()
            .filter(|a| !self.state.achievements.contains(a))
            .collect();
        self.state.achievements = derived;
        for a in &unlocked {
            self.add_log(&format!("🏆 Achievement unlocked: {}", a.label()), true);
        }
        Outcome { unlocked }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_engine() -> impl Strategy<Value = GameEngine> {
        (0u64..10_000, 0u64..100_000, 1u32..200, 0u64..1_000).prop_map(
            |(blocks, resources, level, crafted)| {
                GameEngine::from_state(
                    EngineConfig::default(),
                    GameState {
                        blocks_mined: blocks,
                        resources,
                        tool_level: level,
                        crafted_items: crafted,
                        achievements: Vec::new(),
                    },
                )
            },
        )
    }

    // ── transition properties ─────────────────────────────

    proptest! {
        #[test]
        fn prop_mine_adds_one_block_and_tool_level(mut e in arb_engine()) {
            let before = e.state().clone();
            e.mine();
            let after = e.state();
            prop_assert_eq!(after.blocks_mined, before.blocks_mined + 1);
            prop_assert_eq!(after.resources, before.resources + before.tool_level as u64);
            prop_assert_eq!(after.tool_level, before.tool_level);
            prop_assert_eq!(after.crafted_items, before.crafted_items);
        }

        #[test]
        fn prop_upgrade_succeeds_iff_affordable(mut e in arb_engine()) {
            let before = e.state().clone();
            let cost = before.tool_level as u64 * 10;
            let result = e.upgrade();
            if before.resources >= cost {
                prop_assert!(result.is_ok());
                prop_assert_eq!(e.state().resources, before.resources - cost);
                prop_assert_eq!(e.state().tool_level, before.tool_level + 1);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(e.state(), &before);
            }
        }

        #[test]
        fn prop_craft_succeeds_iff_affordable(mut e in arb_engine()) {
            let before = e.state().clone();
            let result = e.craft();
            if before.resources >= 50 {
                prop_assert!(result.is_ok());
                prop_assert_eq!(e.state().resources, before.resources - 50);
                prop_assert_eq!(e.state().crafted_items, before.crafted_items + 1);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(e.state(), &before);
            }
        }

        #[test]
        fn prop_tick_matches_mine_resources(e in arb_engine()) {
            let mut mined = GameEngine::from_state(EngineConfig::default(), e.state().clone());
            let mut ticked = GameEngine::from_state(EngineConfig::default(), e.state().clone());
            mined.mine();
            ticked.tick();
            prop_assert_eq!(mined.state().resources, ticked.state().resources);
            prop_assert_eq!(ticked.state().blocks_mined, e.state().blocks_mined);
        }

        #[test]
        fn prop_reset_always_default(mut e in arb_engine()) {
            e.reset();
            prop_assert_eq!(e.state(), &GameState::new());
        }

        #[test]
        fn prop_achievements_always_derived(
            mut e in arb_engine(),
            actions in proptest::collection::vec(0u8..4, 0..40),
        ) {
            for a in actions {
                match a {
                    0 => { e.mine(); }
                    1 => { let _ = e.upgrade(); }
                    2 => { let _ = e.craft(); }
                    _ => { e.tick(); }
                }
                prop_assert_eq!(&e.state().achievements, &derive_achievements(e.state()));
            }
        }

        #[test]
        fn prop_serialize_roundtrip(e in arb_engine()) {
            let blob = e.serialize().unwrap();
            let mut fresh = GameEngine::default();
            fresh.deserialize(Some(&blob)).unwrap();
            prop_assert_eq!(fresh.state(), e.state());
        }
    }
}
