/// Tunable numbers for the mining engine.

/// Cost and cadence constants the engine is built with.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Upgrade cost per current tool level (level 1 → 10, level 2 → 20, ...).
    pub upgrade_base_cost: u64,
    /// Flat cost of crafting one item.
    pub craft_cost: u64,
    /// Wall-clock milliseconds between two auto-mine ticks.
    pub tick_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            upgrade_base_cost: 10,
            craft_cost: 50,
            tick_interval_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Upgrade price at the given tool level.
    pub fn upgrade_cost(&self, tool_level: u32) -> u64 {
        self.upgrade_base_cost.saturating_mul(tool_level as u64)
    }
}
