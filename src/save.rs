//! Block Miner save/load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current save format. Bump when adding fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still readable. Only bump on a
//!   breaking change (a field removed or its meaning changed); purely
//!   additive changes keep old saves loadable, with missing fields taking
//!   their defaults.
//!
//! Achievements are written for readability but re-derived on load, so a
//! hand-edited save cannot carry an inconsistent set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::console;
use crate::engine::GameEngine;
use crate::error::{GameError, GameResult};
use crate::state::{derive_achievements, GameState};

/// Save format version. Bump when adding fields.
const SAVE_VERSION: u32 = 1;

/// Oldest version that can still be loaded.
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Key the save blob is stored under.
pub const STORAGE_KEY: &str = "block_miner_save";

/// Autosave interval in ticks. 1 tick/sec × 30 seconds.
pub const AUTOSAVE_INTERVAL: u32 = 30;

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct GameSave {
    blocks_mined: u64,
    resources: u64,
    tool_level: u32,
    crafted_items: u64,
    /// Achievement labels in enumeration order.
    achievements: Vec<String>,
}

impl Default for GameSave {
    fn default() -> Self {
        Self {
            blocks_mined: 0,
            resources: 0,
            tool_level: 1,
            crafted_items: 0,
            achievements: Vec::new(),
        }
    }
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            blocks_mined: state.blocks_mined,
            resources: state.resources,
            tool_level: state.tool_level,
            crafted_items: state.crafted_items,
            achievements: state
                .achievements
                .iter()
                .map(|a| a.label().to_string())
                .collect(),
        },
    }
}

fn apply_save(save: &GameSave) -> GameState {
    let mut state = GameState {
        blocks_mined: save.blocks_mined,
        resources: save.resources,
        tool_level: save.tool_level.max(1),
        crafted_items: save.crafted_items,
        achievements: Vec::new(),
    };
    state.achievements = derive_achievements(&state);
    state
}

/// Encode a state as a save blob.
pub fn to_json(state: &GameState) -> GameResult<String> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// Decode a save blob into a fresh state.
pub fn from_json(json: &str) -> GameResult<GameState> {
    let save_data: SaveData = serde_json::from_str(json)?;

    if save_data.version < MIN_COMPATIBLE_VERSION {
        return Err(GameError::IncompatibleSave {
            saved: save_data.version,
            min_compatible: MIN_COMPATIBLE_VERSION,
        });
    }
    if save_data.version > SAVE_VERSION {
        console::log(&format!(
            "save is from a newer version (saved={}, current={}), loading known fields",
            save_data.version, SAVE_VERSION
        ));
    }

    Ok(apply_save(&save_data.game))
}

/// Key-value blob storage the game persists into.
pub trait SaveStore {
    fn get(&self, key: &str) -> GameResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> GameResult<()>;
    fn remove(&mut self, key: &str) -> GameResult<()>;
}

/// Process-local store for native hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> GameResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`. Only available on wasm32.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// `None` when the page has no window or storage is disabled.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn get(&self, key: &str) -> GameResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> GameResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }
}

/// Write the engine's state to the store.
pub fn save_game(engine: &GameEngine, store: &mut impl SaveStore) -> GameResult<()> {
    let json = engine.serialize()?;
    store.set(STORAGE_KEY, &json)
}

/// Restore the engine's state from the store.
///
/// A blob that cannot be used (corrupt or too old) is deleted so the next
/// start begins a fresh game instead of failing again.
pub fn load_game(engine: &mut GameEngine, store: &mut impl SaveStore) -> GameResult<()> {
    let blob = store.get(STORAGE_KEY)?;
    match engine.deserialize(blob.as_deref()) {
        Ok(()) => Ok(()),
        Err(e @ (GameError::CorruptSave(_) | GameError::IncompatibleSave { .. })) => {
            console::warn(&format!("discarding unusable save: {e}"));
            store.remove(STORAGE_KEY)?;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Remove the saved game, if any.
pub fn delete_save(store: &mut impl SaveStore) -> GameResult<()> {
    store.remove(STORAGE_KEY)
}
