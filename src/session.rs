//! One running game: engine, auto-mine clock and save store wired together.
//!
//! The host owns a `Session` (in the browser, behind `Rc<RefCell<_>>` shared
//! by the button callbacks and the frame loop), forwards player actions to
//! `perform`, calls `frame` on every wake-up, and re-reads `engine().state()`
//! to refresh its display.

use crate::actions::Action;
use crate::config::EngineConfig;
use crate::console;
use crate::engine::{GameEngine, Outcome};
use crate::error::{GameError, GameResult};
use crate::save::{self, SaveStore, AUTOSAVE_INTERVAL};
use crate::time::GameTime;

pub struct Session<S: SaveStore> {
    engine: GameEngine,
    clock: GameTime,
    store: S,
    /// Ticks since the last successful save.
    ticks_since_save: u32,
}

impl<S: SaveStore> Session<S> {
    /// Build a session and restore any saved game from `store`.
    pub fn start(config: EngineConfig, mut store: S) -> Self {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let clock = GameTime::new(config.tick_interval_ms);
        let mut engine = GameEngine::new(config);
        match save::load_game(&mut engine, &mut store) {
            Ok(()) => engine.add_log("Saved game loaded.", false),
            Err(GameError::NoSavedState) => engine.add_log("Welcome to Block Miner!", true),
            Err(e) => {
                console::warn(&format!("starting a new game: {e}"));
                engine.add_log("Saved game could not be loaded. Starting fresh.", true);
            }
        }

        Self {
            engine,
            clock,
            store,
            ticks_since_save: 0,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the auto-mine ticks that came due by `now_ms` and autosave when
    /// enough of them have passed. Autosave failures are reported, not fatal.
    pub fn frame(&mut self, now_ms: f64) -> Outcome {
        let ticks = self.clock.update(now_ms);
        if ticks == 0 {
            return Outcome::default();
        }
        let outcome = self.engine.advance(ticks);

        self.ticks_since_save = self.ticks_since_save.saturating_add(ticks);
        if self.ticks_since_save >= AUTOSAVE_INTERVAL {
            match save::save_game(&self.engine, &mut self.store) {
                Ok(()) => self.ticks_since_save = 0,
                Err(e) => console::warn(&format!("autosave failed: {e}")),
            }
        }
        outcome
    }

    /// Apply a player action. Reset also deletes the saved game.
    pub fn perform(&mut self, action: Action) -> GameResult<Outcome> {
        match action {
            Action::Reset => Ok(self.reset()),
            other => self.engine.apply(other),
        }
    }

    pub fn save(&mut self) -> GameResult<()> {
        if let Err(e) = save::save_game(&self.engine, &mut self.store) {
            console::warn(&format!("save failed: {e}"));
            self.engine.add_log("Saving failed.", true);
            return Err(e);
        }
        self.ticks_since_save = 0;
        self.engine.add_log("Game saved.", false);
        Ok(())
    }

    /// Replace the current game with the saved one, if there is one.
    pub fn load(&mut self) -> GameResult<()> {
        match save::load_game(&mut self.engine, &mut self.store) {
            Ok(()) => {
                self.ticks_since_save = 0;
                self.clock.restart();
                self.engine.add_log("Game loaded.", false);
                Ok(())
            }
            Err(e) => {
                if !e.is_soft() {
                    console::warn(&format!("load failed: {e}"));
                }
                self.engine.add_log(&e.to_string(), false);
                Err(e)
            }
        }
    }

    /// Start over and forget the saved game. Never fails: a store that
    /// refuses the delete is reported and the fresh game stands.
    pub fn reset(&mut self) -> Outcome {
        let outcome = self.engine.reset();
        self.ticks_since_save = 0;
        self.clock.restart();
        if let Err(e) = save::delete_save(&mut self.store) {
            console::warn(&format!("could not delete saved game: {e}"));
        }
        outcome
    }
}

#[cfg(target_arch = "wasm32")]
impl Session<save::LocalStorage> {
    /// Session backed by the page's `localStorage`.
    pub fn open_browser(config: EngineConfig) -> Option<Self> {
        Some(Self::start(config, save::LocalStorage::open()?))
    }

    /// `frame` at the current `performance.now()`.
    pub fn frame_now(&mut self) -> Outcome {
        match crate::time::now_ms() {
            Some(now) => self.frame(now),
            None => Outcome::default(),
        }
    }
}
