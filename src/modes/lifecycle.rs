//! Presentation phases around a single board.
//!
//! The engine knows nothing about time. [`Lifecycle`] owns the current engine
//! and decides, from the instants it is handed, when to count down, tick,
//! reveal the dead snake and swap in a fresh board.

use std::time::{Duration, Instant};

use tracing::info;

use crate::game::{BoardEngine, EngineError, GameConfig};
use crate::input::KeyAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh board on screen, waiting for any key
    Waiting,
    /// Pre-game countdown currently showing `remaining`
    Countdown { remaining: u32 },
    /// Engine ticking at the configured cadence
    Playing,
    /// The first `revealed` body segments are drawn dead, head first
    Dying { revealed: usize },
    /// Whole snake drawn dead, pausing before the next board
    GameOver,
}

/// Something the loop driver may want to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Ended { score: u32 },
}

pub struct Lifecycle {
    config: GameConfig,
    engine: BoardEngine,
    phase: Phase,
    /// When the current phase takes its next step; unused while waiting
    next_at: Instant,
}

impl Lifecycle {
    pub fn new(config: GameConfig, now: Instant) -> Result<Self, EngineError> {
        let engine = BoardEngine::from_config(&config)?;
        Ok(Self {
            config,
            engine,
            phase: Phase::Waiting,
            next_at: now,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// Instant of the next scheduled step, `None` while waiting for a key
    pub fn next_deadline(&self) -> Option<Instant> {
        (self.phase != Phase::Waiting).then_some(self.next_at)
    }

    /// Route a key press according to the current phase
    pub fn handle_key(&mut self, action: KeyAction, now: Instant) {
        match (self.phase, action) {
            (Phase::Waiting, KeyAction::Turn(_) | KeyAction::Other) => {
                self.phase = Phase::Countdown {
                    remaining: self.config.countdown_from,
                };
                self.next_at = now + self.config.countdown_step();
            }
            (Phase::Playing, KeyAction::Turn(direction)) => {
                self.engine.request_direction_change(direction);
            }
            _ => {}
        }
    }

    /// Run every step that is due at `now`.
    ///
    /// A schedule more than one interval behind (a stalled terminal) is
    /// pulled up to `now`, so at most one overdue step runs instead of a burst.
    pub fn advance(&mut self, now: Instant) -> Result<Vec<GameEvent>, EngineError> {
        let stalled = self
            .step_interval()
            .is_some_and(|interval| now.saturating_duration_since(self.next_at) > interval);
        if stalled {
            self.next_at = now;
        }

        let mut events = Vec::new();
        while self.phase != Phase::Waiting && self.next_at <= now {
            if let Some(event) = self.step()? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Time between the steps of the current phase
    fn step_interval(&self) -> Option<Duration> {
        match self.phase {
            Phase::Waiting => None,
            Phase::Countdown { .. } => Some(self.config.countdown_step()),
            Phase::Playing => Some(self.config.tick_interval()),
            Phase::Dying { .. } => Some(self.config.death_segment()),
            Phase::GameOver => Some(self.config.game_over_pause()),
        }
    }

    fn step(&mut self) -> Result<Option<GameEvent>, EngineError> {
        let mut event = None;

        match self.phase {
            Phase::Waiting => {}
            Phase::Countdown { remaining: 0 } => {
                self.phase = Phase::Playing;
                self.next_at += self.config.tick_interval();
                info!(
                    rows = self.engine.rows(),
                    columns = self.engine.columns(),
                    "game started"
                );
                event = Some(GameEvent::Started);
            }
            Phase::Countdown { remaining } => {
                self.phase = Phase::Countdown {
                    remaining: remaining - 1,
                };
                self.next_at += self.config.countdown_step();
            }
            Phase::Playing => {
                let result = self.engine.tick();
                if result.terminated {
                    let score = self.engine.score();
                    info!(score, length = self.engine.snake_len(), "game over");
                    // Head turns dead in the same frame as the collision
                    self.phase = Phase::Dying { revealed: 1 };
                    self.next_at += self.config.death_segment();
                    event = Some(GameEvent::Ended { score });
                } else {
                    self.next_at += self.config.tick_interval();
                }
            }
            Phase::Dying { revealed } if revealed < self.engine.snake_len() => {
                self.phase = Phase::Dying {
                    revealed: revealed + 1,
                };
                self.next_at += self.config.death_segment();
            }
            Phase::Dying { .. } => {
                self.phase = Phase::GameOver;
                self.next_at += self.config.game_over_pause();
            }
            Phase::GameOver => {
                self.engine = BoardEngine::from_config(&self.config)?;
                self.phase = Phase::Waiting;
            }
        }

        Ok(event)
    }

    /// Number of body segments to draw as dead
    pub fn dead_segments(&self) -> usize {
        match self.phase {
            Phase::Dying { revealed } => revealed,
            Phase::GameOver => self.engine.snake_len(),
            _ => 0,
        }
    }
}
