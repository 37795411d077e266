use std::time::{Duration, Instant};

/// Stats kept across restarts within one terminal session
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    /// Start of the game in progress, if the clock is running
    started_at: Option<Instant>,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub last_score: Option<u32>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the game clock; it stands still between games
    pub fn update(&mut self, now: Instant) {
        if let Some(started_at) = self.started_at {
            self.elapsed_time = now.saturating_duration_since(started_at);
        }
    }

    pub fn on_game_start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32, now: Instant) {
        self.update(now);
        self.started_at = None;
        self.games_played += 1;
        self.last_score = Some(final_score);
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
