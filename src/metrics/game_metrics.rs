use std::time::{Duration, Instant};

/// Session bookkeeping shown next to the board
pub struct GameMetrics {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Elapsed time stops advancing once the game is over
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            running: true,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed = self.started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    /// Record a finished game. Returns true on a new high score.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.running = false;
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    /// One-line session summary for the log
    pub fn summary(&self) -> String {
        format!(
            "games played: {}, high score: {}",
            self.games_played, self.high_score
        )
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
