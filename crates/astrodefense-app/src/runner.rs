//! Headless runs: drive the engine for a fixed number of frames and tally
//! what happened.

use log::{debug, info};
use serde::Serialize;

use astrodefense_core::commands::PlayerCommand;
use astrodefense_core::events::GameEvent;
use astrodefense_core::state::GameStateSnapshot;
use astrodefense_sim::{SimConfig, SimulationEngine};

/// Event totals over a run plus the last snapshot seen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub ticks: u64,
    pub shots: u32,
    pub kills: u32,
    pub leaks: u32,
    pub levels_cleared: u32,
    pub levels_failed: u32,
    pub final_snapshot: Option<GameStateSnapshot>,
}

impl RunReport {
    /// Fold one tick's snapshot into the totals.
    pub fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        for event in &snapshot.events {
            match event {
                GameEvent::ProjectileFired { .. } => self.shots += 1,
                GameEvent::HostileKilled { .. } => self.kills += 1,
                GameEvent::HostileLeaked { .. } => self.leaks += 1,
                GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
                GameEvent::LevelFailed { .. } => self.levels_failed += 1,
                GameEvent::Announcement { text } => info!("{}", text.replace('\n', " ")),
                _ => {}
            }
        }
        self.final_snapshot = Some(snapshot.clone());
    }

    /// Human-readable summary lines.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "ticks: {}\nshots: {}\nkills: {}\nleaks: {}\nlevels cleared: {}\nlevels failed: {}",
            self.ticks, self.shots, self.kills, self.leaks, self.levels_cleared, self.levels_failed
        );
        if let Some(snap) = &self.final_snapshot {
            out.push_str(&format!(
                "\nstate: {:?}\nlevel: {} wave: {}\nscore: {} (level {} / target {})\nsimulated: {:.1}s",
                snap.state,
                snap.level,
                snap.wave,
                snap.score,
                snap.level_score,
                snap.target_score,
                snap.time.elapsed_ms / 1000.0
            ));
        }
        out
    }
}

/// Start a game and run it for `ticks` frames as fast as possible.
/// Stops early once the game has ended.
pub fn run_headless(config: SimConfig, ticks: u64) -> RunReport {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);

    let mut report = RunReport::default();
    for _ in 0..ticks {
        let snapshot = engine.tick();
        report.record(&snapshot);
        if snapshot.state.is_finished() {
            debug!("game ended at tick {}", snapshot.time.tick);
            break;
        }
    }
    report
}
