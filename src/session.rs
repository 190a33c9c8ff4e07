//! Externally-owned play-session signals.
//!
//! The host game owns the score, the game-over flag, and the moment play
//! begins; this core only reads them. They are plain resources rather than
//! process-wide singletons so every system declares exactly the capability
//! it needs.

use bevy::prelude::*;

/// The session score. Monotonically non-decreasing during normal play;
/// reset by the host on restart. Read-only inside this core.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct GameScore {
    pub points: u32,
}

/// Set once by the host when the player dies. While true, spawn controllers
/// stop acquiring and removal signals are suppressed.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct GameOver(pub bool);

/// Best score seen this process. In-memory only.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct HighScore {
    pub points: u32,
}

/// Written by the host when gameplay begins (or restarts). Arms every spawn
/// controller's first wait and re-rolls obstacle generator parity.
#[derive(Message, Debug, Clone, Copy)]
pub struct SessionStarted;

/// Registers session resources and the high-score tracker.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<GameScore>()
            .init_resource::<GameOver>()
            .init_resource::<HighScore>()
            .add_message::<SessionStarted>()
            .add_systems(Update, track_high_score.in_set(crate::CoreSet::Difficulty));
    }
}

fn track_high_score(score: Res<GameScore>, mut high: ResMut<HighScore>) {
    if score.points > high.points {
        high.points = score.points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_follows_peak_not_current() {
        let mut app = App::new();
        app.add_plugins(SessionPlugin);
        app.world_mut().resource_mut::<GameScore>().points = 120;
        app.update();
        // Host resets the score on restart; the high score keeps the peak.
        app.world_mut().resource_mut::<GameScore>().points = 0;
        app.update();
        assert_eq!(app.world().resource::<HighScore>().points, 120);
    }
}
