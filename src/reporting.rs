//! Fire-and-forget score submission
//!
//! When a round ends with a positive score, each attached reporter gets the
//! score as a detached future. The simulation never waits on it and never
//! sees its result; failures end up in the log.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use thiserror::Error;

use crate::sim::{EventBus, EventKind, GameEvent, SubscriptionId};

/// Why a score could not be reported
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("score service unavailable")]
    Unavailable,
    #[error("score rejected: {0}")]
    Rejected(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Pending submission. Native futures run on a helper thread, so they must be `Send`.
#[cfg(target_arch = "wasm32")]
pub type ReportFuture = Pin<Box<dyn Future<Output = Result<(), ReportError>> + 'static>>;
#[cfg(not(target_arch = "wasm32"))]
pub type ReportFuture = Pin<Box<dyn Future<Output = Result<(), ReportError>> + Send + 'static>>;

/// A destination for finished-round scores
pub trait ScoreReporter {
    /// Short label for log lines
    fn name(&self) -> &str;

    /// Start submitting `score`
    fn submit(&self, score: u64) -> ReportFuture;
}

fn log_outcome(name: &str, score: u64, result: Result<(), ReportError>) {
    match result {
        Ok(()) => log::debug!("Reported score {} to {}", score, name),
        Err(e) => log::warn!("Score report to {} failed: {}", name, e),
    }
}

/// Run a submission without waiting for it
#[cfg(target_arch = "wasm32")]
pub fn spawn_detached(name: String, score: u64, report: ReportFuture) {
    wasm_bindgen_futures::spawn_local(async move {
        log_outcome(&name, score, report.await);
    });
}

/// Run a submission without waiting for it
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached(name: String, score: u64, report: ReportFuture) {
    let spawned = std::thread::Builder::new()
        .name(format!("score-report-{}", name))
        .spawn(move || log_outcome(&name, score, pollster::block_on(report)));
    if let Err(e) = spawned {
        log::warn!("Could not start score report thread: {}", e);
    }
}

/// Send every positive final score to `reporter`
pub fn attach_reporter(bus: &mut EventBus, reporter: Rc<dyn ScoreReporter>) -> SubscriptionId {
    bus.subscribe(EventKind::GameOver, move |event| {
        if let GameEvent::GameOver { score } = *event {
            if score > 0 {
                spawn_detached(reporter.name().to_string(), score, reporter.submit(score));
            }
        }
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::highscores::{HighScores, LocalLeaderboard};
    use crate::sim::World;
    use std::sync::mpsc::{Sender, channel};
    use std::time::Duration;

    struct ChannelReporter {
        tx: Sender<u64>,
        fail: bool,
    }

    impl ScoreReporter for ChannelReporter {
        fn name(&self) -> &str {
            "channel"
        }

        fn submit(&self, score: u64) -> ReportFuture {
            let tx = self.tx.clone();
            let fail = self.fail;
            Box::pin(async move {
                let _ = tx.send(score);
                if fail {
                    Err(ReportError::Unavailable)
                } else {
                    Ok(())
                }
            })
        }
    }

    fn world_ending_with(score: u64, reporter: Rc<dyn ScoreReporter>) -> World {
        let mut world = World::new(Config::default(), 1);
        attach_reporter(&mut world.bus, reporter);
        world.start();
        world.state.add_score(score, &mut world.bus);
        world.state.game_over(&mut world.bus);
        world
    }

    #[test]
    fn test_positive_score_is_reported() {
        let (tx, rx) = channel();
        world_ending_with(4, Rc::new(ChannelReporter { tx, fail: false }));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(4));
    }

    #[test]
    fn test_zero_score_is_not_reported() {
        let (tx, rx) = channel();
        world_ending_with(0, Rc::new(ChannelReporter { tx, fail: false }));
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_failed_report_leaves_game_alone() {
        let (tx, rx) = channel();
        let mut world = world_ending_with(2, Rc::new(ChannelReporter { tx, fail: true }));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(2));
        assert!(world.state.is_game_over());
        assert_eq!(world.state.score, 2);

        world.start();
        assert!(world.state.is_playing());
    }

    #[test]
    fn test_leaderboard_records_rounds() {
        let board = Rc::new(LocalLeaderboard::new(HighScores::new()));
        world_ending_with(9, board.clone());
        world_ending_with(3, board.clone());
        let table = board.snapshot();
        assert_eq!(table.top_score(), Some(9));
        assert_eq!(table.entries.len(), 2);
    }
}
