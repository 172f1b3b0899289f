//! The periodic training loop.

use std::future::Future;
use std::sync::Arc;

use dojo_core::{Clock, PlayerId};
use dojo_store::PlayerStore;
use tokio::time::MissedTickBehavior;

use crate::config::TrainingConfig;
use crate::error::{TrainingError, TrainingResult};
use crate::tick::{self, TickOutcome};

/// Summary of one pass over every stored player.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Players not training.
    pub idle: usize,
    /// Players whose missing start time was set.
    pub repaired: usize,
    /// Players whose training timed out.
    pub finished: usize,
    /// Players who spent mana and grew a skill.
    pub trained: usize,
    /// Players training without enough mana.
    pub stalled: usize,
    /// Players whose record could not be processed.
    pub failures: Vec<(PlayerId, TrainingError)>,
}

impl TickReport {
    fn record(&mut self, outcome: &TickOutcome) {
        match outcome {
            TickOutcome::Idle => self.idle += 1,
            TickOutcome::Repaired { .. } => self.repaired += 1,
            TickOutcome::Finished { .. } => self.finished += 1,
            TickOutcome::Trained { .. } => self.trained += 1,
            TickOutcome::Stalled { .. } => self.stalled += 1,
        }
    }

    /// Number of players visited, failed ones included.
    pub fn total(&self) -> usize {
        self.idle + self.repaired + self.finished + self.trained + self.stalled + self.failures.len()
    }
}

/// Advances every player's active training on a fixed cadence.
#[derive(Clone)]
pub struct TrainingScheduler {
    store: Arc<PlayerStore>,
    clock: Arc<dyn Clock>,
    config: TrainingConfig,
}

impl std::fmt::Debug for TrainingScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingScheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TrainingScheduler {
    /// Create a scheduler over `store`.
    pub fn new(store: Arc<PlayerStore>, clock: Arc<dyn Clock>, config: TrainingConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// The scheduler's configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Advance a single player by one tick and persist the result.
    pub fn tick_player(&self, player: &PlayerId) -> TrainingResult<TickOutcome> {
        let now = self.clock.now();
        self.store
            .update(player, |state| Ok(tick::advance(state, now, &self.config)))
    }

    /// Advance every stored player by one tick.
    ///
    /// A failure on one player is logged and recorded in the report; the
    /// others are still processed. Only failing to list players is an error.
    pub fn tick_all(&self) -> TrainingResult<TickReport> {
        let mut report = TickReport::default();
        for player in self.store.player_ids()? {
            match self.tick_player(&player) {
                Ok(outcome) => {
                    log_outcome(&player, &outcome);
                    report.record(&outcome);
                }
                Err(e) => {
                    tracing::error!(player = %player, error = %e, "training tick failed");
                    report.failures.push((player, e));
                }
            }
        }
        tracing::debug!(
            players = report.total(),
            trained = report.trained,
            finished = report.finished,
            stalled = report.stalled,
            failed = report.failures.len(),
            "training tick complete"
        );
        Ok(report)
    }

    /// Tick on the configured interval until `shutdown` resolves.
    ///
    /// The first tick runs immediately. Each tick runs on the blocking pool
    /// since store I/O is synchronous.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(interval = ?self.config.interval, "training scheduler started");
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                _ = interval.tick() => {
                    let scheduler = self.clone();
                    let result = tokio::task::spawn_blocking(move || scheduler.tick_all())
                        .await
                        .map_err(TrainingError::from)
                        .and_then(|r| r);
                    if let Err(e) = result {
                        tracing::error!(error = %e, "training tick failed");
                    }
                }
            }
        }
        tracing::info!("training scheduler stopped");
    }
}

fn log_outcome(player: &PlayerId, outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Idle => {}
        TickOutcome::Repaired { skill } => {
            tracing::warn!(player = %player, skill, "training had no start time; starting now");
        }
        TickOutcome::Finished { skill } => {
            tracing::info!(player = %player, skill, "training finished");
        }
        TickOutcome::Trained { skill, level, mana } => {
            tracing::info!(player = %player, skill, %level, %mana, "trained");
        }
        TickOutcome::Stalled { skill } => {
            tracing::debug!(player = %player, skill, "not enough mana to train");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use dojo_core::{FieldValue, ManualClock, Number, PlayerState, fields};
    use std::time::Duration as StdDuration;

    const NOW: i64 = 1_700_000_000;

    fn id(raw: &str) -> PlayerId {
        PlayerId::parse(raw).unwrap()
    }

    fn training(skill: &str, started: i64) -> PlayerState {
        let mut state = PlayerState::default();
        state.start_training(skill, DateTime::from_timestamp(started, 0).unwrap());
        state
    }

    fn fixture(store: Arc<PlayerStore>) -> (TrainingScheduler, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_timestamp(NOW));
        let scheduler = TrainingScheduler::new(store, clock.clone(), TrainingConfig::default());
        (scheduler, clock)
    }

    #[test]
    fn empty_store_is_fine() {
        let (scheduler, _) = fixture(Arc::new(PlayerStore::in_memory()));
        let report = scheduler.tick_all().unwrap();
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn ticks_every_player() {
        let store = Arc::new(PlayerStore::in_memory());
        store.put(&id("idle"), &PlayerState::default()).unwrap();
        store.put(&id("busy"), &training("seal_flame", NOW - 100)).unwrap();
        store.put(&id("done"), &training("seal_gale", NOW - 90_000)).unwrap();
        let mut broke = training("seal_echo", NOW - 100);
        broke.set(fields::MANA, FieldValue::Integer(5));
        store.put(&id("broke"), &broke).unwrap();

        let (scheduler, _) = fixture(Arc::clone(&store));
        let report = scheduler.tick_all().unwrap();
        assert_eq!(report.idle, 1);
        assert_eq!(report.trained, 1);
        assert_eq!(report.finished, 1);
        assert_eq!(report.stalled, 1);
        assert!(report.failures.is_empty());

        let busy = store.get(&id("busy")).unwrap();
        assert_eq!(busy.mana(), Number::Integer(490));
        assert_eq!(busy.number("seal_flame"), Number::Integer(1));

        let done = store.get(&id("done")).unwrap();
        assert!(done.active_training().is_none());
        assert!(done.training_start().is_none());
        assert_eq!(done.number("seal_gale"), Number::Integer(0));

        assert_eq!(store.get(&id("broke")).unwrap(), broke);
    }

    #[test]
    fn training_runs_out_after_max_duration() {
        let store = Arc::new(PlayerStore::in_memory());
        store.put(&id("1"), &training("seal_flow", NOW)).unwrap();
        let (scheduler, clock) = fixture(Arc::clone(&store));

        for _ in 0..3 {
            clock.advance(Duration::seconds(600));
            scheduler.tick_all().unwrap();
        }
        assert_eq!(store.get(&id("1")).unwrap().number("seal_flow"), Number::Integer(3));

        clock.advance(Duration::seconds(86_400));
        let report = scheduler.tick_all().unwrap();
        assert_eq!(report.finished, 1);
        let state = store.get(&id("1")).unwrap();
        assert!(state.active_training().is_none());
        assert_eq!(state.number("seal_flow"), Number::Integer(3));
        assert_eq!(state.mana(), Number::Integer(470));
    }

    #[test]
    fn repaired_start_is_persisted() {
        let store = Arc::new(PlayerStore::in_memory());
        let mut state = PlayerState::default();
        state.set(fields::ACTIVE_TRAINING, "seal_shadow");
        store.put(&id("1"), &state).unwrap();

        let (scheduler, _) = fixture(Arc::clone(&store));
        let report = scheduler.tick_all().unwrap();
        assert_eq!(report.repaired, 1);
        let stored = store.get(&id("1")).unwrap();
        assert_eq!(stored.training_start().unwrap().timestamp(), NOW);
        assert_eq!(stored.mana(), Number::Integer(500));
    }

    #[test]
    fn corrupt_record_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(PlayerStore::open(dir.path()).unwrap());
        store.put(&id("good"), &training("seal_flame", NOW - 100)).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let (scheduler, _) = fixture(Arc::clone(&store));
        let report = scheduler.tick_all().unwrap();
        assert_eq!(report.trained, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, id("bad"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("bad.json")).unwrap(),
            "{ not json"
        );
    }

    #[tokio::test]
    async fn run_until_ticks_then_stops() {
        let store = Arc::new(PlayerStore::in_memory());
        store.put(&id("1"), &training("seal_radiance", NOW)).unwrap();
        let clock = Arc::new(ManualClock::at_timestamp(NOW + 10));
        let config = TrainingConfig::default().with_interval(StdDuration::from_millis(10));
        let scheduler = TrainingScheduler::new(Arc::clone(&store), clock, config);

        scheduler
            .run_until(tokio::time::sleep(StdDuration::from_millis(35)))
            .await;

        let level = store.get(&id("1")).unwrap().number("seal_radiance");
        assert!(level.as_f64() >= 1.0, "expected at least one tick, got {level}");
    }
}
