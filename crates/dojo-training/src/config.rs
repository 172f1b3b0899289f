use std::time::Duration;

/// Configuration for the training scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Wall-clock time between ticks.
    pub interval: Duration,
    /// How long a training may run before it stops on its own.
    pub max_duration: chrono::Duration,
    /// Mana consumed per tick of training.
    pub cost: i64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            max_duration: chrono::Duration::seconds(86_400),
            cost: 10,
        }
    }
}

impl TrainingConfig {
    /// Set the time between ticks.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum training duration.
    pub fn with_max_duration(mut self, max_duration: chrono::Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Set the mana cost per tick.
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }
}
