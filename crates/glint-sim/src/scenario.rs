//! Scenario Runner
//!
//! Reproduces the firmware scheduler's cadence over an [`RfLink`]: the
//! envelope is measured every few ticks — always *before* the tick's bit
//! sampling, so the synchronizer never sees a sample the gate would have
//! suppressed — while the link itself runs every tick.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::{LinkConfig, Preferences, RfLink};
//! use glint_sim::front_end::{MemoryPrefsStore, RecordingFeedback, SimFrontEnd};
//! use glint_sim::scenario::{ScenarioConfig, TickScheduler};
//!
//! let mut link = RfLink::new(
//!     LinkConfig::default(),
//!     Preferences::default(),
//!     SimFrontEnd::new(200),
//!     MemoryPrefsStore::new(),
//!     RecordingFeedback::new(),
//! )
//! .unwrap();
//!
//! let mut scheduler = TickScheduler::from_config(&ScenarioConfig::default());
//! let outcomes = scheduler.run(&mut link, 100);
//! assert!(outcomes.is_empty()); // nothing on the air
//! ```

use glint_link::command::CommandOutcome;
use glint_link::hal::{FeedbackSink, PreferenceStore, RfFrontEnd};
use glint_link::link::RfLink;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelConfig;

/// Scenario parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Envelope measurement cadence, in ticks.
    pub strength_every_ticks: u64,
    /// Channel impairments applied by the front end.
    pub channel: ChannelConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            strength_every_ticks: 16,
            channel: ChannelConfig::default(),
        }
    }
}

/// Tick-driven scheduler over one link.
#[derive(Debug)]
pub struct TickScheduler {
    strength_every_ticks: u64,
    ticks_elapsed: u64,
}

impl TickScheduler {
    /// Create a scheduler measuring the envelope every `strength_every_ticks`.
    pub fn new(strength_every_ticks: u64) -> Self {
        Self {
            strength_every_ticks: strength_every_ticks.max(1),
            ticks_elapsed: 0,
        }
    }

    /// Create a scheduler from a scenario configuration.
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(config.strength_every_ticks)
    }

    /// Drive the link for `ticks` ticks, collecting every resolved outcome.
    pub fn run<F, S, B>(&mut self, link: &mut RfLink<F, S, B>, ticks: u64) -> Vec<CommandOutcome>
    where
        F: RfFrontEnd,
        S: PreferenceStore,
        B: FeedbackSink,
    {
        let mut outcomes = Vec::new();
        for _ in 0..ticks {
            if self.ticks_elapsed % self.strength_every_ticks == 0 {
                link.update_signal_level();
            }
            if let Some(outcome) = link.tick() {
                outcomes.push(outcome);
            }
            self.ticks_elapsed += 1;
        }
        outcomes
    }

    /// Total ticks driven so far.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front_end::{MemoryPrefsStore, RecordingFeedback, SimFrontEnd};
    use glint_link::config::LinkConfig;
    use glint_link::prefs::Preferences;

    fn link(strength: u8) -> RfLink<SimFrontEnd, MemoryPrefsStore, RecordingFeedback> {
        RfLink::new(
            LinkConfig::default(),
            Preferences::default(),
            SimFrontEnd::new(strength),
            MemoryPrefsStore::new(),
            RecordingFeedback::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_strength_cadence() {
        let mut link = link(200);
        let mut scheduler = TickScheduler::new(16);
        scheduler.run(&mut link, 160);
        assert_eq!(link.front_end().strength_reads(), 10);
        assert_eq!(scheduler.ticks_elapsed(), 160);
    }

    #[test]
    fn test_measurement_precedes_sampling() {
        // First tick: the measurement opens the gate before the first
        // sample is taken, so sampling starts on tick 0, not tick 1.
        let mut link = link(200);
        let mut scheduler = TickScheduler::new(16);
        scheduler.run(&mut link, 1);
        assert_eq!(link.front_end().bit_reads(), 1);
    }

    #[test]
    fn test_zero_cadence_clamped() {
        let mut link = link(200);
        let mut scheduler = TickScheduler::new(0);
        scheduler.run(&mut link, 10);
        assert_eq!(link.front_end().strength_reads(), 10);
    }
}
