//! RF Link Pipeline
//!
//! Ties the components into the per-tick flow the device scheduler drives:
//!
//! ```text
//!                       ┌──────────────┐ strength ┌────────────┐
//!  measure (sparse) ───►│  SignalGate  │─────────►│  admission │
//!                       └──────────────┘   peak   └─────┬──────┘
//!                                                       │ open
//!                       ┌──────────────┐   bit   ┌──────▼──────────┐
//!  slicer (per tick) ──►│  front end   │────────►│ BitSynchronizer │
//!                       └──────────────┘         └──────┬──────────┘
//!                                                       │ frame window
//!                       ┌──────────────┐  raw id ┌──────▼───────┐
//!  ack / reject ◄───────│  Authorizer  │◄────────│ FrameDecoder │
//!                       └──────────────┘         └──────────────┘
//! ```
//!
//! Everything is single-threaded and tick-driven: each call completes all of
//! its work before returning, nothing blocks, and a tick's work is either
//! done in full or skipped entirely at the admission gate. The caller must
//! refresh the signal level *before* bit sampling within a tick when both
//! are due, so the synchronizer never sees a sample the gate would have
//! suppressed.

use crate::bit_sync::BitSynchronizer;
use crate::command::{CommandAuthorizer, CommandOutcome};
use crate::config::{ConfigError, LinkConfig};
use crate::frame_decoder::FrameDecoder;
use crate::hal::{FeedbackSink, PreferenceStore, RfFrontEnd};
use crate::prefs::Preferences;
use crate::signal_gate::SignalGate;

/// Running counters for the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkStats {
    /// Ticks skipped at the admission gate.
    pub ticks_gated: u64,
    /// Channel bits sampled.
    pub bits_sampled: u64,
    /// Frame boundaries detected.
    pub frames_detected: u64,
    /// Commands applied.
    pub commands_applied: u64,
    /// Synchronized frames rejected or unmatched.
    pub frames_rejected: u64,
}

/// The RF command link: admission gate, synchronizer, decoder, and
/// authorizer over caller-supplied hardware interfaces.
pub struct RfLink<F, S, B> {
    gate: SignalGate,
    sync: BitSynchronizer,
    decoder: FrameDecoder,
    auth: CommandAuthorizer,
    front_end: F,
    store: S,
    feedback: B,
    stats: LinkStats,
}

impl<F, S, B> RfLink<F, S, B>
where
    F: RfFrontEnd,
    S: PreferenceStore,
    B: FeedbackSink,
{
    /// Build a link over the given interfaces. Fails only on an
    /// inconsistent configuration.
    pub fn new(
        config: LinkConfig,
        initial_prefs: Preferences,
        front_end: F,
        store: S,
        feedback: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gate: SignalGate::new(config.min_signal_level),
            sync: BitSynchronizer::new(&config),
            decoder: FrameDecoder::new(&config),
            auth: CommandAuthorizer::new(initial_prefs),
            front_end,
            store,
            feedback,
            stats: LinkStats::default(),
        })
    }

    /// Refresh the signal gate from a fresh envelope measurement. Called at
    /// a lower cadence than [`tick`](Self::tick), and before it within the
    /// same tick when both are due.
    pub fn update_signal_level(&mut self) {
        let strength = self.front_end.measure_channel_strength();
        let peak = self.gate.update(strength);
        tracing::trace!(strength, peak, "signal level updated");
    }

    /// Run one tick of the link: sample, synchronize, and — on a frame
    /// boundary — decode, authorize, and fire feedback.
    ///
    /// Returns an outcome only for ticks that consumed a synchronized
    /// frame; quiet ticks and gated ticks return `None`.
    pub fn tick(&mut self) -> Option<CommandOutcome> {
        if !self.gate.should_sample() {
            self.stats.ticks_gated += 1;
            return None;
        }

        let bit = self.front_end.sample_channel_bit(self.gate.slicer_threshold());
        self.stats.bits_sampled += 1;

        let detection = self.sync.push(bit)?;
        self.stats.frames_detected += 1;

        let outcome = match self.decoder.decode(detection.window) {
            Some(raw) => self.auth.resolve(raw, &mut self.store),
            None => {
                self.auth.note_undecodable();
                CommandOutcome::NoMatch
            }
        };

        match outcome {
            CommandOutcome::Applied(cmd) => {
                self.stats.commands_applied += 1;
                tracing::debug!(?cmd, "command applied");
                self.feedback.signal_ack();
            }
            CommandOutcome::RejectedUnauthorized(cmd) => {
                self.stats.frames_rejected += 1;
                tracing::debug!(?cmd, "command rejected");
                self.feedback.signal_reject();
            }
            CommandOutcome::NoMatch => {
                self.stats.frames_rejected += 1;
                tracing::debug!("frame did not decode");
                self.feedback.signal_reject();
            }
        }

        Some(outcome)
    }

    /// Current cached preference set.
    pub fn prefs(&self) -> &Preferences {
        self.auth.prefs()
    }

    /// Pipeline counters.
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// The front end, for inspection by harnesses.
    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// The preference store, for inspection by harnesses.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The feedback sink, for inspection by harnesses.
    pub fn feedback(&self) -> &B {
        &self.feedback
    }
}
