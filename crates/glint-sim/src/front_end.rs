//! Simulated Front End and Device Doubles
//!
//! Pure-software stand-ins for the hardware interfaces the link consumes:
//! a scripted analog front end with call accounting, a preference store
//! that records every commit, and a feedback sink that counts indications.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::hal::RfFrontEnd;
//! use glint_sim::front_end::SimFrontEnd;
//!
//! let mut fe = SimFrontEnd::new(180);
//! fe.queue_bits(&[true, false, true]);
//!
//! assert_eq!(fe.measure_channel_strength(), 180);
//! assert!(fe.sample_channel_bit(90));
//! assert_eq!(fe.bit_reads(), 1);
//! ```

use std::collections::VecDeque;

use glint_link::hal::{FeedbackSink, PreferenceStore, RfFrontEnd};
use glint_link::prefs::Preferences;

use crate::channel::NoisyChannel;

/// Scripted analog front end.
///
/// Strength readings return the programmed level; bit samples drain a
/// queue, with an idle `false` once the queue is empty. An optional noisy
/// channel corrupts both on the way out.
#[derive(Debug)]
pub struct SimFrontEnd {
    strength: u8,
    bits: VecDeque<bool>,
    channel: Option<NoisyChannel>,
    strength_reads: u64,
    bit_reads: u64,
    last_threshold: Option<u8>,
}

impl SimFrontEnd {
    /// Create a front end reporting the given envelope strength.
    pub fn new(strength: u8) -> Self {
        Self {
            strength,
            bits: VecDeque::new(),
            channel: None,
            strength_reads: 0,
            bit_reads: 0,
            last_threshold: None,
        }
    }

    /// Route readings through a noisy channel.
    pub fn with_channel(mut self, channel: NoisyChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Change the reported envelope strength.
    pub fn set_strength(&mut self, strength: u8) {
        self.strength = strength;
    }

    /// Append samples to the bit queue, oldest first.
    pub fn queue_bits(&mut self, bits: &[bool]) {
        self.bits.extend(bits.iter().copied());
    }

    /// Samples still queued.
    pub fn remaining(&self) -> usize {
        self.bits.len()
    }

    /// Number of strength measurements taken.
    pub fn strength_reads(&self) -> u64 {
        self.strength_reads
    }

    /// Number of bit samples taken.
    pub fn bit_reads(&self) -> u64 {
        self.bit_reads
    }

    /// Decision threshold of the most recent bit sample.
    pub fn last_threshold(&self) -> Option<u8> {
        self.last_threshold
    }
}

impl RfFrontEnd for SimFrontEnd {
    fn measure_channel_strength(&mut self) -> u8 {
        self.strength_reads += 1;
        match &mut self.channel {
            Some(channel) => channel.corrupt_strength(self.strength),
            None => self.strength,
        }
    }

    fn sample_channel_bit(&mut self, decision_threshold: u8) -> bool {
        self.bit_reads += 1;
        self.last_threshold = Some(decision_threshold);
        let bit = self.bits.pop_front().unwrap_or(false);
        match &mut self.channel {
            Some(channel) => channel.corrupt_bit(bit),
            None => bit,
        }
    }
}

/// Preference store double that records every commit in order.
#[derive(Debug, Default)]
pub struct MemoryPrefsStore {
    commits: Vec<Preferences>,
}

impl MemoryPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed preference sets, oldest first.
    pub fn commits(&self) -> &[Preferences] {
        &self.commits
    }

    /// The most recent committed set.
    pub fn latest(&self) -> Option<&Preferences> {
        self.commits.last()
    }
}

impl PreferenceStore for MemoryPrefsStore {
    fn commit(&mut self, prefs: &Preferences) {
        tracing::debug!(?prefs, "preferences committed");
        self.commits.push(*prefs);
    }
}

/// Feedback sink double that counts indications.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    acks: u64,
    rejects: u64,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acks(&self) -> u64 {
        self.acks
    }

    pub fn rejects(&self) -> u64 {
        self.rejects
    }
}

impl FeedbackSink for RecordingFeedback {
    fn signal_ack(&mut self) {
        self.acks += 1;
    }

    fn signal_reject(&mut self) {
        self.rejects += 1;
    }
}
