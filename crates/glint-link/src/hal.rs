//! Hardware Abstraction — external collaborator interfaces
//!
//! The link core never touches hardware directly; it consumes these traits
//! and is driven entirely through them, which is what makes the pipeline
//! testable against software doubles (see the `glint-sim` crate).
//!
//! All three interfaces are infallible from the core's perspective: the
//! front end always produces a reading, the store owns its own durability
//! and error handling, and the feedback hooks are fire-and-forget.

use crate::prefs::Preferences;

/// Analog front end: coarse envelope measurement and the comparator slicer.
pub trait RfFrontEnd {
    /// One coarse reading of the current RF envelope strength, in 8-bit
    /// counts. Called at a lower cadence than per-bit sampling.
    fn measure_channel_strength(&mut self) -> u8;

    /// One slicer decision against the supplied level. Called at most once
    /// per tick, and only while the signal gate admits sampling.
    fn sample_channel_bit(&mut self, decision_threshold: u8) -> bool;
}

/// Durable preference storage. A commit replaces the whole set.
pub trait PreferenceStore {
    fn commit(&mut self, prefs: &Preferences);
}

/// Feedback indication hooks, fired once per resolved frame.
pub trait FeedbackSink {
    /// A command was decoded and applied.
    fn signal_ack(&mut self);

    /// A synchronized frame was rejected or could not be decoded.
    fn signal_reject(&mut self);
}
