//! # Glint Link — RF command link for a harvested-power device
//!
//! This crate is the control core of a battery-free decorative device that
//! receives low-rate, amplitude-modulated commands over a single comparator
//! tap. There is no stable clock reference and the power budget is measured
//! in microamps, so the receiver is built around three ideas:
//!
//! - **Admission gating**: a rolling peak of coarse envelope readings
//!   decides whether bit sampling is worth powering the comparator path at
//!   all ([`SignalGate`]).
//! - **Correlation synchronization**: every new sample is checked against a
//!   fixed preamble pattern by counting matching bits; a frame boundary is
//!   declared when the score clears a threshold ([`BitSynchronizer`],
//!   [`correlator`]).
//! - **Error-tolerant decoding**: the oversampled payload is compacted and
//!   resolved either by nearest-codeword correlation over a high-distance
//!   codebook, or by a Hamming(8,4) syndrome decode ([`FrameDecoder`]).
//!
//! Decoded identifiers pass through a one-shot authorization gate before
//! mutating device preferences ([`CommandAuthorizer`]).
//!
//! ## Signal Flow
//!
//! ```text
//! envelope ──► SignalGate ──► slicer ──► BitSynchronizer ──► FrameDecoder
//!                                                                 │
//!              preferences ◄── CommandAuthorizer ◄── raw command id
//! ```
//!
//! ## Example
//!
//! Feed one hand-built frame through the synchronizer and decoder:
//!
//! ```rust
//! use glint_link::{BitSynchronizer, FrameDecoder, LinkConfig};
//!
//! let config = LinkConfig::default();
//! let mut sync = BitSynchronizer::new(&config);
//! let decoder = FrameDecoder::new(&config);
//!
//! // Transmit order: 16 preamble samples, then each codeword bit held for
//! // one oversampling period.
//! let codeword = decoder.codebook().get(3).unwrap();
//! let mut samples = Vec::new();
//! for i in (0..16).rev() {
//!     samples.push((config.sync_pattern >> i) & 1 == 1);
//! }
//! for j in (0..16).rev() {
//!     for _ in 0..config.oversampling {
//!         samples.push((codeword >> j) & 1 == 1);
//!     }
//! }
//!
//! let mut decoded = None;
//! for bit in samples {
//!     if let Some(detection) = sync.push(bit) {
//!         decoded = decoder.decode(detection.window);
//!     }
//! }
//! assert_eq!(decoded, Some(3));
//! ```
//!
//! The full tick-driven pipeline, including the hardware interfaces and
//! feedback hooks, lives in [`RfLink`]; software doubles for driving it are
//! provided by the `glint-sim` crate.

pub mod bit_sync;
pub mod codebook;
pub mod command;
pub mod config;
pub mod correlator;
pub mod frame_decoder;
pub mod hal;
pub mod link;
pub mod logging;
pub mod prefs;
pub mod signal_gate;

pub use bit_sync::{BitSynchronizer, SyncDetection};
pub use codebook::{Codebook, CodebookMatch};
pub use command::{CommandAuthorizer, CommandId, CommandOutcome};
pub use config::{ConfigError, LinkConfig};
pub use frame_decoder::{DecodeStrategy, FrameDecoder};
pub use hal::{FeedbackSink, PreferenceStore, RfFrontEnd};
pub use link::{LinkStats, RfLink};
pub use prefs::Preferences;
pub use signal_gate::SignalGate;
