//! Transmit-Side Frame Builder
//!
//! Produces the raw sample stream a transmitter would put on the air for
//! one command frame: the 16-sample preamble followed by the payload word
//! with every logical bit held for one oversampling period. Samples are
//! ordered oldest-first, ready to feed the receiver tick by tick.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::{BitSynchronizer, FrameDecoder, LinkConfig};
//! use glint_sim::encoder::command_frame;
//!
//! let config = LinkConfig::default();
//! let samples = command_frame(&config, 4).unwrap();
//! assert_eq!(samples.len() as u32, 16 + config.payload_span());
//!
//! // The receiver round-trips it.
//! let mut sync = BitSynchronizer::new(&config);
//! let decoder = FrameDecoder::new(&config);
//! let mut decoded = None;
//! for bit in samples {
//!     if let Some(detection) = sync.push(bit) {
//!         decoded = decoder.decode(detection.window);
//!     }
//! }
//! assert_eq!(decoded, Some(4));
//! ```

use glint_link::codebook::Codebook;
use glint_link::config::LinkConfig;
use glint_link::frame_decoder::{encode_hamming, DecodeStrategy};

/// Lay out one frame for an arbitrary payload word, oldest sample first.
pub fn frame_samples(config: &LinkConfig, word: u16) -> Vec<bool> {
    let mut samples = Vec::with_capacity(16 + config.payload_span() as usize);
    for i in (0..16).rev() {
        samples.push((config.sync_pattern >> i) & 1 == 1);
    }
    for j in (0..config.payload_bits()).rev() {
        let bit = (word >> j) & 1 == 1;
        for _ in 0..config.oversampling {
            samples.push(bit);
        }
    }
    samples
}

/// Lay out one frame carrying the given raw command identifier under the
/// configured strategy. `None` for identifiers the strategy cannot carry
/// (reserved codebook slots, or identifiers above the nibble range).
pub fn command_frame(config: &LinkConfig, raw_id: u8) -> Option<Vec<bool>> {
    match config.strategy {
        DecodeStrategy::CodebookCorrelation => Codebook::default()
            .get(raw_id)
            .map(|word| frame_samples(config, word)),
        DecodeStrategy::HammingSyndrome => {
            (raw_id < 16).then(|| frame_samples(config, u16::from(encode_hamming(raw_id))))
        }
    }
}

/// Invert every sample of one logical payload bit slot in a frame laid out
/// by [`frame_samples`]. `logical_bit` 0 is the last-transmitted (least
/// significant) bit.
pub fn flip_payload_bit(config: &LinkConfig, samples: &mut [bool], logical_bit: u32) {
    let ratio = config.oversampling as usize;
    let slot_from_end = (logical_bit as usize + 1) * ratio;
    let start = samples.len() - slot_from_end;
    for sample in &mut samples[start..start + ratio] {
        *sample = !*sample;
    }
}
