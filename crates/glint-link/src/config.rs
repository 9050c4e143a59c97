//! Link Configuration
//!
//! Tuning constants for the RF command link. Historical firmware revisions
//! shipped with different oversampling ratios, codeword widths, and
//! acceptance thresholds; those are configuration here, not structure. Two
//! presets capture the shipped combinations: codebook correlation over
//! 16-bit words at 3 samples per bit (default), and the legacy Hamming(8,4)
//! frame at 6 samples per bit.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::config::LinkConfig;
//! use glint_link::frame_decoder::DecodeStrategy;
//!
//! let config = LinkConfig::default();
//! assert_eq!(config.strategy, DecodeStrategy::CodebookCorrelation);
//! assert_eq!(config.payload_span(), 48);
//! assert!(config.validate().is_ok());
//!
//! let legacy = LinkConfig::hamming_syndrome();
//! assert_eq!(legacy.oversampling, 6);
//! assert_eq!(legacy.payload_span(), 48);
//! ```

use serde::{Deserialize, Serialize};

use crate::frame_decoder::DecodeStrategy;

/// Start-of-frame pattern in oversampled (raw sample) form. Chosen for low
/// self-correlation under a one-sample timing shift, so it marks the frame
/// boundary unambiguously.
pub const SYNC_PATTERN: u16 = 0b1111_1110_0000_0111;

/// Number of raw samples in the sync pattern.
pub const SYNC_SPAN: u32 = 16;

/// Widest payload span the sample history can hold alongside the preamble
/// window.
pub const MAX_PAYLOAD_SPAN: u32 = 48;

/// Configuration error for an inconsistent parameter set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("oversampling ratio must be at least 1")]
    ZeroOversampling,

    #[error("sample offset {offset} outside bit slot of {oversampling} samples")]
    OffsetOutsideSlot { offset: u32, oversampling: u32 },

    #[error("payload span of {span} raw samples exceeds the {max}-sample history")]
    PayloadTooWide { span: u32, max: u32 },

    #[error("sync threshold {threshold} exceeds the {span}-sample sync span")]
    SyncThresholdOutOfRange { threshold: u8, span: u32 },

    #[error("codeword threshold {threshold} exceeds the {bits}-bit codeword width")]
    CodewordThresholdOutOfRange { threshold: u8, bits: u32 },
}

/// Tuning constants for one link instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Active decode strategy. Implies the logical payload width.
    pub strategy: DecodeStrategy,
    /// Raw samples per logical payload bit.
    pub oversampling: u32,
    /// Offset within each bit slot at which the payload is read.
    pub sample_offset: u32,
    /// Oversampled start-of-frame pattern.
    pub sync_pattern: u16,
    /// Minimum matching-bit score (of 16) for a frame boundary.
    pub sync_threshold: u8,
    /// Minimum matching-bit score (of 16) for a codeword to be accepted.
    /// Unused by the syndrome strategy, which corrects rather than scores.
    pub codeword_accept_threshold: u8,
    /// Minimum channel-strength peak for sampling to run at all.
    pub min_signal_level: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::codebook_correlation()
    }
}

impl LinkConfig {
    /// Preset for the codebook-correlation decode: 16-bit codewords at
    /// 3 samples per bit, read at slot center.
    pub fn codebook_correlation() -> Self {
        Self {
            strategy: DecodeStrategy::CodebookCorrelation,
            oversampling: 3,
            sample_offset: 1,
            sync_pattern: SYNC_PATTERN,
            sync_threshold: 15,            // one flipped sync sample tolerated
            codeword_accept_threshold: 15, // one flipped payload bit tolerated
            min_signal_level: 64,
        }
    }

    /// Preset for the legacy Hamming(8,4) decode: 8-bit frame at 6 samples
    /// per bit, read at slot center.
    pub fn hamming_syndrome() -> Self {
        Self {
            strategy: DecodeStrategy::HammingSyndrome,
            oversampling: 6,
            sample_offset: 3,
            sync_pattern: SYNC_PATTERN,
            sync_threshold: 15,
            codeword_accept_threshold: 15,
            min_signal_level: 64,
        }
    }

    /// Logical payload width implied by the strategy.
    pub fn payload_bits(&self) -> u32 {
        self.strategy.payload_bits()
    }

    /// Raw samples occupied by the payload.
    pub fn payload_span(&self) -> u32 {
        self.payload_bits() * self.oversampling
    }

    /// Check the parameter set for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oversampling == 0 {
            return Err(ConfigError::ZeroOversampling);
        }
        if self.sample_offset >= self.oversampling {
            return Err(ConfigError::OffsetOutsideSlot {
                offset: self.sample_offset,
                oversampling: self.oversampling,
            });
        }
        let span = self.payload_span();
        if span > MAX_PAYLOAD_SPAN {
            return Err(ConfigError::PayloadTooWide {
                span,
                max: MAX_PAYLOAD_SPAN,
            });
        }
        if u32::from(self.sync_threshold) > SYNC_SPAN {
            return Err(ConfigError::SyncThresholdOutOfRange {
                threshold: self.sync_threshold,
                span: SYNC_SPAN,
            });
        }
        let bits = self.payload_bits();
        if self.strategy == DecodeStrategy::CodebookCorrelation
            && u32::from(self.codeword_accept_threshold) > bits
        {
            return Err(ConfigError::CodewordThresholdOutOfRange {
                threshold: self.codeword_accept_threshold,
                bits,
            });
        }
        Ok(())
    }
}
