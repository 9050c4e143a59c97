//! Noisy Channel Model
//!
//! Impairments for the simulated one-bit link: independent per-sample slicer
//! decision flips and Gaussian jitter on the coarse strength readings. Both
//! are driven by a seeded generator so every scenario is reproducible.
//!
//! ## Example
//!
//! ```rust
//! use glint_sim::channel::{ChannelConfig, NoisyChannel};
//!
//! let mut channel = NoisyChannel::new(ChannelConfig {
//!     flip_probability: 0.0,
//!     strength_sigma: 0.0,
//!     seed: 7,
//! });
//!
//! // A clean channel passes everything through.
//! assert!(channel.corrupt_bit(true));
//! assert_eq!(channel.corrupt_strength(120), 120);
//! assert_eq!(channel.flips(), 0);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Channel impairment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Probability of each slicer decision being inverted.
    pub flip_probability: f64,
    /// Standard deviation of the jitter added to strength readings.
    pub strength_sigma: f64,
    /// Generator seed for reproducibility.
    pub seed: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            flip_probability: 0.0,
            strength_sigma: 0.0,
            seed: 42,
        }
    }
}

/// Seeded impairment generator over the one-bit channel.
#[derive(Debug, Clone)]
pub struct NoisyChannel {
    config: ChannelConfig,
    rng: StdRng,
    jitter: Option<Normal<f64>>,
    flips: u64,
}

impl NoisyChannel {
    /// Create a channel from its configuration.
    pub fn new(config: ChannelConfig) -> Self {
        let jitter = if config.strength_sigma > 0.0 {
            Some(Normal::new(0.0, config.strength_sigma).expect("finite sigma"))
        } else {
            None
        };
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            jitter,
            flips: 0,
            config,
        }
    }

    /// Pass one slicer decision through the channel, possibly inverted.
    pub fn corrupt_bit(&mut self, bit: bool) -> bool {
        if self.config.flip_probability > 0.0 && self.rng.gen_bool(self.config.flip_probability) {
            self.flips += 1;
            !bit
        } else {
            bit
        }
    }

    /// Pass one strength reading through the channel with Gaussian jitter,
    /// saturating at the 8-bit range.
    pub fn corrupt_strength(&mut self, level: u8) -> u8 {
        match &self.jitter {
            Some(normal) => {
                let jittered = f64::from(level) + normal.sample(&mut self.rng);
                jittered.round().clamp(0.0, 255.0) as u8
            }
            None => level,
        }
    }

    /// Number of bits inverted so far.
    pub fn flips(&self) -> u64 {
        self.flips
    }
}
