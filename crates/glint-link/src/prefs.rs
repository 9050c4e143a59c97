//! Device Preferences
//!
//! The preference set mutated by decoded commands and persisted through the
//! external store. Commands always build a complete candidate set and commit
//! it whole; no partial state is ever visible outside a single commit.

use serde::{Deserialize, Serialize};

/// Persistent device preference set.
///
/// `blink_time_limit` is a tick mask: the animation scheduler requires it to
/// be one less than a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Per-blink time budget, in scheduler mask units.
    pub blink_time_limit: u8,
    /// Supercap charging permitted.
    pub supercap_charge_en: bool,
    /// Tree star output enabled.
    pub tree_star_en: bool,
    /// Harvest-rail charging permitted.
    pub harvest_rail_charge_en: bool,
    /// Blinking allowed while running from harvested power.
    pub harvest_blink_en: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            blink_time_limit: 3,
            supercap_charge_en: true,
            tree_star_en: false,
            harvest_rail_charge_en: true,
            harvest_blink_en: true,
        }
    }
}
