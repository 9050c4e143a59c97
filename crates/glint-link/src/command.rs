//! Command Set and Authorization
//!
//! Maps decoded raw identifiers to device commands and applies them against
//! a cached copy of the preference set, committing changes whole through the
//! external store.
//!
//! Privileged commands are gated by a one-shot unlock: the unlock command
//! arms a flag that survives exactly one subsequent decode attempt — any
//! attempt, including one that fails to decode — and every resolution other
//! than the unlock itself clears it. The unlock command always reports as
//! rejected so that a listener cannot tell a successful unlock from a failed
//! command.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::command::{CommandAuthorizer, CommandId, CommandOutcome};
//! use glint_link::hal::PreferenceStore;
//! use glint_link::prefs::Preferences;
//!
//! struct NullStore;
//! impl PreferenceStore for NullStore {
//!     fn commit(&mut self, _prefs: &Preferences) {}
//! }
//!
//! let mut auth = CommandAuthorizer::new(Preferences::default());
//! let mut store = NullStore;
//!
//! // Privileged command without an unlock: rejected.
//! let outcome = auth.resolve(CommandId::SupercapChargeOff.raw(), &mut store);
//! assert_eq!(
//!     outcome,
//!     CommandOutcome::RejectedUnauthorized(CommandId::SupercapChargeOff)
//! );
//!
//! // Unlock, then the same command: applied.
//! auth.resolve(CommandId::Unlock.raw(), &mut store);
//! let outcome = auth.resolve(CommandId::SupercapChargeOff.raw(), &mut store);
//! assert_eq!(outcome, CommandOutcome::Applied(CommandId::SupercapChargeOff));
//! ```

use crate::hal::PreferenceStore;
use crate::prefs::Preferences;

/// Device command identifiers.
///
/// Raw values 0 and 15 are reserved to guard against all-zeros and all-ones
/// packets; 11–14 are unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandId {
    /// Minimal power: shortest blinks, no harvest blinking or charging.
    PwrUltraLow = 1,
    /// Normal power profile.
    PwrNorm = 2,
    /// High power profile.
    PwrHigh = 3,
    /// Maximum power profile.
    PwrUltraHigh = 4,
    /// Disable supercap charging (privileged).
    SupercapChargeOff = 5,
    /// Enable supercap charging (privileged).
    SupercapChargeOn = 6,
    /// Disable the tree star.
    TreeStarOff = 7,
    /// Enable the tree star.
    TreeStarOn = 8,
    /// Arm privileged commands for the next frame only.
    Unlock = 9,
    /// Request a self-test run; surfaced to the caller, no preference change.
    SelfTest = 10,
}

impl CommandId {
    /// Map a raw identifier to a command, or `None` for reserved values.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::PwrUltraLow),
            2 => Some(Self::PwrNorm),
            3 => Some(Self::PwrHigh),
            4 => Some(Self::PwrUltraHigh),
            5 => Some(Self::SupercapChargeOff),
            6 => Some(Self::SupercapChargeOn),
            7 => Some(Self::TreeStarOff),
            8 => Some(Self::TreeStarOn),
            9 => Some(Self::Unlock),
            10 => Some(Self::SelfTest),
            _ => None,
        }
    }

    /// The raw identifier of this command.
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Whether the command requires a preceding unlock.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::SupercapChargeOff | Self::SupercapChargeOn)
    }
}

/// Result of resolving one synchronized frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was applied (and any preference change committed).
    Applied(CommandId),
    /// The command decoded but was not permitted. Also reported for the
    /// unlock command itself, deliberately.
    RejectedUnauthorized(CommandId),
    /// No command could be resolved from the frame.
    NoMatch,
}

/// One-shot authorization gate and command applier.
#[derive(Debug, Clone)]
pub struct CommandAuthorizer {
    /// Armed for exactly one subsequent decode attempt.
    unlocked: bool,
    /// Cached copy of the committed preference set.
    prefs: Preferences,
}

impl CommandAuthorizer {
    /// Create an authorizer in the locked state over the given preferences.
    pub fn new(initial: Preferences) -> Self {
        Self {
            unlocked: false,
            prefs: initial,
        }
    }

    /// Current cached preference set.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Whether privileged commands are currently armed.
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Record a synchronized frame that failed to decode. Consumes the
    /// one-shot unlock like any other attempt.
    pub fn note_undecodable(&mut self) {
        self.unlocked = false;
    }

    /// Resolve a decoded raw identifier: apply, reject, or ignore it, and
    /// commit any preference change whole through `store`.
    pub fn resolve<S: PreferenceStore>(&mut self, raw: u8, store: &mut S) -> CommandOutcome {
        let Some(cmd) = CommandId::from_raw(raw) else {
            self.unlocked = false;
            return CommandOutcome::NoMatch;
        };

        let armed = self.unlocked;
        let mut next = self.prefs;

        let outcome = match cmd {
            CommandId::PwrUltraLow => {
                next.blink_time_limit = 1;
                next.harvest_blink_en = false;
                next.harvest_rail_charge_en = false;
                CommandOutcome::Applied(cmd)
            }
            CommandId::PwrNorm => {
                next.blink_time_limit = 3;
                next.harvest_blink_en = true;
                next.harvest_rail_charge_en = true;
                CommandOutcome::Applied(cmd)
            }
            CommandId::PwrHigh => {
                next.blink_time_limit = 7;
                next.harvest_blink_en = true;
                next.harvest_rail_charge_en = true;
                CommandOutcome::Applied(cmd)
            }
            CommandId::PwrUltraHigh => {
                next.blink_time_limit = 15;
                next.harvest_blink_en = true;
                next.harvest_rail_charge_en = true;
                CommandOutcome::Applied(cmd)
            }
            CommandId::SupercapChargeOff if armed => {
                next.supercap_charge_en = false;
                CommandOutcome::Applied(cmd)
            }
            CommandId::SupercapChargeOn if armed => {
                next.supercap_charge_en = true;
                CommandOutcome::Applied(cmd)
            }
            CommandId::SupercapChargeOff | CommandId::SupercapChargeOn => {
                CommandOutcome::RejectedUnauthorized(cmd)
            }
            CommandId::TreeStarOff => {
                next.tree_star_en = false;
                CommandOutcome::Applied(cmd)
            }
            CommandId::TreeStarOn => {
                next.tree_star_en = true;
                CommandOutcome::Applied(cmd)
            }
            CommandId::Unlock => {
                // Arm and report failure, without the usual disarm below:
                // the unlock grants exactly the next frame.
                self.unlocked = true;
                tracing::debug!("privileged commands armed for one frame");
                return CommandOutcome::RejectedUnauthorized(cmd);
            }
            CommandId::SelfTest => CommandOutcome::Applied(cmd),
        };

        self.unlocked = false;

        if matches!(outcome, CommandOutcome::Applied(_)) && next != self.prefs {
            self.prefs = next;
            store.commit(&next);
        }

        outcome
    }
}
