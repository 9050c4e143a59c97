//! # Glint Sim — software environment for the RF command link
//!
//! Pure-software simulation of the analog front end and device environment
//! consumed by `glint-link`, for testing and development without hardware:
//!
//! - [`front_end`]: scripted front end, recording preference store, and
//!   counting feedback sink — the test doubles for the link's hardware
//!   traits.
//! - [`channel`]: seeded noisy-channel model (slicer decision flips,
//!   strength jitter).
//! - [`encoder`]: transmit-side frame builder (preamble + oversampled
//!   payload).
//! - [`scenario`]: tick scheduler reproducing the firmware cadence.
//!
//! ## Example
//!
//! ```rust
//! use glint_link::{CommandId, CommandOutcome, LinkConfig, Preferences, RfLink};
//! use glint_sim::encoder::command_frame;
//! use glint_sim::front_end::{MemoryPrefsStore, RecordingFeedback, SimFrontEnd};
//! use glint_sim::scenario::TickScheduler;
//!
//! let config = LinkConfig::default();
//! let mut fe = SimFrontEnd::new(200);
//! fe.queue_bits(&command_frame(&config, CommandId::TreeStarOn.raw()).unwrap());
//!
//! let mut link = RfLink::new(
//!     config,
//!     Preferences::default(),
//!     fe,
//!     MemoryPrefsStore::new(),
//!     RecordingFeedback::new(),
//! )
//! .unwrap();
//!
//! let outcomes = TickScheduler::new(16).run(&mut link, 64);
//! assert_eq!(outcomes, vec![CommandOutcome::Applied(CommandId::TreeStarOn)]);
//! assert!(link.store().latest().unwrap().tree_star_en);
//! ```

pub mod channel;
pub mod encoder;
pub mod front_end;
pub mod scenario;

pub use channel::{ChannelConfig, NoisyChannel};
pub use front_end::{MemoryPrefsStore, RecordingFeedback, SimFrontEnd};
pub use scenario::{ScenarioConfig, TickScheduler};
