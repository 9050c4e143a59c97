//! Decode a short command session over a mildly noisy simulated channel.
//!
//! Run with:
//!
//! ```text
//! cargo run -p glint-sim --example decode_demo
//! ```

use glint_link::logging::{init_logging, LogConfig, LogLevel};
use glint_link::{CommandId, LinkConfig, Preferences, RfLink};
use glint_sim::channel::{ChannelConfig, NoisyChannel};
use glint_sim::encoder::command_frame;
use glint_sim::front_end::{MemoryPrefsStore, RecordingFeedback, SimFrontEnd};
use glint_sim::scenario::TickScheduler;

fn main() {
    init_logging(&LogConfig {
        level: LogLevel::Debug,
        ..Default::default()
    });

    let config = LinkConfig::default();
    let mut fe = SimFrontEnd::new(200).with_channel(NoisyChannel::new(ChannelConfig {
        flip_probability: 0.005,
        strength_sigma: 2.0,
        seed: 2024,
    }));

    // A plausible session: power profile, star on, then an authorized
    // supercap shutdown.
    let session = [
        CommandId::PwrHigh,
        CommandId::TreeStarOn,
        CommandId::Unlock,
        CommandId::SupercapChargeOff,
    ];
    for cmd in session {
        fe.queue_bits(&command_frame(&config, cmd.raw()).unwrap());
    }

    let mut link = RfLink::new(
        config,
        Preferences::default(),
        fe,
        MemoryPrefsStore::new(),
        RecordingFeedback::new(),
    )
    .expect("valid default configuration");

    let outcomes = TickScheduler::new(16).run(&mut link, session.len() as u64 * 64 + 16);

    for outcome in &outcomes {
        tracing::info!(?outcome, "frame resolved");
    }
    tracing::info!(
        acks = link.feedback().acks(),
        rejects = link.feedback().rejects(),
        commits = link.store().commits().len(),
        prefs = ?link.prefs(),
        "session complete"
    );
}
