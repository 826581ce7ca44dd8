//! # audio-delay-core
//!
//! Platform-agnostic core for recording from an input device and playing it
//! back after a fixed delay.
//!
//! Hosts (native audio via cpal, or the in-memory simulator) implement the
//! `MediaHost` trait and plug into the generic `DelaySession`.
//!
//! ## Architecture
//!
//! ```text
//! audio-delay-core (this crate)
//! ├── traits/       ← MediaHost, SessionDelegate
//! ├── models/       ← SessionError, SessionState, Capability, MediaDevice, DelaySetting, etc.
//! ├── processing/   ← DelayLine (fixed-delay stage for native hosts)
//! ├── session/      ← capability probe, DelaySession (state machine)
//! └── hosts/        ← SimulatedHost
//! ```

pub mod hosts;
pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use hosts::simulated::{HostCall, HostJournal, SimulatedHost};
pub use models::audio_models::{Capability, DeviceKind, MediaDevice};
pub use models::config::SessionConfiguration;
pub use models::delay::DelaySetting;
pub use models::error::SessionError;
pub use models::state::SessionState;
pub use models::stream::{ActiveStream, StreamHandle, StreamSummary};
pub use processing::delay_line::{downmix_into, downmix_to_mono, DelayLine};
pub use session::controller::DelaySession;
pub use session::probe::probe;
pub use traits::media_host::MediaHost;
pub use traits::session_delegate::SessionDelegate;
