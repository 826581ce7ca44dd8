//! # audio-delay-cpal
//!
//! Native backend for audio-delay, built on cpal.
//!
//! Provides:
//! - `CpalHost` — `MediaHost` over the platform's default audio host
//! - `DeviceEnumerator` — input/output device listing with unique ids
//! - `CaptureGraph` — input stream → delay line → default output
//! - `capability` — host feature and microphone access checks
//!
//! ## Usage
//! ```ignore
//! use audio_delay_core::{DelaySession, SessionConfiguration};
//! use audio_delay_cpal::CpalHost;
//!
//! let mut session = DelaySession::new(CpalHost::default(), SessionConfiguration::default())?;
//! session.probe();
//! ```

pub mod capability;
pub mod cpal_host;
pub mod device_enumerator;
pub mod error;
pub mod graph;

pub use cpal_host::{CpalHost, CpalHostConfig};
pub use device_enumerator::DeviceEnumerator;
pub use error::BackendError;
pub use graph::CaptureGraph;
