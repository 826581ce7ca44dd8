pub mod audio_models;
pub mod config;
pub mod delay;
pub mod error;
pub mod state;
pub mod stream;
