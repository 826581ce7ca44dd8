pub mod media_host;
pub mod session_delegate;
