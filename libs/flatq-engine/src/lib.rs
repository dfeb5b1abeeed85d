pub mod config;
pub mod encode;
pub mod error;
pub mod logging;

pub use config::{FileInfo, Flags, Format};
pub use encode::{encode_view, encoder_for};
pub use error::EngineError;
pub use logging::log_warn;
