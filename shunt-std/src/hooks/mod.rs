//! Standard route hooks.

pub mod convert;
pub mod logging;

pub use convert::{ConvertBodyHook, SetHeaderHook};
pub use logging::{LogLevel, LogSink, LoggingHook};
