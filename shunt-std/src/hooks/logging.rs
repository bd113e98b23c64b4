//! Logging hook for body observation.
//!
//! Logging a body renders it as text through the route's type converter,
//! exactly like evaluating a `${body}` expression in a log statement. That
//! conversion can trigger fallback discovery, so a logging route mutates the
//! same registry every other route converts with.

use shunt_core::{BoxError, Exchange, Hook, HookResult, TypeConverter, TypeTag};
use std::sync::{Arc, Mutex};

/// Severity of the emitted log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// `ERROR`
    Error,
    /// `WARN`
    Warn,
    /// `INFO`
    #[default]
    Info,
    /// `DEBUG`
    Debug,
    /// `TRACE`
    Trace,
}

/// Captured log lines, shared between clones.
#[derive(Clone, Default)]
pub struct LogSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// The most recent line.
    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    fn push(&self, line: String) {
        self.lock().push(line);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A poisoned sink still holds valid lines.
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A hook that logs the exchange body as text.
pub struct LoggingHook {
    converter: Arc<dyn TypeConverter>,
    level: LogLevel,
    prefix: String,
    sink: Option<LogSink>,
}

impl LoggingHook {
    /// Log bodies at `INFO`, converting them with `converter`.
    pub fn new(converter: Arc<dyn TypeConverter>) -> Self {
        Self {
            converter,
            level: LogLevel::default(),
            prefix: String::new(),
            sink: None,
        }
    }

    /// Emit events at `level`.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Text placed before the body, e.g. `"Logging body: "`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Also capture every line into `sink`.
    pub fn sink(mut self, sink: LogSink) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl Hook for LoggingHook {
    async fn on_exchange(&self, exchange: &mut Exchange) -> Result<HookResult, BoxError> {
        let body = exchange.body_as(&*self.converter, TypeTag::TEXT)?;
        let line = format!("{}{}", self.prefix, body);

        match self.level {
            LogLevel::Error => tracing::error!("{line}"),
            LogLevel::Warn => tracing::warn!("{line}"),
            LogLevel::Info => tracing::info!("{line}"),
            LogLevel::Debug => tracing::debug!("{line}"),
            LogLevel::Trace => tracing::trace!("{line}"),
        }
        if let Some(sink) = &self.sink {
            sink.push(line);
        }
        Ok(HookResult::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeConverterRegistry;
    use shunt_core::{DynHook, Value};

    #[tokio::test]
    async fn logs_rendered_body_and_caches_conversion() {
        let registry = Arc::new(TypeConverterRegistry::default());
        let sink = LogSink::new();
        let hook = LoggingHook::new(registry.clone())
            .prefix("Logging body: ")
            .level(LogLevel::Debug)
            .sink(sink.clone());

        let mut exchange = Exchange::new(Value::array_list([Value::Int(1), Value::Int(2)]));
        let result = hook.on_exchange_dyn(&mut exchange).await.unwrap();

        assert_eq!(result, HookResult::Next);
        assert_eq!(sink.last().as_deref(), Some("Logging body: [1, 2]"));
        assert_eq!(registry.dynamic_len(), 1);
        assert!(exchange.body().as_list().is_some());
    }
}
