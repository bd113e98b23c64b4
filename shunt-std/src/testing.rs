//! Testing utilities for Shunt.
//!
//! This module provides utilities to make testing registries and routes easier.
//!
//! # Features
//!
//! - [`RecordingHook`]: A hook that records every body it sees
//! - [`CountingConverter`]: A converter wrapper that counts invocations
//! - [`LogSink`]: Captured output of a [`LoggingHook`](crate::hooks::LoggingHook)
//! - [`echo_request`]: The container body an HTTP echo endpoint receives

pub use crate::hooks::LogSink;

use shunt_core::{
    BoxError, ConversionError, Converter, ConverterRef, Exchange, Hook, HookResult, Value,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records the body of every exchange it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::new();
/// let route = Route::builder("direct:in").hook(recorder.clone()).build();
///
/// route.process(Exchange::new("hello")).await?;
/// assert_eq!(recorder.bodies(), vec![Value::text("hello")]);
/// ```
pub struct RecordingHook {
    bodies: Arc<Mutex<Vec<Value>>>,
    result: HookResult,
}

impl RecordingHook {
    /// Create a new recording hook that returns `Next`.
    pub fn new() -> Self {
        Self::with_result(HookResult::Next)
    }

    /// Create a recording hook that returns a specific result.
    pub fn with_result(result: HookResult) -> Self {
        Self {
            bodies: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Get a clone of the recorded bodies.
    pub fn bodies(&self) -> Vec<Value> {
        self.lock().clone()
    }

    /// Get the number of recorded exchanges.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Value>> {
        // Bodies recorded before a panic are still valid.
        self.bodies.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHook {
    fn clone(&self) -> Self {
        Self {
            bodies: self.bodies.clone(),
            result: self.result,
        }
    }
}

impl Hook for RecordingHook {
    async fn on_exchange(&self, exchange: &mut Exchange) -> Result<HookResult, BoxError> {
        self.lock().push(exchange.body().clone());
        Ok(self.result)
    }
}

// ============================================================================
// Counting Converter
// ============================================================================

/// Wraps a converter and counts how often it runs.
///
/// Clones share the counter, so keep one clone and register the other.
#[derive(Clone)]
pub struct CountingConverter {
    inner: ConverterRef,
    calls: Arc<AtomicUsize>,
}

impl CountingConverter {
    /// Count calls to `inner`.
    pub fn new(inner: ConverterRef) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of conversions performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Converter for CountingConverter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.convert(value)
    }
}

// ============================================================================
// Echo Request
// ============================================================================

/// The exchange an HTTP echo endpoint hands to its route for `?say=<say>`.
///
/// Request parameters arrive wrapped in a framework container, one element
/// per parameter; a missing parameter is a null element.
pub fn echo_request(say: Option<&str>) -> Exchange {
    Exchange::new(Value::contents_list([Value::from(say)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;
    use shunt_core::{DynHook, TypeTag};

    #[tokio::test]
    async fn recording_hook_shares_state_between_clones() {
        let recorder = RecordingHook::with_result(HookResult::Stop);
        let hook = recorder.clone();
        let result = hook
            .on_exchange_dyn(&mut Exchange::new("hello"))
            .await
            .unwrap();
        assert_eq!(result, HookResult::Stop);
        assert_eq!(recorder.bodies(), vec![Value::text("hello")]);
        assert_eq!(recorder.count(), 1);
    }

    #[tokio::test]
    async fn recording_hook_survives_poisoned_lock() {
        let recorder = RecordingHook::new();
        let bodies = Arc::clone(&recorder.bodies);
        let _ = std::thread::spawn(move || {
            let _guard = bodies.lock().unwrap();
            panic!("poisoning recorder");
        })
        .join();

        recorder
            .on_exchange_dyn(&mut Exchange::new("after"))
            .await
            .unwrap();
        assert_eq!(recorder.bodies(), vec![Value::text("after")]);
    }

    #[test]
    fn counting_converter_counts() {
        let counter = CountingConverter::new(builtins::int_to_text());
        let registered = ConverterRef::new(counter.clone());
        registered.convert(&Value::Int(1)).unwrap();
        registered.convert(&Value::Int(2)).unwrap();
        assert_eq!(counter.calls(), 2);
        assert_eq!(registered.name(), "int-to-text");
    }

    #[test]
    fn echo_request_wraps_parameter() {
        let exchange = echo_request(Some("hello"));
        assert_eq!(exchange.body().type_tag(), TypeTag::CONTENTS_LIST);
        assert_eq!(exchange.body().to_string(), "[hello]");
        assert_eq!(echo_request(None).body().to_string(), "[null]");
    }
}
