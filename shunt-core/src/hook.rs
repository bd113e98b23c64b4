//! # Route steps (Hook)
//!
//! A hook is one processing step of a route. It receives the exchange,
//! may read or rewrite its body and headers, and decides whether the route
//! continues (`Next`) or ends here (`Stop`).
//!
//! # Use Cases
//!
//! - Logging the body (which converts it to text)
//! - Converting the body to another type
//! - Setting reply headers

use crate::{error::BoxError, exchange::Exchange};
use std::{future::Future, pin::Pin};

/// Result of hook execution indicating whether to continue or stop the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue with the next hook.
    Next,
    /// The exchange is complete; skip the remaining hooks.
    Stop,
}

/// A processing step of a route.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch.
/// Routes hold their steps as [`DynHook`] trait objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `on_exchange`."
)]
pub trait Hook: Send + Sync + 'static {
    /// Called when an exchange reaches this step.
    fn on_exchange(
        &self,
        exchange: &mut Exchange,
    ) -> impl Future<Output = Result<HookResult, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Hook`].
pub trait DynHook: Send + Sync + 'static {
    /// Called when an exchange reaches this step (dynamic dispatch version).
    fn on_exchange_dyn<'a>(
        &'a self,
        exchange: &'a mut Exchange,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>>;
}

// Blanket implementation: Any type implementing Hook implements DynHook automatically.
impl<T: Hook> DynHook for T {
    fn on_exchange_dyn<'a>(
        &'a self,
        exchange: &'a mut Exchange,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>> {
        Box::pin(self.on_exchange(exchange))
    }
}

/// A hook backed by a synchronous closure.
pub struct FnHook<F>(F);

impl<F> FnHook<F>
where
    F: Fn(&mut Exchange) -> Result<HookResult, BoxError> + Send + Sync + 'static,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Hook for FnHook<F>
where
    F: Fn(&mut Exchange) -> Result<HookResult, BoxError> + Send + Sync + 'static,
{
    async fn on_exchange(&self, exchange: &mut Exchange) -> Result<HookResult, BoxError> {
        (self.0)(exchange)
    }
}
