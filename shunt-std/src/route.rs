//! Named routes.
//!
//! A [`Route`] runs its hooks one after another on an exchange. [`Routes`]
//! binds routes to endpoint names and is what producers send to. Routes
//! share nothing with each other except the type converter their hooks were
//! given, which is usually one registry for the whole process.

use shunt_core::{DynHook, Exchange, Hook, HookResult, RouteError, Value};
use std::{collections::HashMap, sync::Arc};
use tracing::Instrument;

/// An ordered chain of hooks bound to an endpoint.
pub struct Route {
    endpoint: String,
    hooks: Vec<Arc<dyn DynHook>>,
}

impl Route {
    /// Start building a route for `endpoint`.
    pub fn builder(endpoint: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            endpoint: endpoint.into(),
            hooks: Vec::new(),
        }
    }

    /// The endpoint this route consumes from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether the route has no hooks.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the exchange through every hook until one returns `Stop`.
    pub async fn process(&self, mut exchange: Exchange) -> Result<Exchange, RouteError> {
        for (step, hook) in self.hooks.iter().enumerate() {
            let result = hook
                .on_exchange_dyn(&mut exchange)
                .await
                .map_err(|source| RouteError::Hook {
                    route: self.endpoint.clone(),
                    step,
                    source,
                })?;
            if result == HookResult::Stop {
                break;
            }
        }
        Ok(exchange)
    }
}

/// Builder for constructing a [`Route`].
pub struct RouteBuilder {
    endpoint: String,
    hooks: Vec<Arc<dyn DynHook>>,
}

impl RouteBuilder {
    /// Append a hook.
    pub fn hook<H: Hook>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Append an already shared hook.
    pub fn hook_arc(mut self, hook: Arc<dyn DynHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Build the route.
    pub fn build(self) -> Route {
        Route {
            endpoint: self.endpoint,
            hooks: self.hooks,
        }
    }
}

/// Routes keyed by endpoint.
pub struct Routes {
    routes: HashMap<String, Route>,
}

impl Routes {
    /// Start building a route table.
    pub fn builder() -> RoutesBuilder {
        RoutesBuilder::default()
    }

    /// The route bound to `endpoint`.
    pub fn get(&self, endpoint: &str) -> Option<&Route> {
        self.routes.get(endpoint)
    }

    /// Bound endpoints, in no particular order.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Send an exchange to `endpoint` and return it after processing.
    pub async fn send(&self, endpoint: &str, exchange: Exchange) -> Result<Exchange, RouteError> {
        let route = self
            .get(endpoint)
            .ok_or_else(|| RouteError::NotFound(endpoint.to_owned()))?;
        let span = tracing::debug_span!("route", endpoint = %endpoint);
        route.process(exchange).instrument(span).await
    }

    /// Send a bare body to `endpoint`.
    pub async fn send_body(
        &self,
        endpoint: &str,
        body: impl Into<Value>,
    ) -> Result<Exchange, RouteError> {
        self.send(endpoint, Exchange::new(body)).await
    }
}

/// Builder for [`Routes`].
#[derive(Default)]
pub struct RoutesBuilder {
    routes: HashMap<String, Route>,
}

impl RoutesBuilder {
    /// Add a route. Fails if its endpoint is already bound.
    pub fn add(&mut self, route: Route) -> Result<(), RouteError> {
        if self.routes.contains_key(route.endpoint()) {
            return Err(RouteError::DuplicateRoute(route.endpoint));
        }
        self.routes.insert(route.endpoint.clone(), route);
        Ok(())
    }

    /// Build the route table.
    pub fn build(self) -> Routes {
        Routes {
            routes: self.routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::SetHeaderHook;
    use shunt_core::FnHook;

    #[tokio::test]
    async fn stop_skips_remaining_hooks() {
        let route = Route::builder("direct:test")
            .hook(SetHeaderHook::new("first", true))
            .hook(FnHook::new(|_: &mut Exchange| Ok(HookResult::Stop)))
            .hook(SetHeaderHook::new("second", true))
            .build();
        assert_eq!(route.len(), 3);

        let exchange = route.process(Exchange::default()).await.unwrap();
        assert!(exchange.header("first").is_some());
        assert!(exchange.header("second").is_none());
    }

    #[tokio::test]
    async fn failing_hook_reports_step() {
        let route = Route::builder("direct:fail")
            .hook(SetHeaderHook::new("ok", true))
            .hook(FnHook::new(|_: &mut Exchange| Err("boom".into())))
            .build();
        let err = route.process(Exchange::default()).await.unwrap_err();
        match err {
            RouteError::Hook { route, step, source } => {
                assert_eq!(route, "direct:fail");
                assert_eq!(step, 1);
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_endpoint_is_not_found() {
        let routes = Routes::builder().build();
        let err = routes.send_body("direct:missing", "x").await.unwrap_err();
        assert!(matches!(err, RouteError::NotFound(endpoint) if endpoint == "direct:missing"));
    }

    #[test]
    fn duplicate_endpoints_are_rejected() {
        let mut builder = Routes::builder();
        builder.add(Route::builder("direct:a").build()).unwrap();
        let err = builder.add(Route::builder("direct:a").build()).unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute(endpoint) if endpoint == "direct:a"));
        let routes = builder.build();
        assert_eq!(routes.endpoints().collect::<Vec<_>>(), vec!["direct:a"]);
    }
}
