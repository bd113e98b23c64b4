//! Body and header rewriting hooks.

use shunt_core::{BoxError, Exchange, Hook, HookResult, TypeConverter, TypeTag, Value};
use std::sync::Arc;

/// Replaces the body with its conversion to a target type.
pub struct ConvertBodyHook {
    converter: Arc<dyn TypeConverter>,
    target: TypeTag,
}

impl ConvertBodyHook {
    /// Convert bodies to `target` with `converter`.
    pub fn new(converter: Arc<dyn TypeConverter>, target: TypeTag) -> Self {
        Self { converter, target }
    }
}

impl Hook for ConvertBodyHook {
    async fn on_exchange(&self, exchange: &mut Exchange) -> Result<HookResult, BoxError> {
        let converted = exchange.body_as(&*self.converter, self.target)?;
        exchange.set_body(converted);
        Ok(HookResult::Next)
    }
}

/// Sets a fixed header.
pub struct SetHeaderHook {
    name: String,
    value: Value,
}

impl SetHeaderHook {
    /// Set header `name` to `value` on every exchange.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Hook for SetHeaderHook {
    async fn on_exchange(&self, exchange: &mut Exchange) -> Result<HookResult, BoxError> {
        exchange.set_header(self.name.clone(), self.value.clone());
        Ok(HookResult::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeConverterRegistry;
    use shunt_core::{ConvertError, DynHook, RESPONSE_CODE};

    #[tokio::test]
    async fn converts_body_in_place() {
        let hook = ConvertBodyHook::new(Arc::new(TypeConverterRegistry::default()), TypeTag::INT);
        let mut exchange = Exchange::new("12");
        hook.on_exchange_dyn(&mut exchange).await.unwrap();
        assert_eq!(exchange.body(), &Value::Int(12));
    }

    #[tokio::test]
    async fn conversion_failure_is_returned() {
        let hook = ConvertBodyHook::new(Arc::new(TypeConverterRegistry::default()), TypeTag::BOOL);
        let mut exchange = Exchange::new(Value::Null);
        let err = hook.on_exchange_dyn(&mut exchange).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::NullNotAllowed { .. })
        ));
        assert!(exchange.body().is_null());
    }

    #[tokio::test]
    async fn sets_header() {
        let hook = SetHeaderHook::new(RESPONSE_CODE, 200_i64);
        let mut exchange = Exchange::default();
        hook.on_exchange_dyn(&mut exchange).await.unwrap();
        assert_eq!(exchange.header(RESPONSE_CODE), Some(&Value::Int(200)));
    }
}
