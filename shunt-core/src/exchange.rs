//! The message travelling through a route.

use crate::{converter::TypeConverter, error::ConvertError, types::TypeTag, value::Value};
use std::collections::BTreeMap;

/// Header carrying the response code of a request/reply exchange.
pub const RESPONSE_CODE: &str = "ResponseCode";

/// A body plus named headers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Exchange {
    body: Value,
    headers: BTreeMap<String, Value>,
}

impl Exchange {
    /// Create an exchange carrying `body`.
    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            body: body.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Builder-style header insertion.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_header(name, value);
        self
    }

    /// The body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: impl Into<Value>) {
        self.body = body.into();
    }

    /// Consume the exchange, keeping the body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// The body converted to `target`.
    ///
    /// Conversion goes through `converter` and may therefore populate its
    /// fallback cache.
    pub fn body_as(
        &self,
        converter: &dyn TypeConverter,
        target: TypeTag,
    ) -> Result<Value, ConvertError> {
        converter.convert(target, &self.body)
    }

    /// A header value.
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.headers.insert(name.into(), value.into());
    }

    /// All headers in name order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_replaced() {
        let mut exchange = Exchange::new("hello").with_header(RESPONSE_CODE, 500_i64);
        exchange.set_header(RESPONSE_CODE, 200_i64);
        assert_eq!(exchange.header(RESPONSE_CODE), Some(&Value::Int(200)));
        assert_eq!(exchange.headers().count(), 1);
        assert_eq!(exchange.into_body(), Value::text("hello"));
    }

    #[test]
    fn default_exchange_has_null_body() {
        assert!(Exchange::default().body().is_null());
    }
}
