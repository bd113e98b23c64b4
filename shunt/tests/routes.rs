use shunt::{
    RESPONSE_CODE, RegistryConfig, TypeConverterRegistry, TypeTag, Value,
    hooks::LogSink,
    testing::echo_request,
};
use std::sync::Arc;

mod common;
use common::{ECHO, LOGGING, echo_routes, fruit_basket, init_tracing};

async fn echo(config: RegistryConfig, say: Option<&str>, log_first: bool) -> (Value, Option<Value>) {
    let registry = Arc::new(TypeConverterRegistry::with_config(config));
    let sink = LogSink::new();
    let routes = echo_routes(&registry, &sink);

    if log_first {
        routes.send_body(LOGGING, fruit_basket()).await.unwrap();
        assert_eq!(
            sink.last().as_deref(),
            Some("Logging body: [Fruit[name=apples], Fruit[name=bananas], Fruit[name=cherries]]")
        );
    }

    let response = routes.send(ECHO, echo_request(say)).await.unwrap();
    let code = response.header(RESPONSE_CODE).cloned();
    let body = response.body_as(&*registry, TypeTag::TEXT).unwrap();
    (body, code)
}

#[tokio::test]
async fn test_echo_without_logging_route() {
    init_tracing();
    for config in [RegistryConfig::legacy(), RegistryConfig::corrected()] {
        let (body, code) = echo(config, Some("hello"), false).await;
        assert_eq!(code, Some(Value::Int(200)));
        assert_eq!(body, Value::text("hello"));
    }
}

#[tokio::test]
async fn test_echo_after_logging_route_legacy() {
    init_tracing();
    let (body, code) = echo(RegistryConfig::legacy(), Some("hello"), true).await;
    assert_eq!(code, Some(Value::Int(200)));
    // The list converter cached by the logging route now serves the container.
    assert_eq!(body, Value::text("[hello]"));
}

#[tokio::test]
async fn test_echo_after_logging_route_corrected() {
    init_tracing();
    let (body, code) = echo(RegistryConfig::corrected(), Some("hello"), true).await;
    assert_eq!(code, Some(Value::Int(200)));
    assert_eq!(body, Value::text("hello"));
}

#[tokio::test]
async fn test_echo_without_parameters() {
    for config in [RegistryConfig::legacy(), RegistryConfig::corrected()] {
        let (body, code) = echo(config, None, false).await;
        assert_eq!(code, Some(Value::Int(200)));
        assert_eq!(body, Value::text("null"));
    }
}

#[tokio::test]
async fn test_separate_registries_do_not_interfere() {
    let polluted = Arc::new(TypeConverterRegistry::with_config(RegistryConfig::legacy()));
    let clean = Arc::new(TypeConverterRegistry::with_config(RegistryConfig::legacy()));
    let sink = LogSink::new();

    echo_routes(&polluted, &sink)
        .send_body(LOGGING, fruit_basket())
        .await
        .unwrap();

    let response = echo_routes(&clean, &sink)
        .send(ECHO, echo_request(Some("hello")))
        .await
        .unwrap();
    assert_eq!(response.body(), &Value::text("hello"));
    assert_eq!(clean.dynamic_len(), 0);
    assert_eq!(polluted.dynamic_len(), 1);
}

#[tokio::test]
async fn test_logging_failure_surfaces_as_route_error() {
    let registry = Arc::new(
        TypeConverterRegistry::builder()
            .fallback_chain(Vec::new())
            .build(),
    );
    let routes = echo_routes(&registry, &LogSink::new());

    let err = routes.send_body(LOGGING, fruit_basket()).await.unwrap_err();
    match err {
        shunt::RouteError::Hook { route, step, source } => {
            assert_eq!(route, LOGGING);
            assert_eq!(step, 0);
            assert!(source.downcast_ref::<shunt::ConvertError>().is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}
