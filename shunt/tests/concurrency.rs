use shunt::{
    RegistryConfig, TypeConverter, TypeConverterRegistry, TypeTag, Value, hooks::LogSink,
    testing::echo_request,
};
use std::{sync::Arc, thread};

mod common;
use common::{ECHO, LOGGING, echo_routes, fruit_basket, hello};

const THREADS: usize = 8;
const ROUNDS: usize = 50;

#[test]
fn test_racing_discoveries_converge_on_one_converter() {
    for config in [RegistryConfig::legacy(), RegistryConfig::corrected()] {
        let registry = TypeConverterRegistry::with_config(config);

        thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..ROUNDS {
                        registry.convert(TypeTag::TEXT, &fruit_basket()).unwrap();
                    }
                });
            }
        });

        assert_eq!(registry.dynamic_len(), 1, "{config:?}");
        let cached = registry.lookup(TypeTag::TEXT, TypeTag::ARRAY_LIST).unwrap();
        let (_, entry) = registry.dynamic_entries().pop().unwrap();
        assert!(cached.same_as(&entry), "{config:?}");
    }
}

#[test]
fn test_corrected_registry_keeps_container_output_under_contention() {
    let registry = TypeConverterRegistry::default();

    thread::scope(|s| {
        for worker in 0..THREADS {
            let registry = &registry;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    if worker % 2 == 0 {
                        registry.convert(TypeTag::TEXT, &fruit_basket()).unwrap();
                    } else {
                        let text = registry.convert(TypeTag::TEXT, &hello()).unwrap();
                        assert_eq!(text, Value::text("hello"));
                    }
                }
            });
        }
    });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_routes_share_one_registry() {
    let registry = Arc::new(TypeConverterRegistry::with_config(RegistryConfig::legacy()));
    let routes = Arc::new(echo_routes(&registry, &LogSink::new()));

    routes.send_body(LOGGING, fruit_basket()).await.unwrap();

    let tasks: Vec<_> = (0..THREADS)
        .map(|_| {
            let routes = routes.clone();
            tokio::spawn(async move {
                routes
                    .send(ECHO, echo_request(Some("hello")))
                    .await
                    .unwrap()
                    .into_body()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), Value::text("[hello]"));
    }
}
