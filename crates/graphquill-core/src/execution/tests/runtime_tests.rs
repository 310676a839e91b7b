use super::schema_with_resolvers;
use crate::execution::BlockingRuntime;
use crate::execution::Deferred;
use crate::execution::ExecuteOptions;
use crate::execution::Runtime;
use crate::execution::ThreadPoolRuntime;
use crate::process_graphql_query;
use crate::process_graphql_query_deferred;
use crate::schema::ResolverRegistry;
use crate::types::FieldResolver;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

mod deferred_values {
    use super::*;

    #[test]
    fn ready_values_wait_immediately() {
        let deferred = Deferred::ready(5);
        assert_eq!(deferred.wait(), 5);
    }

    #[test]
    fn callbacks_run_on_resolution() {
        let deferred: Deferred<i32> = Deferred::new();
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        deferred.on_complete(move |value| {
            *seen_clone.lock().unwrap() = Some(*value);
        });
        deferred.resolve(9);
        assert_eq!(*seen.lock().unwrap(), Some(9));
    }

    #[test]
    fn chain_transforms_the_result() {
        let deferred: Deferred<i32> = Deferred::new();
        let doubled = deferred.chain(|value| value * 2);
        deferred.resolve(21);
        assert_eq!(doubled.wait(), 42);
    }

    #[test]
    fn wait_blocks_until_cross_thread_resolution() {
        let deferred: Deferred<&'static str> = Deferred::new();
        let remote = deferred.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            remote.resolve("done");
        });
        assert_eq!(deferred.wait(), "done");
    }
}

mod gather_values {
    use super::*;
    use crate::execution::Task;

    fn tasks_counting_to(n: usize) -> Vec<Task<'static>> {
        (0..n)
            .map(|index| {
                let task: Task<'static> = Box::new(move || Ok(json!(index)));
                task
            })
            .collect()
    }

    #[test]
    fn blocking_gather_preserves_order() {
        let outputs = BlockingRuntime.gather_values(tasks_counting_to(5));
        let values: Vec<i64> = outputs
            .into_iter()
            .map(|output| output.unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn pool_gather_preserves_order_despite_varied_latency() {
        let pool = ThreadPoolRuntime::new(4);
        let tasks: Vec<Task<'static>> = (0..6u64)
            .map(|index| {
                let task: Task<'static> = Box::new(move || {
                    // Later tasks finish first.
                    std::thread::sleep(Duration::from_millis(20 - index * 3));
                    Ok(json!(index))
                });
                task
            })
            .collect();
        let values: Vec<u64> = pool
            .gather_values(tasks)
            .into_iter()
            .map(|output| output.unwrap().as_u64().unwrap())
            .collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
    }
}

mod response_ordering {
    use super::*;

    /// Response data must preserve selection order even when an earlier
    /// sibling resolves later.
    #[test]
    fn concurrent_siblings_preserve_selection_order() {
        let schema = schema_with_resolvers(
            "type Query { a: Int b: Int }",
            ResolverRegistry::new()
                .register(
                    "Query.a",
                    FieldResolver::new(|_| {
                        std::thread::sleep(Duration::from_millis(40));
                        Ok(json!(1))
                    }),
                )
                .register("Query.b", FieldResolver::new(|_| Ok(json!(2)))),
        );
        let response = process_graphql_query(
            &schema,
            "{ a b }",
            &ExecuteOptions {
                runtime: Arc::new(ThreadPoolRuntime::new(4)),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(
            serde_json::to_string(&response.data.unwrap()).unwrap(),
            r#"{"a":1,"b":2}"#
        );
    }

    #[test]
    fn mutation_roots_run_sequentially() {
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(vec![]));
        let slow_log = Arc::clone(&log);
        let fast_log = Arc::clone(&log);
        let schema = schema_with_resolvers(
            "type Query { q: Int } type Mutation { slow: Int fast: Int }",
            ResolverRegistry::new()
                .register(
                    "Mutation.slow",
                    FieldResolver::new(move |_| {
                        std::thread::sleep(Duration::from_millis(30));
                        slow_log.lock().unwrap().push("slow");
                        Ok(json!(1))
                    }),
                )
                .register(
                    "Mutation.fast",
                    FieldResolver::new(move |_| {
                        fast_log.lock().unwrap().push("fast");
                        Ok(json!(2))
                    }),
                ),
        );
        let response = process_graphql_query(
            &schema,
            "mutation { slow fast }",
            &ExecuteOptions {
                runtime: Arc::new(ThreadPoolRuntime::new(4)),
                ..ExecuteOptions::default()
            },
        );
        assert!(response.is_ok());
        // Sequential per spec: `slow` completes before `fast` starts.
        assert_eq!(*log.lock().unwrap(), vec!["slow", "fast"]);
    }
}

mod deferred_pipeline {
    use super::*;

    #[test]
    fn the_whole_pipeline_can_run_off_thread() {
        let schema = schema_with_resolvers(
            "type Query { n: Int }",
            ResolverRegistry::new().register("Query.n", FieldResolver::new(|_| Ok(json!(3)))),
        );
        let response = process_graphql_query_deferred(
            Arc::new(schema),
            "{ n }".to_string(),
            ExecuteOptions {
                runtime: Arc::new(ThreadPoolRuntime::new(2)),
                ..ExecuteOptions::default()
            },
        )
        .wait();
        assert_eq!(response.data, Some(json!({ "n": 3 })));
    }
}
