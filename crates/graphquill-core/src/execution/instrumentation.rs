//! Instrumentation hooks and the bundled tracers.
//!
//! An [`Instrumentation`] is a set of best-effort callbacks around the
//! stages of query processing. Field callbacks must be re-entrant: with a
//! concurrent runtime they fire from multiple worker threads.

use crate::execution::PathSegment;
use crate::execution::ResolveInfo;
use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde_json::json;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Mutex;

/// Callbacks around query processing stages.
///
/// All methods default to no-ops. Implementations use interior mutability
/// (`&self` receivers) because field callbacks may arrive concurrently.
#[allow(unused_variables)]
pub trait Instrumentation: Send + Sync {
    /// The whole request starts / ends.
    fn on_start(&self) {}
    fn on_end(&self) {}

    fn on_parse_start(&self) {}
    fn on_parse_end(&self) {}

    fn on_validate_start(&self) {}
    fn on_validate_end(&self) {}

    fn on_query_start(&self) {}
    fn on_query_end(&self) {}

    fn on_field_start(&self, info: &ResolveInfo<'_>) {}
    fn on_field_end(&self, info: &ResolveInfo<'_>) {}

    /// A named payload to merge into the response's `extensions` map, if
    /// this instrumentation produces one.
    fn extension_payload(&self) -> Option<(String, JsonValue)> {
        None
    }
}

// =============================================================================
// Timing tracer
// =============================================================================

/// Timing data for one resolved field.
#[derive(Clone, Debug)]
pub struct FieldTiming {
    pub path: Vec<PathSegment>,
    pub parent_type: String,
    pub field_name: String,
    pub return_type: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// Shared mutable state of a [`TimingTracer`].
#[derive(Debug, Default)]
pub struct TimingState {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub parse_start: Option<DateTime<Utc>>,
    pub parse_end: Option<DateTime<Utc>>,
    pub validation_start: Option<DateTime<Utc>>,
    pub validation_end: Option<DateTime<Utc>>,
    pub query_start: Option<DateTime<Utc>>,
    pub query_end: Option<DateTime<Utc>>,
    /// Keyed by serialized path, in first-start order.
    pub fields: Vec<FieldTiming>,
    pub field_index: HashMap<String, usize>,
}

/// Collects UTC timings for every stage and every resolved field.
///
/// The data needs to be consumed separately to be useful; see
/// [`ApolloTracing`] for a consumer that renders it as a response
/// extension.
#[derive(Debug, Default)]
pub struct TimingTracer {
    pub state: Mutex<TimingState>,
}

impl TimingTracer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn path_key(path: &[PathSegment]) -> String {
    let parts: Vec<String> = path
        .iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        })
        .collect();
    parts.join(".")
}

impl Instrumentation for TimingTracer {
    fn on_start(&self) {
        self.state.lock().unwrap().start = Some(Utc::now());
    }

    fn on_end(&self) {
        self.state.lock().unwrap().end = Some(Utc::now());
    }

    fn on_parse_start(&self) {
        self.state.lock().unwrap().parse_start = Some(Utc::now());
    }

    fn on_parse_end(&self) {
        self.state.lock().unwrap().parse_end = Some(Utc::now());
    }

    fn on_validate_start(&self) {
        self.state.lock().unwrap().validation_start = Some(Utc::now());
    }

    fn on_validate_end(&self) {
        self.state.lock().unwrap().validation_end = Some(Utc::now());
    }

    fn on_query_start(&self) {
        self.state.lock().unwrap().query_start = Some(Utc::now());
    }

    fn on_query_end(&self) {
        self.state.lock().unwrap().query_end = Some(Utc::now());
    }

    fn on_field_start(&self, info: &ResolveInfo<'_>) {
        let mut state = self.state.lock().unwrap();
        let timing = FieldTiming {
            path: info.path.clone(),
            parent_type: info.parent_type.name().to_string(),
            field_name: info.field_def.name.clone(),
            return_type: info.field_def.type_annotation.to_string(),
            start: Utc::now(),
            end: None,
        };
        let key = path_key(&info.path);
        let index = state.fields.len();
        state.fields.push(timing);
        state.field_index.insert(key, index);
    }

    fn on_field_end(&self, info: &ResolveInfo<'_>) {
        let mut state = self.state.lock().unwrap();
        let key = path_key(&info.path);
        if let Some(&index) = state.field_index.get(&key) {
            state.fields[index].end = Some(Utc::now());
        }
    }
}

// =============================================================================
// Apollo tracing
// =============================================================================

/// Nanoseconds between two instants.
fn ns_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_nanoseconds().unwrap_or(0)
}

/// RFC-3339 with microsecond precision and a trailing `Z`.
fn rfc3339_micros(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A [`TimingTracer`] that renders its data as the `tracing` response
/// extension in the Apollo Tracing format (version 1).
#[derive(Debug, Default)]
pub struct ApolloTracing {
    tracer: TimingTracer,
}

impl ApolloTracing {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Instrumentation for ApolloTracing {
    fn on_start(&self) {
        self.tracer.on_start();
    }

    fn on_end(&self) {
        self.tracer.on_end();
    }

    fn on_parse_start(&self) {
        self.tracer.on_parse_start();
    }

    fn on_parse_end(&self) {
        self.tracer.on_parse_end();
    }

    fn on_validate_start(&self) {
        self.tracer.on_validate_start();
    }

    fn on_validate_end(&self) {
        self.tracer.on_validate_end();
    }

    fn on_query_start(&self) {
        self.tracer.on_query_start();
    }

    fn on_query_end(&self) {
        self.tracer.on_query_end();
    }

    fn on_field_start(&self, info: &ResolveInfo<'_>) {
        self.tracer.on_field_start(info);
    }

    fn on_field_end(&self, info: &ResolveInfo<'_>) {
        self.tracer.on_field_end(info);
    }

    fn extension_payload(&self) -> Option<(String, JsonValue)> {
        let state = self.tracer.state.lock().unwrap();
        let start = state.start?;
        let end = state.end?;

        let resolvers: Vec<JsonValue> = state
            .fields
            .iter()
            .map(|field| {
                let field_end = field.end.unwrap_or(end);
                json!({
                    "path": field.path,
                    "parentType": field.parent_type,
                    "fieldName": field.field_name,
                    "returnType": field.return_type,
                    "startOffset": ns_between(start, field.start),
                    "duration": ns_between(field.start, field_end),
                })
            })
            .collect();

        let mut payload = json!({
            "version": 1,
            "startTime": rfc3339_micros(start),
            "endTime": rfc3339_micros(end),
            "duration": ns_between(start, end),
            "execution": if resolvers.is_empty() {
                JsonValue::Null
            } else {
                json!({ "resolvers": resolvers })
            },
        });

        if let (Some(vs), Some(ve)) = (state.validation_start, state.validation_end) {
            payload["validation"] = json!({
                "duration": ns_between(vs, ve),
                "startOffset": ns_between(start, vs),
            });
        }
        if let (Some(ps), Some(pe)) = (state.parse_start, state.parse_end) {
            payload["parsing"] = json!({
                "duration": ns_between(ps, pe),
                "startOffset": ns_between(start, ps),
            });
        }

        Some(("tracing".to_string(), payload))
    }
}
