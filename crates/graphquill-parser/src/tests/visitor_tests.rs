use crate::ast;
use crate::parse_executable;
use crate::walk_document;
use crate::ChainedVisitor;
use crate::DocumentVisitor;
use crate::ParallelVisitor;
use crate::VisitFlow;

/// Records the order of enter/leave events as short strings.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
    /// When set, fields with this name are skipped on enter.
    skip_field: Option<String>,
}

impl<'src> DocumentVisitor<'src> for EventLog {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        self.events.push(format!("enter:{}", node.name));
        if self.skip_field.as_deref() == Some(node.name.as_str()) {
            VisitFlow::Skip
        } else {
            VisitFlow::Next
        }
    }

    fn leave_field(&mut self, node: &ast::Field<'src>) {
        self.events.push(format!("leave:{}", node.name));
    }

    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        if let ast::Value::Int(v) = node {
            self.events.push(format!("value:{}", v.raw));
        }
        VisitFlow::Next
    }
}

#[test]
fn walks_fields_in_document_order_with_balanced_leaves() {
    let doc = parse_executable("{ a { b } c }").unwrap();
    let mut log = EventLog::default();
    walk_document(&mut log, &doc);
    assert_eq!(log.events, vec![
        "enter:a", "enter:b", "leave:b", "leave:a", "enter:c", "leave:c",
    ]);
}

#[test]
fn skip_prevents_descent_but_still_leaves() {
    let doc = parse_executable("{ a(x: 1) { b } c(y: 2) }").unwrap();
    let mut log = EventLog {
        skip_field: Some("a".to_string()),
        ..EventLog::default()
    };
    walk_document(&mut log, &doc);
    // Neither the argument value 1 nor the nested field b is visited.
    assert_eq!(log.events, vec![
        "enter:a", "leave:a", "enter:c", "value:2", "leave:c",
    ]);
}

#[test]
fn parallel_visitor_runs_all_visitors_in_one_pass() {
    let doc = parse_executable("{ a { b } }").unwrap();
    let mut first = EventLog::default();
    let mut second = EventLog {
        skip_field: Some("a".to_string()),
        ..EventLog::default()
    };
    {
        let mut parallel = ParallelVisitor::new(vec![&mut first, &mut second]);
        walk_document(&mut parallel, &doc);
    }
    // The non-skipping visitor still sees the whole tree...
    assert_eq!(first.events, vec![
        "enter:a", "enter:b", "leave:b", "leave:a",
    ]);
    // ...while the skipping visitor is suppressed below `a`.
    assert_eq!(second.events, vec!["enter:a", "leave:a"]);
}

#[test]
fn chained_visitor_runs_full_traversals_in_sequence() {
    let doc = parse_executable("{ a { b } }").unwrap();
    let mut first = EventLog {
        skip_field: Some("a".to_string()),
        ..EventLog::default()
    };
    let mut second = EventLog::default();
    ChainedVisitor::visit(vec![&mut first, &mut second], &doc);
    // Unlike parallel composition, each visitor gets its own complete
    // walk: the first's skip cannot affect the second.
    assert_eq!(first.events, vec!["enter:a", "leave:a"]);
    assert_eq!(second.events, vec![
        "enter:a", "enter:b", "leave:b", "leave:a",
    ]);
}

#[test]
fn parallel_visitor_suppresses_descent_when_all_skip() {
    let doc = parse_executable("{ a { b } }").unwrap();
    let mut first = EventLog {
        skip_field: Some("a".to_string()),
        ..EventLog::default()
    };
    let mut second = EventLog {
        skip_field: Some("a".to_string()),
        ..EventLog::default()
    };
    {
        let mut parallel = ParallelVisitor::new(vec![&mut first, &mut second]);
        walk_document(&mut parallel, &doc);
    }
    assert_eq!(first.events, vec!["enter:a", "leave:a"]);
    assert_eq!(second.events, vec!["enter:a", "leave:a"]);
}
