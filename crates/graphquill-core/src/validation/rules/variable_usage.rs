//! Shared bookkeeping for the variable rules: which variables each
//! operation defines, where variables are used, and which fragments each
//! scope spreads (so usages inside fragments attribute to every
//! operation that transitively reaches them).

use crate::types::TypeAnnotation;
use graphquill_parser::ast;
use graphquill_parser::SourceSpan;
use std::collections::HashMap;
use std::collections::HashSet;

/// One `$variable` occurrence inside a value position.
#[derive(Clone, Debug)]
pub(crate) struct VariableUsage {
    pub name: String,
    pub span: SourceSpan,
    /// The input type of the position, when known.
    pub expected_type: Option<TypeAnnotation>,
    /// Whether the position (argument / input field) declares a default.
    pub location_has_default: bool,
}

/// A variable declared in an operation's variable list.
#[derive(Clone, Debug)]
pub(crate) struct VariableDeclaration {
    pub name: String,
    pub span: SourceSpan,
    pub annotation: TypeAnnotation,
    pub has_default: bool,
}

#[derive(Default)]
pub(crate) struct OperationScope {
    pub name: Option<String>,
    pub span: Option<SourceSpan>,
    pub declared: Vec<VariableDeclaration>,
    pub usages: Vec<VariableUsage>,
    pub spreads: HashSet<String>,
}

#[derive(Default)]
pub(crate) struct FragmentScope {
    pub usages: Vec<VariableUsage>,
    pub spreads: HashSet<String>,
}

enum CurrentScope {
    None,
    Operation(usize),
    Fragment(String),
}

/// Collects per-scope variable data during one traversal.
pub(crate) struct UsageTracker {
    pub operations: Vec<OperationScope>,
    pub fragments: HashMap<String, FragmentScope>,
    current: CurrentScope,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self {
            operations: vec![],
            fragments: HashMap::new(),
            current: CurrentScope::None,
        }
    }

    pub fn enter_operation(&mut self, node: &ast::OperationDefinition<'_>) {
        self.operations.push(OperationScope {
            name: node.name.as_ref().map(|name| name.as_str().to_string()),
            span: Some(node.span.clone()),
            ..OperationScope::default()
        });
        self.current = CurrentScope::Operation(self.operations.len() - 1);
    }

    pub fn enter_fragment(&mut self, node: &ast::FragmentDefinition<'_>) {
        let name = node.name.as_str().to_string();
        self.fragments.entry(name.clone()).or_default();
        self.current = CurrentScope::Fragment(name);
    }

    pub fn leave_scope(&mut self) {
        self.current = CurrentScope::None;
    }

    pub fn declare(&mut self, declaration: VariableDeclaration) {
        if let CurrentScope::Operation(index) = self.current {
            self.operations[index].declared.push(declaration);
        }
    }

    pub fn record_usage(&mut self, usage: VariableUsage) {
        match &self.current {
            CurrentScope::Operation(index) => self.operations[*index].usages.push(usage),
            CurrentScope::Fragment(name) => {
                self.fragments
                    .entry(name.clone())
                    .or_default()
                    .usages
                    .push(usage);
            }
            CurrentScope::None => {}
        }
    }

    pub fn record_spread(&mut self, node: &ast::FragmentSpread<'_>) {
        let name = node.name.as_str().to_string();
        match &self.current {
            CurrentScope::Operation(index) => {
                self.operations[*index].spreads.insert(name);
            }
            CurrentScope::Fragment(fragment) => {
                self.fragments
                    .entry(fragment.clone())
                    .or_default()
                    .spreads
                    .insert(name);
            }
            CurrentScope::None => {}
        }
    }

    /// All usages reachable from an operation: its own plus those of
    /// every transitively spread fragment.
    pub fn transitive_usages(&self, operation_index: usize) -> Vec<&VariableUsage> {
        let operation = &self.operations[operation_index];
        let mut usages: Vec<&VariableUsage> = operation.usages.iter().collect();

        let mut queue: Vec<&str> = operation.spreads.iter().map(String::as_str).collect();
        let mut visited: HashSet<&str> = HashSet::new();
        while let Some(name) = queue.pop() {
            if !visited.insert(name) {
                continue;
            }
            if let Some(fragment) = self.fragments.get(name) {
                usages.extend(fragment.usages.iter());
                queue.extend(fragment.spreads.iter().map(String::as_str));
            }
        }
        usages
    }
}
