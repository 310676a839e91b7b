use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::SourceSpan;
use graphquill_parser::VisitFlow;
use std::collections::HashMap;
use std::collections::HashSet;

/// Fragments must not spread themselves, directly or transitively.
pub(crate) struct NoFragmentCyclesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    /// Fragment → the spreads appearing (anywhere) inside it.
    spreads: HashMap<String, Vec<(String, SourceSpan)>>,
    current_fragment: Option<String>,
}

impl<'v, 'schema> NoFragmentCyclesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            spreads: HashMap::new(),
            current_fragment: None,
        }
    }

    /// Depth-first walk over the spread graph from `start`, reporting the
    /// first path that re-enters `start`.
    fn find_cycle_from(&self, start: &str) -> Option<(Vec<String>, SourceSpan)> {
        fn dfs(
            spreads: &HashMap<String, Vec<(String, SourceSpan)>>,
            start: &str,
            current: &str,
            path: &mut Vec<String>,
            visited: &mut HashSet<String>,
        ) -> Option<SourceSpan> {
            for (next, span) in spreads.get(current).map(Vec::as_slice).unwrap_or(&[]) {
                if next == start {
                    return Some(span.clone());
                }
                if visited.insert(next.clone()) {
                    path.push(next.clone());
                    if let Some(span) = dfs(spreads, start, next, path, visited) {
                        return Some(span);
                    }
                    path.pop();
                }
            }
            None
        }

        let mut path = vec![];
        let mut visited = HashSet::new();
        dfs(&self.spreads, start, start, &mut path, &mut visited).map(|span| (path, span))
    }
}

impl<'src> DocumentVisitor<'src> for NoFragmentCyclesRule<'_, '_> {
    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.current_fragment = Some(node.name.as_str().to_string());
        self.spreads
            .entry(node.name.as_str().to_string())
            .or_default();
        VisitFlow::Next
    }

    fn leave_fragment_definition(&mut self, _node: &ast::FragmentDefinition<'src>) {
        self.current_fragment = None;
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        if let Some(current) = &self.current_fragment {
            self.spreads
                .entry(current.clone())
                .or_default()
                .push((node.name.as_str().to_string(), node.span.clone()));
        }
        VisitFlow::Next
    }

    fn leave_document(&mut self, _node: &ast::Document<'src>) {
        let mut names: Vec<String> = self.spreads.keys().cloned().collect();
        names.sort();
        for name in names {
            if let Some((via, span)) = self.find_cycle_from(&name) {
                let message = if via.is_empty() {
                    format!("Cannot spread fragment \"{name}\" within itself")
                } else {
                    format!(
                        "Cannot spread fragment \"{name}\" within itself via {}",
                        via.iter()
                            .map(|step| format!("\"{step}\""))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                };
                self.ctx.error(message, &[&span]);
            }
        }
    }
}
