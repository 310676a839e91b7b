use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::SourceSpan;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Every defined fragment must be spread at least once.
pub(crate) struct NoUnusedFragmentsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    defined: Vec<(String, SourceSpan)>,
    used: HashSet<String>,
}

impl<'v, 'schema> NoUnusedFragmentsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            defined: vec![],
            used: HashSet::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for NoUnusedFragmentsRule<'_, '_> {
    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.defined
            .push((node.name.as_str().to_string(), node.span.clone()));
        VisitFlow::Next
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        self.used.insert(node.name.as_str().to_string());
        VisitFlow::Next
    }

    fn leave_document(&mut self, _node: &ast::Document<'src>) {
        for (name, span) in &self.defined {
            if !self.used.contains(name) {
                self.ctx
                    .error(format!("Fragment \"{name}\" is never used"), &[span]);
            }
        }
    }
}
