use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Every fragment spread must name a fragment defined in the document.
pub(crate) struct KnownFragmentNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    defined: HashSet<String>,
}

impl<'v, 'schema> KnownFragmentNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            defined: HashSet::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for KnownFragmentNamesRule<'_, '_> {
    fn enter_document(&mut self, node: &ast::Document<'src>) -> VisitFlow {
        self.defined = node
            .fragments()
            .map(|fragment| fragment.name.as_str().to_string())
            .collect();
        VisitFlow::Next
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        if !self.defined.contains(node.name.as_str()) {
            self.ctx.error(
                format!("Unknown fragment \"{}\"", node.name),
                &[&node.name.span],
            );
        }
        VisitFlow::Next
    }
}
