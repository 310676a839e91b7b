use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::SourceSpan;
use graphquill_parser::VisitFlow;
use std::collections::HashMap;

/// Fragment names must be unique within a document.
pub(crate) struct UniqueFragmentNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    seen: HashMap<String, SourceSpan>,
}

impl<'v, 'schema> UniqueFragmentNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            seen: HashMap::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueFragmentNamesRule<'_, '_> {
    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        match self.seen.get(node.name.as_str()) {
            Some(first_span) => self.ctx.error(
                format!("There can be only one fragment named \"{}\"", node.name),
                &[first_span, &node.name.span],
            ),
            None => {
                self.seen
                    .insert(node.name.as_str().to_string(), node.name.span.clone());
            }
        }
        VisitFlow::Next
    }
}
