use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::SourceSpan;
use graphquill_parser::VisitFlow;
use std::collections::HashMap;

/// Named operations must be unique within a document.
pub(crate) struct UniqueOperationNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    seen: HashMap<String, SourceSpan>,
}

impl<'v, 'schema> UniqueOperationNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            seen: HashMap::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueOperationNamesRule<'_, '_> {
    fn enter_operation_definition(
        &mut self,
        node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        if let Some(name) = &node.name {
            match self.seen.get(name.as_str()) {
                Some(first_span) => self.ctx.error(
                    format!("There can be only one operation named \"{name}\""),
                    &[first_span, &name.span],
                ),
                None => {
                    self.seen
                        .insert(name.as_str().to_string(), name.span.clone());
                }
            }
        }
        VisitFlow::Next
    }
}
