use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// A subscription operation must select exactly one top-level field.
pub(crate) struct SingleFieldSubscriptionsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> SingleFieldSubscriptionsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for SingleFieldSubscriptionsRule<'_, '_> {
    fn enter_operation_definition(
        &mut self,
        node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        if node.operation == ast::OperationKind::Subscription
            && node.selection_set.selections.len() != 1
        {
            let message = match &node.name {
                Some(name) => {
                    format!("Subscription \"{name}\" must select only one top level field")
                }
                None => "Anonymous Subscription must select only one top level field".to_string(),
            };
            self.ctx.error(message, &[&node.span]);
        }
        VisitFlow::Next
    }
}
