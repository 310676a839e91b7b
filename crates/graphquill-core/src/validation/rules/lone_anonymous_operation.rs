use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// An anonymous operation must be the only operation in the document.
pub(crate) struct LoneAnonymousOperationRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    operation_count: usize,
}

impl<'v, 'schema> LoneAnonymousOperationRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            operation_count: 0,
        }
    }
}

impl<'src> DocumentVisitor<'src> for LoneAnonymousOperationRule<'_, '_> {
    fn enter_document(&mut self, node: &ast::Document<'src>) -> VisitFlow {
        self.operation_count = node.operations().count();
        VisitFlow::Next
    }

    fn enter_operation_definition(
        &mut self,
        node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        if node.name.is_none() && self.operation_count > 1 {
            self.ctx.error(
                "The anonymous operation must be the only defined operation",
                &[&node.span],
            );
        }
        VisitFlow::Next
    }
}
