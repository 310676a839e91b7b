use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Every selected field must be defined on the enclosing composite type
/// (meta fields included).
pub(crate) struct FieldsOnCorrectTypeRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> FieldsOnCorrectTypeRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for FieldsOnCorrectTypeRule<'_, '_> {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        let info = self.ctx.info();
        // An unknown parent type already produced its own error upstream.
        let Some(parent_type) = info.parent_type() else {
            return VisitFlow::Next;
        };
        if info.field_def().is_none() {
            let message = format!(
                "Cannot query field \"{}\" on type \"{}\"",
                node.name,
                parent_type.name()
            );
            drop(info);
            self.ctx.error(message, &[&node.span]);
        }
        VisitFlow::Next
    }
}
