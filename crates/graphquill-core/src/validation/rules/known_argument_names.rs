use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Arguments must be declared on the field or directive they are passed
/// to.
pub(crate) struct KnownArgumentNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> KnownArgumentNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for KnownArgumentNamesRule<'_, '_> {
    fn enter_argument(&mut self, node: &ast::Argument<'src>) -> VisitFlow {
        let info = self.ctx.info();
        if info.argument.is_some() {
            return VisitFlow::Next;
        }

        let message = if let Some(directive) = info.directive {
            Some(format!(
                "Unknown argument \"{}\" on directive \"@{}\"",
                node.name, directive.name
            ))
        } else if let (Some(field_def), Some(parent_type)) = (info.field_def(), info.parent_type())
        {
            Some(format!(
                "Unknown argument \"{}\" on field \"{}\" of type \"{}\"",
                node.name,
                field_def.name,
                parent_type.name()
            ))
        } else {
            None
        };
        drop(info);

        if let Some(message) = message {
            self.ctx.error(message, &[&node.span]);
        }
        VisitFlow::Next
    }
}
