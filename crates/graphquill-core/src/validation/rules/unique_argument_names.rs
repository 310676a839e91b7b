use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Argument names must be unique per field or directive usage.
pub(crate) struct UniqueArgumentNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> UniqueArgumentNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }

    fn check(&self, arguments: &[ast::Argument<'_>]) {
        let mut seen = HashSet::new();
        for argument in arguments {
            if !seen.insert(argument.name.as_str()) {
                self.ctx.error(
                    format!(
                        "There can be only one argument named \"{}\"",
                        argument.name
                    ),
                    &[&argument.span],
                );
            }
        }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueArgumentNamesRule<'_, '_> {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        self.check(&node.arguments);
        VisitFlow::Next
    }

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) -> VisitFlow {
        self.check(&node.arguments);
        VisitFlow::Next
    }
}
