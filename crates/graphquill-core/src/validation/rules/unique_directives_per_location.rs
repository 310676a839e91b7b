use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// A directive may appear at most once per location.
pub(crate) struct UniqueDirectivesPerLocationRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> UniqueDirectivesPerLocationRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }

    fn check(&self, directives: &[ast::DirectiveAnnotation<'_>]) {
        let mut seen = HashSet::new();
        for directive in directives {
            if !seen.insert(directive.name.as_str()) {
                self.ctx.error(
                    format!(
                        "The directive \"@{}\" can only be used once at this location",
                        directive.name
                    ),
                    &[&directive.span],
                );
            }
        }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueDirectivesPerLocationRule<'_, '_> {
    fn enter_operation_definition(&mut self, node: &ast::OperationDefinition<'src>) -> VisitFlow {
        self.check(&node.directives);
        VisitFlow::Next
    }

    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        self.check(&node.directives);
        VisitFlow::Next
    }

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.check(&node.directives);
        VisitFlow::Next
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        self.check(&node.directives);
        VisitFlow::Next
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        self.check(&node.directives);
        VisitFlow::Next
    }
}
