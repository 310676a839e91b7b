use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Fragment type conditions must name composite types; a fragment on a
/// scalar or enum can never apply.
pub(crate) struct FragmentsOnCompositeTypesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> FragmentsOnCompositeTypesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }

    /// True when the condition names a known, non-composite type.
    fn is_non_composite(&self, condition: &ast::TypeCondition<'_>) -> bool {
        self.ctx
            .schema
            .type_named(condition.named_type.name.as_str())
            .is_some_and(|graphql_type| !graphql_type.is_composite())
    }
}

impl<'src> DocumentVisitor<'src> for FragmentsOnCompositeTypesRule<'_, '_> {
    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        if self.is_non_composite(&node.type_condition) {
            self.ctx.error(
                format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{}\"",
                    node.name,
                    node.type_condition.named_type.name
                ),
                &[&node.type_condition.span],
            );
        }
        VisitFlow::Next
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        if let Some(condition) = &node.type_condition
            && self.is_non_composite(condition)
        {
            self.ctx.error(
                format!(
                    "Fragment cannot condition on non composite type \"{}\"",
                    condition.named_type.name
                ),
                &[&condition.span],
            );
        }
        VisitFlow::Next
    }
}
