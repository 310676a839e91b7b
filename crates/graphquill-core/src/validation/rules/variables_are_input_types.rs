use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Variables may only be declared with input types.
pub(crate) struct VariablesAreInputTypesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> VariablesAreInputTypesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for VariablesAreInputTypesRule<'_, '_> {
    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        let named = node.var_type.innermost_named();
        // Unknown types are KnownTypeNames' concern.
        if self
            .ctx
            .schema
            .type_named(named.name.as_str())
            .is_some_and(|graphql_type| !graphql_type.is_input_type())
        {
            self.ctx.error(
                format!(
                    "Variable \"${}\" cannot be non-input type \"{}\"",
                    node.variable, node.var_type
                ),
                &[&node.span],
            );
        }
        VisitFlow::Next
    }
}
