use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Variable names must be unique within one operation.
pub(crate) struct UniqueVariableNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    seen: HashSet<String>,
}

impl<'v, 'schema> UniqueVariableNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            seen: HashSet::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueVariableNamesRule<'_, '_> {
    fn enter_operation_definition(
        &mut self,
        _node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        self.seen.clear();
        VisitFlow::Next
    }

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        if !self.seen.insert(node.variable.as_str().to_string()) {
            self.ctx.error(
                format!(
                    "There can be only one variable named \"${}\"",
                    node.variable
                ),
                &[&node.variable.span],
            );
        }
        VisitFlow::Next
    }
}
