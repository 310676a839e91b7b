use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Input object literals may not repeat a field name.
pub(crate) struct UniqueInputFieldNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> UniqueInputFieldNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for UniqueInputFieldNamesRule<'_, '_> {
    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        if let ast::Value::Object(object) = node {
            let mut seen = HashSet::new();
            for field in &object.fields {
                if !seen.insert(field.name.as_str()) {
                    self.ctx.error(
                        format!(
                            "There can be only one input field named \"{}\"",
                            field.name
                        ),
                        &[&field.span],
                    );
                }
            }
        }
        VisitFlow::Next
    }
}
