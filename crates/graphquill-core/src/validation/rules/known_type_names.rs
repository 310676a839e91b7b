use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Every type name referenced by the document (variable types, fragment
/// conditions) must exist in the schema.
pub(crate) struct KnownTypeNamesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> KnownTypeNamesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }

    fn check(&self, named_type: &ast::NamedTypeAnnotation<'_>) {
        let name = named_type.name.as_str();
        if self.ctx.schema.type_named(name).is_none() {
            self.ctx
                .error(format!("Unknown type \"{name}\""), &[&named_type.span]);
        }
    }
}

impl<'src> DocumentVisitor<'src> for KnownTypeNamesRule<'_, '_> {
    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        self.check(node.var_type.innermost_named());
        VisitFlow::Next
    }

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.check(&node.type_condition.named_type);
        VisitFlow::Next
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        if let Some(condition) = &node.type_condition {
            self.check(&condition.named_type);
        }
        VisitFlow::Next
    }
}
