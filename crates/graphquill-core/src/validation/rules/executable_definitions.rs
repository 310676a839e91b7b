use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// A document submitted for validation may only contain operations and
/// fragments.
pub(crate) struct ExecutableDefinitionsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> ExecutableDefinitionsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for ExecutableDefinitionsRule<'_, '_> {
    fn enter_document(&mut self, node: &ast::Document<'src>) -> VisitFlow {
        for definition in &node.definitions {
            let offender = match definition {
                ast::Definition::SchemaDefinition(def) => Some(("schema".to_string(), &def.span)),
                ast::Definition::TypeDefinition(def) => {
                    Some((format!("\"{}\"", def.name()), def.span()))
                }
                ast::Definition::TypeExtension(ext) => {
                    Some((format!("\"{}\"", ext.name()), ext.span()))
                }
                ast::Definition::DirectiveDefinition(def) => {
                    Some((format!("\"{}\"", def.name), &def.span))
                }
                ast::Definition::OperationDefinition(_)
                | ast::Definition::FragmentDefinition(_) => None,
            };
            if let Some((name, span)) = offender {
                self.ctx.error(
                    format!("The {name} definition is not executable"),
                    &[span],
                );
            }
        }
        VisitFlow::Next
    }
}
