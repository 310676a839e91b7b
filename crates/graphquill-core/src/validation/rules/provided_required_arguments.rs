use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Non-nullable arguments without defaults must be supplied.
pub(crate) struct ProvidedRequiredArgumentsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> ProvidedRequiredArgumentsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for ProvidedRequiredArgumentsRule<'_, '_> {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        let info = self.ctx.info();
        let Some(field_def) = info.field_def() else {
            return VisitFlow::Next;
        };
        drop(info);

        for param in field_def.parameters.values() {
            let provided = node
                .arguments
                .iter()
                .any(|argument| argument.name.as_str() == param.name);
            if param.is_required() && !provided {
                self.ctx.error(
                    format!(
                        "Field \"{}\" argument \"{}\" of type \"{}\" is required but not \
                         provided",
                        node.name, param.name, param.value_type
                    ),
                    &[&node.span],
                );
            }
        }
        VisitFlow::Next
    }

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) -> VisitFlow {
        let Some(directive) = self.ctx.schema.directive(node.name.as_str()) else {
            return VisitFlow::Next;
        };
        for param in directive.arguments.values() {
            let provided = node
                .arguments
                .iter()
                .any(|argument| argument.name.as_str() == param.name);
            if param.is_required() && !provided {
                self.ctx.error(
                    format!(
                        "Directive \"@{}\" argument \"{}\" of type \"{}\" is required but not \
                         provided",
                        node.name, param.name, param.value_type
                    ),
                    &[&node.span],
                );
            }
        }
        VisitFlow::Next
    }
}
