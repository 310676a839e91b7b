use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::ast::DirectiveLocation;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Directives must be declared in the schema and legal at the location
/// they are applied to.
pub(crate) struct KnownDirectivesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    /// The executable location of the node currently being entered.
    location_stack: Vec<DirectiveLocation>,
}

impl<'v, 'schema> KnownDirectivesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            location_stack: vec![],
        }
    }
}

impl<'src> DocumentVisitor<'src> for KnownDirectivesRule<'_, '_> {
    fn enter_operation_definition(&mut self, node: &ast::OperationDefinition<'src>) -> VisitFlow {
        self.location_stack.push(match node.operation {
            ast::OperationKind::Query => DirectiveLocation::Query,
            ast::OperationKind::Mutation => DirectiveLocation::Mutation,
            ast::OperationKind::Subscription => DirectiveLocation::Subscription,
        });
        VisitFlow::Next
    }

    fn leave_operation_definition(&mut self, _node: &ast::OperationDefinition<'src>) {
        self.location_stack.pop();
    }

    fn enter_field(&mut self, _node: &ast::Field<'src>) -> VisitFlow {
        self.location_stack.push(DirectiveLocation::Field);
        VisitFlow::Next
    }

    fn leave_field(&mut self, _node: &ast::Field<'src>) {
        self.location_stack.pop();
    }

    fn enter_fragment_definition(&mut self, _node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.location_stack
            .push(DirectiveLocation::FragmentDefinition);
        VisitFlow::Next
    }

    fn leave_fragment_definition(&mut self, _node: &ast::FragmentDefinition<'src>) {
        self.location_stack.pop();
    }

    fn enter_fragment_spread(&mut self, _node: &ast::FragmentSpread<'src>) -> VisitFlow {
        self.location_stack.push(DirectiveLocation::FragmentSpread);
        VisitFlow::Next
    }

    fn leave_fragment_spread(&mut self, _node: &ast::FragmentSpread<'src>) {
        self.location_stack.pop();
    }

    fn enter_inline_fragment(&mut self, _node: &ast::InlineFragment<'src>) -> VisitFlow {
        self.location_stack.push(DirectiveLocation::InlineFragment);
        VisitFlow::Next
    }

    fn leave_inline_fragment(&mut self, _node: &ast::InlineFragment<'src>) {
        self.location_stack.pop();
    }

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) -> VisitFlow {
        let Some(directive) = self.ctx.schema.directive(node.name.as_str()) else {
            self.ctx.error(
                format!("Unknown directive \"@{}\"", node.name),
                &[&node.span],
            );
            return VisitFlow::Next;
        };
        if let Some(location) = self.location_stack.last()
            && !directive.supports_location(*location)
        {
            self.ctx.error(
                format!(
                    "Directive \"@{}\" may not be used on {}",
                    node.name,
                    location.keyword()
                ),
                &[&node.span],
            );
        }
        VisitFlow::Next
    }
}
