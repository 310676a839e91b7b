use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashMap;

/// A fragment can only be spread where its type condition can possibly
/// overlap the enclosing type.
pub(crate) struct PossibleFragmentSpreadsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    /// Fragment name → condition type name, gathered up front.
    fragment_conditions: HashMap<String, String>,
}

impl<'v, 'schema> PossibleFragmentSpreadsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            fragment_conditions: HashMap::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for PossibleFragmentSpreadsRule<'_, '_> {
    fn enter_document(&mut self, node: &ast::Document<'src>) -> VisitFlow {
        self.fragment_conditions = node
            .fragments()
            .map(|fragment| {
                (
                    fragment.name.as_str().to_string(),
                    fragment.type_condition.named_type.name.as_str().to_string(),
                )
            })
            .collect();
        VisitFlow::Next
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        let Some(parent_type) = self.ctx.info().parent_type() else {
            return VisitFlow::Next;
        };
        let Some(condition_name) = self.fragment_conditions.get(node.name.as_str()) else {
            return VisitFlow::Next;
        };
        let Some(condition_type) = self.ctx.schema.type_named(condition_name) else {
            return VisitFlow::Next;
        };
        if condition_type.is_composite()
            && parent_type.is_composite()
            && !self.ctx.schema.types_overlap(parent_type, condition_type)
        {
            self.ctx.error(
                format!(
                    "Fragment \"{}\" cannot be spread here as objects of type \"{}\" can never \
                     be of type \"{}\"",
                    node.name,
                    parent_type.name(),
                    condition_type.name()
                ),
                &[&node.span],
            );
        }
        VisitFlow::Next
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        let Some(condition) = &node.type_condition else {
            return VisitFlow::Next;
        };
        // The inline fragment's own condition type was just pushed; the
        // enclosing type is the parent.
        let Some(parent_type) = self.ctx.info().parent_type() else {
            return VisitFlow::Next;
        };
        let Some(condition_type) = self.ctx.schema.type_named(condition.named_type.name.as_str())
        else {
            return VisitFlow::Next;
        };
        if condition_type.is_composite()
            && parent_type.is_composite()
            && !self.ctx.schema.types_overlap(parent_type, condition_type)
        {
            self.ctx.error(
                format!(
                    "Fragment cannot be spread here as objects of type \"{}\" can never be of \
                     type \"{}\"",
                    parent_type.name(),
                    condition_type.name()
                ),
                &[&node.span],
            );
        }
        VisitFlow::Next
    }
}
