use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Leaf fields must not carry sub-selections; composite fields must.
pub(crate) struct ScalarLeafsRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> ScalarLeafsRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }
}

impl<'src> DocumentVisitor<'src> for ScalarLeafsRule<'_, '_> {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        let Some(field_type) = self.ctx.info().current_named_type() else {
            return VisitFlow::Next;
        };
        let type_name = field_type.name().to_string();

        if field_type.is_leaf() && node.selection_set.is_some() {
            self.ctx.error(
                format!(
                    "Field \"{}\" must not have a selection since type \"{type_name}\" has no \
                     subfields",
                    node.name
                ),
                &[&node.span],
            );
        } else if field_type.is_composite() && node.selection_set.is_none() {
            self.ctx.error(
                format!(
                    "Field \"{name}\" of type \"{type_name}\" must have a selection of \
                     subfields. Did you mean \"{name} {{ ... }}\"?",
                    name = node.name
                ),
                &[&node.span],
            );
        }
        VisitFlow::Next
    }
}
