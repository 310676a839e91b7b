//! AST traversal: the [`DocumentVisitor`] trait, the [`walk_document`]
//! driver, and visitor combinators.
//!
//! The walker calls `enter_*(node)` for each node, recurses into children
//! in AST field order, then calls `leave_*(node)`. Returning
//! [`VisitFlow::Skip`] from an `enter_*` hook prevents descent into that
//! node's children; the matching `leave_*` hook is still invoked, so
//! enter/leave pairs always balance.
//!
//! [`ParallelVisitor`] composes N visitors over a single traversal,
//! invoking each visitor's hooks in order and suppressing descent only
//! when *all* active visitors request a skip. [`ChainedVisitor`] runs
//! sequential full traversals instead.
//!
//! Traversal is read-only: visitors observe nodes but never mutate the
//! document.

use crate::ast;

/// Flow control returned from `enter_*` hooks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitFlow {
    /// Continue into this node's children.
    Next,
    /// Do not descend into this node's children. The node's `leave_*` hook
    /// still runs.
    Skip,
}

/// A visitor over the executable portions of a [`ast::Document`].
///
/// All hooks default to no-ops (`enter_*` returning [`VisitFlow::Next`]),
/// so implementations only override the nodes they care about.
///
/// Type-system definitions in a mixed document are not traversed; a
/// visitor that needs to see them can inspect
/// [`ast::Document::definitions`] from [`DocumentVisitor::enter_document`].
#[allow(unused_variables)]
pub trait DocumentVisitor<'src> {
    fn enter_document(&mut self, node: &ast::Document<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_document(&mut self, node: &ast::Document<'src>) {}

    fn enter_operation_definition(
        &mut self,
        node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_operation_definition(&mut self, node: &ast::OperationDefinition<'src>) {}

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) {}

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) {}

    fn enter_selection_set(&mut self, node: &ast::SelectionSet<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_selection_set(&mut self, node: &ast::SelectionSet<'src>) {}

    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_field(&mut self, node: &ast::Field<'src>) {}

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) {}

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) {}

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) {}

    fn enter_argument(&mut self, node: &ast::Argument<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_argument(&mut self, node: &ast::Argument<'src>) {}

    /// Called for every value node, including those nested in lists and
    /// input objects.
    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_value(&mut self, node: &ast::Value<'src>) {}

    fn enter_object_field(&mut self, node: &ast::ObjectField<'src>) -> VisitFlow {
        VisitFlow::Next
    }
    fn leave_object_field(&mut self, node: &ast::ObjectField<'src>) {}
}

// =============================================================================
// Walker
// =============================================================================

/// Walks a document, dispatching to `visitor` as described in the module
/// documentation.
pub fn walk_document<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    document: &ast::Document<'src>,
) {
    let flow = visitor.enter_document(document);
    if flow == VisitFlow::Next {
        for definition in &document.definitions {
            match definition {
                ast::Definition::OperationDefinition(op) => {
                    walk_operation_definition(visitor, op);
                }
                ast::Definition::FragmentDefinition(frag) => {
                    walk_fragment_definition(visitor, frag);
                }
                // Type-system definitions are not traversed.
                _ => {}
            }
        }
    }
    visitor.leave_document(document);
}

fn walk_operation_definition<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::OperationDefinition<'src>,
) {
    let flow = visitor.enter_operation_definition(node);
    if flow == VisitFlow::Next {
        for variable_definition in &node.variable_definitions {
            walk_variable_definition(visitor, variable_definition);
        }
        for directive in &node.directives {
            walk_directive(visitor, directive);
        }
        walk_selection_set(visitor, &node.selection_set);
    }
    visitor.leave_operation_definition(node);
}

fn walk_variable_definition<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::VariableDefinition<'src>,
) {
    let flow = visitor.enter_variable_definition(node);
    if flow == VisitFlow::Next
        && let Some(default_value) = &node.default_value
    {
        walk_value(visitor, default_value);
    }
    visitor.leave_variable_definition(node);
}

fn walk_fragment_definition<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::FragmentDefinition<'src>,
) {
    let flow = visitor.enter_fragment_definition(node);
    if flow == VisitFlow::Next {
        for directive in &node.directives {
            walk_directive(visitor, directive);
        }
        walk_selection_set(visitor, &node.selection_set);
    }
    visitor.leave_fragment_definition(node);
}

fn walk_selection_set<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::SelectionSet<'src>,
) {
    let flow = visitor.enter_selection_set(node);
    if flow == VisitFlow::Next {
        for selection in &node.selections {
            match selection {
                ast::Selection::Field(field) => walk_field(visitor, field),
                ast::Selection::FragmentSpread(spread) => walk_fragment_spread(visitor, spread),
                ast::Selection::InlineFragment(inline) => walk_inline_fragment(visitor, inline),
            }
        }
    }
    visitor.leave_selection_set(node);
}

fn walk_field<'src, V: DocumentVisitor<'src> + ?Sized>(visitor: &mut V, node: &ast::Field<'src>) {
    let flow = visitor.enter_field(node);
    if flow == VisitFlow::Next {
        for argument in &node.arguments {
            walk_argument(visitor, argument);
        }
        for directive in &node.directives {
            walk_directive(visitor, directive);
        }
        if let Some(selection_set) = &node.selection_set {
            walk_selection_set(visitor, selection_set);
        }
    }
    visitor.leave_field(node);
}

fn walk_fragment_spread<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::FragmentSpread<'src>,
) {
    let flow = visitor.enter_fragment_spread(node);
    if flow == VisitFlow::Next {
        for directive in &node.directives {
            walk_directive(visitor, directive);
        }
    }
    visitor.leave_fragment_spread(node);
}

fn walk_inline_fragment<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::InlineFragment<'src>,
) {
    let flow = visitor.enter_inline_fragment(node);
    if flow == VisitFlow::Next {
        for directive in &node.directives {
            walk_directive(visitor, directive);
        }
        walk_selection_set(visitor, &node.selection_set);
    }
    visitor.leave_inline_fragment(node);
}

fn walk_directive<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::DirectiveAnnotation<'src>,
) {
    let flow = visitor.enter_directive(node);
    if flow == VisitFlow::Next {
        for argument in &node.arguments {
            walk_argument(visitor, argument);
        }
    }
    visitor.leave_directive(node);
}

fn walk_argument<'src, V: DocumentVisitor<'src> + ?Sized>(
    visitor: &mut V,
    node: &ast::Argument<'src>,
) {
    let flow = visitor.enter_argument(node);
    if flow == VisitFlow::Next {
        walk_value(visitor, &node.value);
    }
    visitor.leave_argument(node);
}

fn walk_value<'src, V: DocumentVisitor<'src> + ?Sized>(visitor: &mut V, node: &ast::Value<'src>) {
    let flow = visitor.enter_value(node);
    if flow == VisitFlow::Next {
        match node {
            ast::Value::List(list) => {
                for value in &list.values {
                    walk_value(visitor, value);
                }
            }
            ast::Value::Object(object) => {
                for field in &object.fields {
                    let field_flow = visitor.enter_object_field(field);
                    if field_flow == VisitFlow::Next {
                        walk_value(visitor, &field.value);
                    }
                    visitor.leave_object_field(field);
                }
            }
            _ => {}
        }
    }
    visitor.leave_value(node);
}

// =============================================================================
// Parallel composition
// =============================================================================

/// Per-visitor state inside a [`ParallelVisitor`].
struct VisitorSlot<'v, 'src> {
    visitor: &'v mut dyn DocumentVisitor<'src>,
    /// When `Some(depth)`, this visitor requested a skip at that depth and
    /// receives no callbacks until the traversal returns to it.
    skip_from: Option<usize>,
}

/// Composes N visitors over a single traversal.
///
/// Each hook is invoked on every active visitor in order. A visitor that
/// returns [`VisitFlow::Skip`] stops receiving callbacks below the skipped
/// node (its `leave_*` for that node still runs); descent is suppressed
/// entirely only when every visitor has skipped.
pub struct ParallelVisitor<'v, 'src> {
    slots: Vec<VisitorSlot<'v, 'src>>,
    depth: usize,
}

impl<'v, 'src> ParallelVisitor<'v, 'src> {
    pub fn new(visitors: Vec<&'v mut dyn DocumentVisitor<'src>>) -> Self {
        Self {
            slots: visitors
                .into_iter()
                .map(|visitor| VisitorSlot {
                    visitor,
                    skip_from: None,
                })
                .collect(),
            depth: 0,
        }
    }

    fn dispatch_enter(
        &mut self,
        mut f: impl FnMut(&mut dyn DocumentVisitor<'src>) -> VisitFlow,
    ) -> VisitFlow {
        self.depth += 1;
        let mut any_descending = false;
        for slot in &mut self.slots {
            if slot.skip_from.is_some() {
                continue;
            }
            match f(slot.visitor) {
                VisitFlow::Next => any_descending = true,
                VisitFlow::Skip => slot.skip_from = Some(self.depth),
            }
        }
        if any_descending {
            VisitFlow::Next
        } else {
            VisitFlow::Skip
        }
    }

    fn dispatch_leave(&mut self, mut f: impl FnMut(&mut dyn DocumentVisitor<'src>)) {
        for slot in &mut self.slots {
            match slot.skip_from {
                // This visitor skipped at this node; reactivate and deliver
                // the balancing leave.
                Some(depth) if depth == self.depth => {
                    slot.skip_from = None;
                    f(slot.visitor);
                }
                Some(_) => {}
                None => f(slot.visitor),
            }
        }
        self.depth -= 1;
    }
}

macro_rules! parallel_hooks {
    ($( $enter:ident / $leave:ident : $node:ty ),* $(,)?) => {
        $(
            fn $enter(&mut self, node: &$node) -> VisitFlow {
                self.dispatch_enter(|visitor| visitor.$enter(node))
            }
            fn $leave(&mut self, node: &$node) {
                self.dispatch_leave(|visitor| visitor.$leave(node));
            }
        )*
    };
}

impl<'src> DocumentVisitor<'src> for ParallelVisitor<'_, 'src> {
    parallel_hooks! {
        enter_document / leave_document: ast::Document<'src>,
        enter_operation_definition / leave_operation_definition: ast::OperationDefinition<'src>,
        enter_variable_definition / leave_variable_definition: ast::VariableDefinition<'src>,
        enter_fragment_definition / leave_fragment_definition: ast::FragmentDefinition<'src>,
        enter_selection_set / leave_selection_set: ast::SelectionSet<'src>,
        enter_field / leave_field: ast::Field<'src>,
        enter_fragment_spread / leave_fragment_spread: ast::FragmentSpread<'src>,
        enter_inline_fragment / leave_inline_fragment: ast::InlineFragment<'src>,
        enter_directive / leave_directive: ast::DirectiveAnnotation<'src>,
        enter_argument / leave_argument: ast::Argument<'src>,
        enter_value / leave_value: ast::Value<'src>,
        enter_object_field / leave_object_field: ast::ObjectField<'src>,
    }
}

// =============================================================================
// Chained composition
// =============================================================================

/// Runs each visitor as its own full traversal, in order.
pub struct ChainedVisitor;

impl ChainedVisitor {
    pub fn visit<'src>(
        visitors: Vec<&mut dyn DocumentVisitor<'src>>,
        document: &ast::Document<'src>,
    ) {
        for visitor in visitors {
            walk_document(visitor, document);
        }
    }
}
