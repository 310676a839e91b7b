use crate::schema::Schema;
use crate::validation::TypeInfo;
use crate::validation::ValidationError;
use graphquill_parser::SourceSpan;
use std::cell::Ref;
use std::cell::RefCell;

/// Shared state handed to every validation rule: the schema, the live
/// type-info stacks, and the common error sink.
///
/// Rules run single-threaded within one traversal; the `RefCell`s only
/// exist so the type-info visitor can update the stacks while the rules
/// read them.
#[derive(Clone, Copy)]
pub(crate) struct RuleCtx<'v, 'schema> {
    pub schema: &'schema Schema,
    pub type_info: &'v RefCell<TypeInfo<'schema>>,
    pub errors: &'v RefCell<Vec<ValidationError>>,
}

impl<'v, 'schema> RuleCtx<'v, 'schema> {
    pub fn info(&self) -> Ref<'v, TypeInfo<'schema>> {
        self.type_info.borrow()
    }

    pub fn error(&self, message: impl Into<String>, spans: &[&SourceSpan]) {
        self.errors
            .borrow_mut()
            .push(ValidationError::new(message, spans));
    }
}
