//! Query validation: a single type-info-aware traversal running every
//! specified rule in parallel.

mod context;
mod rules;
mod type_info;
mod validate;
mod validation_error;

pub(crate) use context::RuleCtx;
pub use type_info::TypeInfo;
pub use type_info::TypeInfoVisitor;
pub use validate::validate;
pub use validate::ValidationResult;
pub use validation_error::ValidationError;

#[cfg(test)]
mod tests;
