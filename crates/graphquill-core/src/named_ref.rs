use crate::loc::SchemaDefLocation;
use crate::schema::Schema;
use std::marker::PhantomData;

/// Represents a reference to a schema element by name.
///
/// Type references inside a schema are stored by name rather than as
/// direct pointers: a field whose type is `[User!]` holds a `NamedRef`
/// to `"User"`, resolved against the owning [`Schema`] on access. This is
/// what makes self-referential and mutually-recursive type definitions
/// unremarkable: building a type never requires any other type to have
/// been built first, and dangling names surface during schema validation
/// rather than as construction-order failures.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedRef<T: DerefByName> {
    name: String,
    ref_location: SchemaDefLocation,
    phantom: PhantomData<T>,
}

impl<T: DerefByName> NamedRef<T> {
    pub fn new(name: impl Into<String>, ref_location: SchemaDefLocation) -> Self {
        Self {
            name: name.into(),
            ref_location,
            phantom: PhantomData,
        }
    }

    /// The referenced name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this reference (not its target) appears.
    pub fn ref_location(&self) -> &SchemaDefLocation {
        &self.ref_location
    }

    /// Resolves this reference against a schema.
    pub fn deref<'schema>(&self, schema: &'schema Schema) -> Result<&'schema T, DerefByNameError> {
        T::deref_name(schema, &self.name)
    }
}

/// Implemented by types that can be referenced by name within a
/// [`Schema`], enabling `NamedRef<T>`.
pub trait DerefByName: Clone + std::fmt::Debug {
    fn deref_name<'schema>(
        schema: &'schema Schema,
        name: &str,
    ) -> Result<&'schema Self, DerefByNameError>
    where
        Self: Sized;
}

/// A named reference did not resolve.
#[derive(Clone, Debug, thiserror::Error)]
pub enum DerefByNameError {
    #[error("no definition named \"{0}\" exists in the schema")]
    DanglingReference(String),
}
