//! Builds a [`Schema`] from SDL text or a parsed document.
//!
//! The build runs two passes over the document's definitions:
//!
//! 1. **Extract**: partition into at most one schema definition, type
//!    definitions unique by name, type extensions grouped by name, and
//!    directive definitions unique by name. Duplicates fail here.
//! 2. **Materialize**: translate each definition into its
//!    [`GraphQLType`], apply matching extensions, then check that every
//!    referenced type name is registered. Cross-type references are
//!    name-keyed, so recursive and mutually-recursive types need no
//!    special ordering.
//!
//! The built schema is validated before it is returned.

use crate::execution::coercion::ast_const_to_json;
use crate::loc::SchemaDefLocation;
use crate::named_ref::NamedRef;
use crate::schema::introspection;
use crate::schema::validate_schema;
use crate::schema::Schema;
use crate::schema::SchemaValidationError;
use crate::types::DeprecationState;
use crate::types::DirectiveDef;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::FieldResolver;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::InputValueDef;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use graphquill_parser::ast;
use graphquill_parser::ParseOptions;
use graphquill_parser::SyntaxError;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Errors raised while building a schema from SDL.
#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("failed to read schema file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Schema documents must not contain executable definitions")]
    ExecutableDefinition,

    #[error("Must provide only one schema definition")]
    DuplicateSchemaDefinition,

    #[error("Duplicate type {name}")]
    DuplicateTypeDefinition { name: String },

    #[error("Duplicate directive @{name}")]
    DuplicateDirectiveDefinition { name: String },

    #[error("Duplicate field {type_name}.{field_name}")]
    DuplicateFieldDefinition {
        type_name: String,
        field_name: String,
    },

    #[error("Can only define one {operation} in schema")]
    DuplicateOperationDefinition { operation: String },

    #[error("{operation} type {name} not found in document")]
    UnknownOperationType { operation: String, name: String },

    #[error("Type {name} not found in document")]
    UnknownType { name: String },

    #[error("Cannot extend undefined type \"{name}\"")]
    ExtendUndefinedType { name: String },

    #[error("Scalar type extensions are not supported (type \"{name}\")")]
    ScalarExtensionUnsupported { name: String },

    #[error("Cannot extend {base_kind} type \"{name}\" with a {extension_kind} extension")]
    ExtensionKindMismatch {
        name: String,
        base_kind: String,
        extension_kind: String,
    },

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

// =============================================================================
// Resolver injection
// =============================================================================

enum RegistryInner {
    Map(HashMap<String, FieldResolver>),
    Lookup(Arc<dyn Fn(&str, &str) -> Option<FieldResolver> + Send + Sync>),
}

/// Supplies resolvers to SDL-built object fields.
///
/// Either a `"TypeName.fieldName" → resolver` map, or a lookup function
/// called with `(type_name, field_name)`. Fields with no match keep no
/// resolver; default resolution applies to them at execution.
pub struct ResolverRegistry {
    inner: RegistryInner,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self {
            inner: RegistryInner::Map(HashMap::new()),
        }
    }

    /// Registers a resolver under `"TypeName.fieldName"`.
    pub fn register(
        mut self,
        key: impl Into<String>,
        resolver: FieldResolver,
    ) -> Self {
        if let RegistryInner::Map(map) = &mut self.inner {
            map.insert(key.into(), resolver);
        }
        self
    }

    /// A registry backed by a lookup function.
    pub fn from_fn(
        lookup: impl Fn(&str, &str) -> Option<FieldResolver> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: RegistryInner::Lookup(Arc::new(lookup)),
        }
    }

    fn lookup(&self, type_name: &str, field_name: &str) -> Option<FieldResolver> {
        match &self.inner {
            RegistryInner::Map(map) => map.get(&format!("{type_name}.{field_name}")).cloned(),
            RegistryInner::Lookup(lookup) => lookup(type_name, field_name),
        }
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Utility for building a [`Schema`] from one or more SDL sources.
pub struct SchemaBuilder {
    sources: Vec<(PathBuf, String)>,
    resolvers: Option<ResolverRegistry>,
    known_types: Vec<GraphQLType>,
    str_load_counter: u16,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            sources: vec![],
            resolvers: None,
            known_types: vec![],
            str_load_counter: 0,
        }
    }

    /// Adds SDL text. Syntax errors surface immediately.
    pub fn load_from_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path = match file_path {
            Some(file_path) => file_path,
            None => {
                let counter = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{counter}"))
            }
        };
        // Trial parse so a bad source fails at load time, not at build.
        parse_source(&file_path, content)?;
        self.sources.push((file_path, content.to_string()));
        Ok(self)
    }

    pub fn load_from_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_from_files(vec![file_path])
    }

    pub fn load_from_files(mut self, file_paths: Vec<impl AsRef<Path>>) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let content =
                std::fs::read_to_string(file_path).map_err(|source| SchemaBuildError::FileRead {
                    path: file_path.to_path_buf(),
                    source,
                })?;
            self = self.load_from_str(Some(file_path.to_path_buf()), &content)?;
        }
        Ok(self)
    }

    /// Supplies the resolver registry for injection into object fields.
    pub fn with_resolvers(mut self, resolvers: ResolverRegistry) -> Self {
        self.resolvers = Some(resolvers);
        self
    }

    /// Supplies pre-built types (custom scalars, enums with internal
    /// values). A known type shadows any SDL definition of the same name.
    pub fn with_known_types(mut self, known_types: Vec<GraphQLType>) -> Self {
        self.known_types = known_types;
        self
    }

    /// Parses all loaded sources and builds the schema.
    pub fn build(self) -> Result<Schema> {
        let sources = self.sources;
        let mut documents = Vec::with_capacity(sources.len());
        for (file_path, content) in &sources {
            documents.push(parse_source(file_path, content)?);
        }
        let definitions: Vec<&ast::Definition<'_>> = documents
            .iter()
            .flat_map(|document| document.definitions.iter())
            .collect();
        build_from_definitions(&definitions, self.resolvers.as_ref(), &self.known_types)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_source<'src>(
    file_path: &Path,
    content: &'src str,
) -> std::result::Result<ast::Document<'src>, SyntaxError> {
    graphquill_parser::parse(
        content,
        &ParseOptions {
            allow_type_system: true,
            file_path: Some(file_path.to_path_buf()),
        },
    )
}

// =============================================================================
// Top-level build APIs
// =============================================================================

/// Builds a schema from SDL text.
pub fn build_schema(sdl: &str) -> Result<Schema> {
    SchemaBuilder::new().load_from_str(None, sdl)?.build()
}

/// Builds a schema from an already parsed document, with optional
/// resolver injection and known types.
pub fn build_schema_from_document(
    document: &ast::Document<'_>,
    resolvers: Option<&ResolverRegistry>,
    known_types: &[GraphQLType],
) -> Result<Schema> {
    let definitions: Vec<&ast::Definition<'_>> = document.definitions.iter().collect();
    build_from_definitions(&definitions, resolvers, known_types)
}

// =============================================================================
// Pass 1: extraction
// =============================================================================

struct ExtractedDefinitions<'doc, 'src> {
    schema_definition: Option<&'doc ast::SchemaDefinition<'src>>,
    type_definitions: IndexMap<String, &'doc ast::TypeDefinition<'src>>,
    extensions: Vec<&'doc ast::TypeExtension<'src>>,
    directive_definitions: IndexMap<String, &'doc ast::DirectiveDefinition<'src>>,
}

fn extract<'doc, 'src>(
    definitions: &[&'doc ast::Definition<'src>],
) -> Result<ExtractedDefinitions<'doc, 'src>> {
    let mut schema_definition = None;
    let mut type_definitions = IndexMap::new();
    let mut extensions = vec![];
    let mut directive_definitions = IndexMap::new();

    for &definition in definitions {
        match definition {
            ast::Definition::SchemaDefinition(def) => {
                if schema_definition.is_some() {
                    return Err(SchemaBuildError::DuplicateSchemaDefinition);
                }
                schema_definition = Some(def);
            }
            ast::Definition::TypeDefinition(def) => {
                let name = def.name().as_str().to_string();
                if type_definitions.insert(name.clone(), def).is_some() {
                    return Err(SchemaBuildError::DuplicateTypeDefinition { name });
                }
            }
            ast::Definition::TypeExtension(ext) => extensions.push(ext),
            ast::Definition::DirectiveDefinition(def) => {
                let name = def.name.as_str().to_string();
                if directive_definitions.insert(name.clone(), def).is_some() {
                    return Err(SchemaBuildError::DuplicateDirectiveDefinition { name });
                }
            }
            ast::Definition::OperationDefinition(_) | ast::Definition::FragmentDefinition(_) => {
                return Err(SchemaBuildError::ExecutableDefinition);
            }
        }
    }

    Ok(ExtractedDefinitions {
        schema_definition,
        type_definitions,
        extensions,
        directive_definitions,
    })
}

// =============================================================================
// Pass 2: materialization
// =============================================================================

fn build_from_definitions(
    definitions: &[&ast::Definition<'_>],
    resolvers: Option<&ResolverRegistry>,
    known_types: &[GraphQLType],
) -> Result<Schema> {
    let extracted = extract(definitions)?;

    // Registry seeded with the spec scalars and introspection types.
    let mut types: IndexMap<String, GraphQLType> = IndexMap::from([
        ("Boolean".to_string(), GraphQLType::Bool),
        ("Float".to_string(), GraphQLType::Float),
        ("ID".to_string(), GraphQLType::ID),
        ("Int".to_string(), GraphQLType::Int),
        ("String".to_string(), GraphQLType::String),
    ]);
    for introspection_type in introspection::introspection_types() {
        types.insert(introspection_type.name().to_string(), introspection_type);
    }
    for known_type in known_types {
        let name = known_type.name().to_string();
        if types.insert(name.clone(), known_type.clone()).is_some() {
            return Err(SchemaBuildError::DuplicateTypeDefinition { name });
        }
    }

    for (name, definition) in &extracted.type_definitions {
        // A caller-supplied known type shadows its SDL definition.
        if known_types.iter().any(|known| known.name() == name.as_str()) {
            continue;
        }
        if types.contains_key(name.as_str()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition { name: name.clone() });
        }
        let translated = translate_type_definition(definition, resolvers)?;
        types.insert(name.clone(), translated);
    }

    apply_extensions(&mut types, &extracted.extensions)?;
    check_references(&types)?;

    // Directive registry: built-ins first, then custom definitions.
    let mut directive_defs: IndexMap<String, DirectiveDef> = IndexMap::new();
    for builtin in introspection::builtin_directives() {
        directive_defs.insert(builtin.name.clone(), builtin);
    }
    for (name, definition) in &extracted.directive_definitions {
        if directive_defs.contains_key(name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition { name: name.clone() });
        }
        directive_defs.insert(name.clone(), translate_directive_definition(definition));
    }

    let (query_type, mutation_type, subscription_type) =
        operation_types(extracted.schema_definition, &types)?;

    let schema = Schema {
        types,
        directive_defs,
        query_type,
        mutation_type,
        subscription_type,
        meta_fields: introspection::meta_fields(),
    };

    validate_schema(&schema)?;

    tracing::debug!(
        types = schema.types.len(),
        directives = schema.directive_defs.len(),
        "schema built"
    );

    Ok(schema)
}

/// Resolves the operation root references: declared in the schema
/// definition, or defaulting to the capitalized conventional names.
#[allow(clippy::type_complexity)]
fn operation_types(
    schema_definition: Option<&ast::SchemaDefinition<'_>>,
    types: &IndexMap<String, GraphQLType>,
) -> Result<(
    NamedRef<GraphQLType>,
    Option<NamedRef<GraphQLType>>,
    Option<NamedRef<GraphQLType>>,
)> {
    let mut roots: HashMap<ast::OperationKind, NamedRef<GraphQLType>> = HashMap::new();

    match schema_definition {
        Some(definition) => {
            for operation_type in &definition.operation_types {
                let operation = operation_type.operation;
                if roots.contains_key(&operation) {
                    return Err(SchemaBuildError::DuplicateOperationDefinition {
                        operation: operation.keyword().to_string(),
                    });
                }
                let name = operation_type.named_type.name.as_str();
                if !types.contains_key(name) {
                    return Err(SchemaBuildError::UnknownOperationType {
                        operation: operation.keyword().to_string(),
                        name: name.to_string(),
                    });
                }
                roots.insert(
                    operation,
                    NamedRef::new(
                        name,
                        SchemaDefLocation::Document(operation_type.span.clone()),
                    ),
                );
            }
        }
        None => {
            for (operation, default_name) in [
                (ast::OperationKind::Query, "Query"),
                (ast::OperationKind::Mutation, "Mutation"),
                (ast::OperationKind::Subscription, "Subscription"),
            ] {
                if types.contains_key(default_name) {
                    roots.insert(
                        operation,
                        NamedRef::new(default_name, SchemaDefLocation::BuiltIn),
                    );
                }
            }
        }
    }

    let query_type = roots
        .remove(&ast::OperationKind::Query)
        .ok_or(SchemaBuildError::UnknownOperationType {
            operation: "query".to_string(),
            name: "Query".to_string(),
        })?;
    Ok((
        query_type,
        roots.remove(&ast::OperationKind::Mutation),
        roots.remove(&ast::OperationKind::Subscription),
    ))
}

// =============================================================================
// Definition translation
// =============================================================================

fn doc_location(span: &graphquill_parser::SourceSpan) -> SchemaDefLocation {
    SchemaDefLocation::Document(span.clone())
}

fn description_of(description: &Option<ast::StringValue<'_>>) -> Option<String> {
    description.as_ref().map(|s| s.value.to_string())
}

/// Extracts `@deprecated(reason:)` from a directive list.
fn deprecation_of(directives: &[ast::DirectiveAnnotation<'_>]) -> DeprecationState {
    for directive in directives {
        if directive.name.as_str() == "deprecated" {
            let reason = directive.argument("reason").and_then(|argument| {
                match &argument.value {
                    ast::Value::String(s) => Some(s.value.to_string()),
                    _ => None,
                }
            });
            return DeprecationState::Deprecated(reason);
        }
    }
    DeprecationState::NotDeprecated
}

fn translate_type_definition(
    definition: &ast::TypeDefinition<'_>,
    resolvers: Option<&ResolverRegistry>,
) -> Result<GraphQLType> {
    Ok(match definition {
        ast::TypeDefinition::Scalar(def) => GraphQLType::Scalar(Box::new(ScalarType {
            name: def.name.as_str().to_string(),
            description: description_of(&def.description),
            def_location: doc_location(&def.span),
        })),
        ast::TypeDefinition::Object(def) => {
            let type_name = def.name.as_str();
            GraphQLType::Object(Box::new(ObjectType {
                name: type_name.to_string(),
                description: description_of(&def.description),
                fields: translate_fields(type_name, &def.fields, resolvers)?,
                interfaces: def
                    .interfaces
                    .iter()
                    .map(|interface| {
                        NamedRef::new(interface.name.as_str(), doc_location(&interface.span))
                    })
                    .collect(),
                def_location: doc_location(&def.span),
            }))
        }
        ast::TypeDefinition::Interface(def) => GraphQLType::Interface(Box::new(InterfaceType {
            name: def.name.as_str().to_string(),
            description: description_of(&def.description),
            fields: translate_fields(def.name.as_str(), &def.fields, None)?,
            def_location: doc_location(&def.span),
        })),
        ast::TypeDefinition::Union(def) => GraphQLType::Union(Box::new(UnionType {
            name: def.name.as_str().to_string(),
            description: description_of(&def.description),
            members: def
                .members
                .iter()
                .map(|member| NamedRef::new(member.name.as_str(), doc_location(&member.span)))
                .collect(),
            def_location: doc_location(&def.span),
        })),
        ast::TypeDefinition::Enum(def) => GraphQLType::Enum(Box::new(EnumType {
            name: def.name.as_str().to_string(),
            description: description_of(&def.description),
            variants: translate_enum_values(def.name.as_str(), &def.values)?,
            def_location: doc_location(&def.span),
        })),
        ast::TypeDefinition::InputObject(def) => {
            GraphQLType::InputObject(Box::new(InputObjectType {
                name: def.name.as_str().to_string(),
                description: description_of(&def.description),
                fields: translate_input_values(def.name.as_str(), &def.fields)?,
                def_location: doc_location(&def.span),
            }))
        }
    })
}

fn translate_fields(
    type_name: &str,
    field_definitions: &[ast::FieldDefinition<'_>],
    resolvers: Option<&ResolverRegistry>,
) -> Result<IndexMap<String, Field>> {
    let mut fields = IndexMap::new();
    for definition in field_definitions {
        let field_name = definition.name.as_str();
        let field = Field {
            name: field_name.to_string(),
            description: description_of(&definition.description),
            type_annotation: TypeAnnotation::from_ast(&definition.field_type),
            parameters: translate_input_values(type_name, &definition.arguments)?,
            deprecation: deprecation_of(&definition.directives),
            resolver: resolvers.and_then(|registry| registry.lookup(type_name, field_name)),
            def_location: doc_location(&definition.span),
        };
        if fields.insert(field_name.to_string(), field).is_some() {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
            });
        }
    }
    Ok(fields)
}

fn translate_input_values(
    owner_name: &str,
    definitions: &[ast::InputValueDefinition<'_>],
) -> Result<IndexMap<String, InputValueDef>> {
    let mut values = IndexMap::new();
    for definition in definitions {
        let name = definition.name.as_str();
        let input_value = InputValueDef {
            name: name.to_string(),
            description: description_of(&definition.description),
            value_type: TypeAnnotation::from_ast(&definition.value_type),
            default_value: definition.default_value.as_ref().map(ast_const_to_json),
            def_location: doc_location(&definition.span),
        };
        if values.insert(name.to_string(), input_value).is_some() {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                type_name: owner_name.to_string(),
                field_name: name.to_string(),
            });
        }
    }
    Ok(values)
}

fn translate_enum_values(
    type_name: &str,
    definitions: &[ast::EnumValueDefinition<'_>],
) -> Result<IndexMap<String, EnumVariant>> {
    let mut variants = IndexMap::new();
    for definition in definitions {
        let name = definition.name.as_str();
        let variant = EnumVariant {
            name: name.to_string(),
            description: description_of(&definition.description),
            value: JsonValue::String(name.to_string()),
            deprecation: deprecation_of(&definition.directives),
            def_location: doc_location(&definition.span),
        };
        if variants.insert(name.to_string(), variant).is_some() {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                type_name: type_name.to_string(),
                field_name: name.to_string(),
            });
        }
    }
    Ok(variants)
}

fn translate_directive_definition(definition: &ast::DirectiveDefinition<'_>) -> DirectiveDef {
    DirectiveDef {
        name: definition.name.as_str().to_string(),
        description: description_of(&definition.description),
        locations: definition.locations.clone(),
        arguments: translate_input_values(definition.name.as_str(), &definition.arguments)
            .unwrap_or_default(),
        def_location: doc_location(&definition.span),
    }
}

// =============================================================================
// Extensions
// =============================================================================

fn apply_extensions(
    types: &mut IndexMap<String, GraphQLType>,
    extensions: &[&ast::TypeExtension<'_>],
) -> Result<()> {
    for extension in extensions {
        let name = extension.name().as_str();

        // Scalar extensions are rejected outright rather than silently
        // ignored.
        if let ast::TypeExtension::Scalar(_) = extension {
            return Err(SchemaBuildError::ScalarExtensionUnsupported {
                name: name.to_string(),
            });
        }

        let Some(base) = types.get_mut(name) else {
            return Err(SchemaBuildError::ExtendUndefinedType {
                name: name.to_string(),
            });
        };

        let mismatch = |base_kind: &str| SchemaBuildError::ExtensionKindMismatch {
            name: name.to_string(),
            base_kind: base_kind.to_string(),
            extension_kind: extension.kind_keyword().to_string(),
        };

        match (extension, base) {
            (ast::TypeExtension::Object(ext), GraphQLType::Object(object_type)) => {
                let extra_fields = translate_fields(name, &ext.fields, None)?;
                for (field_name, field) in extra_fields {
                    if object_type.fields.insert(field_name.clone(), field).is_some() {
                        return Err(SchemaBuildError::DuplicateFieldDefinition {
                            type_name: name.to_string(),
                            field_name,
                        });
                    }
                }
                for interface in &ext.interfaces {
                    object_type.interfaces.push(NamedRef::new(
                        interface.name.as_str(),
                        doc_location(&interface.span),
                    ));
                }
            }
            (ast::TypeExtension::Interface(ext), GraphQLType::Interface(interface_type)) => {
                let extra_fields = translate_fields(name, &ext.fields, None)?;
                for (field_name, field) in extra_fields {
                    if interface_type
                        .fields
                        .insert(field_name.clone(), field)
                        .is_some()
                    {
                        return Err(SchemaBuildError::DuplicateFieldDefinition {
                            type_name: name.to_string(),
                            field_name,
                        });
                    }
                }
            }
            (ast::TypeExtension::Union(ext), GraphQLType::Union(union_type)) => {
                for member in &ext.members {
                    union_type.members.push(NamedRef::new(
                        member.name.as_str(),
                        doc_location(&member.span),
                    ));
                }
            }
            // Only enum extension nodes extend enums; any other extension
            // kind on an enum base is a mismatch.
            (ast::TypeExtension::Enum(ext), GraphQLType::Enum(enum_type)) => {
                let extra_variants = translate_enum_values(name, &ext.values)?;
                for (variant_name, variant) in extra_variants {
                    if enum_type
                        .variants
                        .insert(variant_name.clone(), variant)
                        .is_some()
                    {
                        return Err(SchemaBuildError::DuplicateFieldDefinition {
                            type_name: name.to_string(),
                            field_name: variant_name,
                        });
                    }
                }
            }
            (ast::TypeExtension::InputObject(ext), GraphQLType::InputObject(input_object)) => {
                let extra_fields = translate_input_values(name, &ext.fields)?;
                for (field_name, field) in extra_fields {
                    if input_object
                        .fields
                        .insert(field_name.clone(), field)
                        .is_some()
                    {
                        return Err(SchemaBuildError::DuplicateFieldDefinition {
                            type_name: name.to_string(),
                            field_name,
                        });
                    }
                }
            }
            (_, base) => {
                let base_kind = match base {
                    GraphQLType::Object(_) => "type",
                    GraphQLType::Interface(_) => "interface",
                    GraphQLType::Union(_) => "union",
                    GraphQLType::Enum(_) => "enum",
                    GraphQLType::InputObject(_) => "input",
                    _ => "scalar",
                };
                return Err(mismatch(base_kind));
            }
        }
    }
    Ok(())
}

// =============================================================================
// Reference checking
// =============================================================================

/// Every name referenced by a built type must be registered.
fn check_references(types: &IndexMap<String, GraphQLType>) -> Result<()> {
    let check_name = |name: &str| -> Result<()> {
        if types.contains_key(name) {
            Ok(())
        } else {
            Err(SchemaBuildError::UnknownType {
                name: name.to_string(),
            })
        }
    };
    let check_annotation =
        |annotation: &TypeAnnotation| check_name(annotation.innermost_named().type_ref.name());

    for graphql_type in types.values() {
        match graphql_type {
            GraphQLType::Object(object_type) => {
                for interface in &object_type.interfaces {
                    check_name(interface.name())?;
                }
                for field in object_type.fields.values() {
                    check_annotation(&field.type_annotation)?;
                    for param in field.parameters.values() {
                        check_annotation(&param.value_type)?;
                    }
                }
            }
            GraphQLType::Interface(interface_type) => {
                for field in interface_type.fields.values() {
                    check_annotation(&field.type_annotation)?;
                    for param in field.parameters.values() {
                        check_annotation(&param.value_type)?;
                    }
                }
            }
            GraphQLType::Union(union_type) => {
                for member in &union_type.members {
                    check_name(member.name())?;
                }
            }
            GraphQLType::InputObject(input_object) => {
                for field in input_object.fields.values() {
                    check_annotation(&field.value_type)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
