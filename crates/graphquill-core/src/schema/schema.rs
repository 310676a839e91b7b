use crate::named_ref::NamedRef;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::DirectiveDef;
use crate::types::InputValueDef;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use graphquill_parser::ast::OperationKind;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// The synthetic meta fields the engine resolves on every schema:
/// `__schema` and `__type` on the query root, `__typename` on any
/// composite type.
#[derive(Clone, Debug, PartialEq)]
pub struct MetaFields {
    pub schema_field: Field,
    pub type_field: Field,
    pub typename_field: Field,
}

/// A fully built and validated GraphQL schema, frozen after construction.
///
/// Holds the type registry (the five spec scalars, the introspection
/// types, and every SDL- or programmatically-defined type, keyed by
/// unique name), the directive registry (built-ins `@skip`, `@include`,
/// `@deprecated` plus custom declarations), and the operation root
/// references.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) types: IndexMap<String, GraphQLType>,
    pub(crate) directive_defs: IndexMap<String, DirectiveDef>,
    pub(crate) query_type: NamedRef<GraphQLType>,
    pub(crate) mutation_type: Option<NamedRef<GraphQLType>>,
    pub(crate) subscription_type: Option<NamedRef<GraphQLType>>,
    pub(crate) meta_fields: MetaFields,
}

impl Schema {
    /// The full type registry, built-ins included.
    pub fn types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    /// Looks up a type by name.
    pub fn type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// The full directive registry, built-ins included.
    pub fn directives(&self) -> &IndexMap<String, DirectiveDef> {
        &self.directive_defs
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directive_defs.get(name)
    }

    /// This schema's Query root operation type.
    ///
    /// Prefer this over looking up a type named `"Query"`: a schema
    /// definition block can route operations to differently-named types.
    pub fn query_type(&self) -> &GraphQLType {
        self.query_type
            .deref(self)
            .expect("query type is present in schema")
    }

    /// This schema's Mutation root operation type, if one was defined.
    pub fn mutation_type(&self) -> Option<&GraphQLType> {
        self.mutation_type.as_ref().map(|named_ref| {
            named_ref
                .deref(self)
                .expect("mutation type is present in schema")
        })
    }

    /// This schema's Subscription root operation type, if one was defined.
    pub fn subscription_type(&self) -> Option<&GraphQLType> {
        self.subscription_type.as_ref().map(|named_ref| {
            named_ref
                .deref(self)
                .expect("subscription type is present in schema")
        })
    }

    /// The root type for an operation kind.
    pub fn operation_root(&self, kind: OperationKind) -> Option<&GraphQLType> {
        match kind {
            OperationKind::Query => Some(self.query_type()),
            OperationKind::Mutation => self.mutation_type(),
            OperationKind::Subscription => self.subscription_type(),
        }
    }

    /// The engine-resolved meta fields.
    pub fn meta_fields(&self) -> &MetaFields {
        &self.meta_fields
    }

    // =========================================================================
    // Abstract type relationships
    // =========================================================================

    /// The concrete object types an abstract type can resolve to: union
    /// members, or every object type implementing an interface. Empty for
    /// non-abstract types.
    pub fn possible_types(&self, abstract_type: &GraphQLType) -> Vec<&ObjectType> {
        match abstract_type {
            GraphQLType::Union(union_type) => union_type
                .members
                .iter()
                .filter_map(|member| member.deref(self).ok())
                .filter_map(GraphQLType::as_object)
                .collect(),
            GraphQLType::Interface(interface_type) => self
                .types
                .values()
                .filter_map(GraphQLType::as_object)
                .filter(|object| object.implements(&interface_type.name))
                .collect(),
            _ => vec![],
        }
    }

    /// True when `sub` (an object type) is a valid runtime type for the
    /// abstract type `sup`: a member of the union, or an implementer of
    /// the interface.
    pub fn is_possible_subtype(&self, sub: &GraphQLType, sup: &GraphQLType) -> bool {
        match (sub, sup) {
            (GraphQLType::Object(object), GraphQLType::Union(union_type)) => {
                union_type.has_member(&object.name)
            }
            (GraphQLType::Object(object), GraphQLType::Interface(interface_type)) => {
                object.implements(&interface_type.name)
            }
            _ => false,
        }
    }

    /// True when the two composite types can ever describe the same
    /// concrete object: equal types, one possible within the other, or
    /// overlapping possible-type sets.
    pub fn types_overlap(&self, a: &GraphQLType, b: &GraphQLType) -> bool {
        if a.name() == b.name() {
            return true;
        }
        match (a.is_abstract(), b.is_abstract()) {
            (true, true) => {
                let b_possible: Vec<&str> = self
                    .possible_types(b)
                    .iter()
                    .map(|object| object.name.as_str())
                    .collect();
                self.possible_types(a)
                    .iter()
                    .any(|object| b_possible.contains(&object.name.as_str()))
            }
            (true, false) => self.is_possible_subtype(b, a),
            (false, true) => self.is_possible_subtype(a, b),
            (false, false) => false,
        }
    }

    // =========================================================================
    // SDL printing
    // =========================================================================

    /// Prints this schema as SDL.
    ///
    /// Built-in scalars, introspection types, and built-in directives are
    /// omitted; everything else prints in registry order. Building a
    /// schema from the printed output yields an identical SDL rendering.
    pub fn to_sdl(&self) -> String {
        let mut blocks: Vec<String> = vec![];

        if self.needs_schema_block() {
            let mut block = String::from("schema {\n");
            block.push_str(&format!("  query: {}\n", self.query_type.name()));
            if let Some(mutation) = &self.mutation_type {
                block.push_str(&format!("  mutation: {}\n", mutation.name()));
            }
            if let Some(subscription) = &self.subscription_type {
                block.push_str(&format!("  subscription: {}\n", subscription.name()));
            }
            block.push('}');
            blocks.push(block);
        }

        for directive in self.directive_defs.values() {
            if !directive.is_builtin() {
                blocks.push(self.print_directive_def(directive));
            }
        }

        for graphql_type in self.types.values() {
            if !graphql_type.is_builtin() {
                blocks.push(self.print_type(graphql_type));
            }
        }

        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    /// A `schema { ... }` block is only needed when the roots deviate from
    /// the default names.
    fn needs_schema_block(&self) -> bool {
        self.query_type.name() != "Query"
            || self
                .mutation_type
                .as_ref()
                .is_some_and(|m| m.name() != "Mutation")
            || self
                .subscription_type
                .as_ref()
                .is_some_and(|s| s.name() != "Subscription")
    }

    fn print_type(&self, graphql_type: &GraphQLType) -> String {
        let mut out = String::new();
        print_description(&mut out, graphql_type.description(), 0);
        match graphql_type {
            GraphQLType::Scalar(scalar) => {
                out.push_str(&format!("scalar {}", scalar.name));
            }
            GraphQLType::Object(object) => {
                out.push_str(&format!("type {}", object.name));
                if !object.interfaces.is_empty() {
                    let names: Vec<&str> =
                        object.interfaces.iter().map(|i| i.name()).collect();
                    out.push_str(&format!(" implements {}", names.join(" & ")));
                }
                self.print_field_block(&mut out, &object.fields);
            }
            GraphQLType::Interface(interface) => {
                out.push_str(&format!("interface {}", interface.name));
                self.print_field_block(&mut out, &interface.fields);
            }
            GraphQLType::Union(union_type) => {
                let names: Vec<&str> =
                    union_type.members.iter().map(|m| m.name()).collect();
                out.push_str(&format!("union {} = {}", union_type.name, names.join(" | ")));
            }
            GraphQLType::Enum(enum_type) => {
                out.push_str(&format!("enum {} {{\n", enum_type.name));
                for variant in enum_type.variants.values() {
                    print_description(&mut out, variant.description.as_deref(), 1);
                    out.push_str(&format!("  {}", variant.name));
                    print_deprecated(&mut out, variant.deprecation.reason(),
                        variant.deprecation.is_deprecated());
                    out.push('\n');
                }
                out.push('}');
            }
            GraphQLType::InputObject(input_object) => {
                out.push_str(&format!("input {} {{\n", input_object.name));
                for field in input_object.fields.values() {
                    print_description(&mut out, field.description.as_deref(), 1);
                    out.push_str(&format!("  {}\n", self.print_input_value(field)));
                }
                out.push('}');
            }
            builtin => out.push_str(&format!("scalar {}", builtin.name())),
        }
        out
    }

    fn print_field_block(&self, out: &mut String, fields: &IndexMap<String, Field>) {
        out.push_str(" {\n");
        for field in fields.values() {
            print_description(out, field.description.as_deref(), 1);
            out.push_str(&format!("  {}", field.name));
            if !field.parameters.is_empty() {
                let rendered: Vec<String> = field
                    .parameters
                    .values()
                    .map(|param| self.print_input_value(param))
                    .collect();
                out.push_str(&format!("({})", rendered.join(", ")));
            }
            out.push_str(&format!(": {}", field.type_annotation));
            print_deprecated(out, field.deprecation.reason(), field.deprecation.is_deprecated());
            out.push('\n');
        }
        out.push('}');
    }

    fn print_input_value(&self, input_value: &InputValueDef) -> String {
        let mut out = format!("{}: {}", input_value.name, input_value.value_type);
        if let Some(default_value) = &input_value.default_value {
            out.push_str(&format!(
                " = {}",
                self.print_literal(default_value, &input_value.value_type)
            ));
        }
        out
    }

    fn print_directive_def(&self, directive: &DirectiveDef) -> String {
        let mut out = String::new();
        print_description(&mut out, directive.description.as_deref(), 0);
        out.push_str(&format!("directive @{}", directive.name));
        if !directive.arguments.is_empty() {
            let rendered: Vec<String> = directive
                .arguments
                .values()
                .map(|argument| self.print_input_value(argument))
                .collect();
            out.push_str(&format!("({})", rendered.join(", ")));
        }
        let locations: Vec<&str> = directive
            .locations
            .iter()
            .map(|location| location.keyword())
            .collect();
        out.push_str(&format!(" on {}", locations.join(" | ")));
        out
    }

    /// Prints a stored (untyped JSON) literal in GraphQL syntax, using the
    /// declared type to decide whether strings are enum names or string
    /// literals.
    pub(crate) fn print_literal(&self, value: &JsonValue, annotation: &TypeAnnotation) -> String {
        match value {
            JsonValue::Null => "null".to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::String(s) => {
                let is_enum = annotation
                    .innermost_type(self)
                    .is_some_and(|t| t.as_enum().is_some());
                if is_enum {
                    s.clone()
                } else {
                    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
                }
            }
            JsonValue::Array(items) => {
                let item_annotation = match annotation {
                    TypeAnnotation::List(list) => list.item.clone(),
                    named => named.clone(),
                };
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| self.print_literal(item, &item_annotation))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            JsonValue::Object(entries) => {
                let input_object = annotation
                    .innermost_type(self)
                    .and_then(GraphQLType::as_input_object);
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(key, entry_value)| {
                        let entry_annotation = input_object
                            .and_then(|io| io.field(key))
                            .map(|f| f.value_type.clone())
                            .unwrap_or_else(|| TypeAnnotation::named("String"));
                        format!("{key}: {}", self.print_literal(entry_value, &entry_annotation))
                    })
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
        }
    }
}

fn print_description(out: &mut String, description: Option<&str>, indent: usize) {
    let Some(description) = description else {
        return;
    };
    let pad = "  ".repeat(indent);
    if description.contains('\n') {
        out.push_str(&format!("{pad}\"\"\"\n"));
        for line in description.lines() {
            out.push_str(&format!("{pad}{line}\n"));
        }
        out.push_str(&format!("{pad}\"\"\"\n"));
    } else {
        let escaped = description.replace('\\', "\\\\").replace('"', "\\\"");
        out.push_str(&format!("{pad}\"{escaped}\"\n"));
    }
}

fn print_deprecated(out: &mut String, reason: Option<&str>, is_deprecated: bool) {
    if !is_deprecated {
        return;
    }
    match reason {
        Some(reason) => {
            let escaped = reason.replace('\\', "\\\\").replace('"', "\\\"");
            out.push_str(&format!(" @deprecated(reason: \"{escaped}\")"));
        }
        None => out.push_str(" @deprecated"),
    }
}
