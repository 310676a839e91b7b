//! Serialized node format: recursively converts AST nodes to
//! `{"__kind__": "<NodeKind>", <attr>: <value>, ...}` JSON objects.
//!
//! Spans and source labels are omitted, which makes the serialized form
//! stable under parse/print round-trips and suitable for
//! cross-implementation AST comparison.

use crate::ast::*;
use serde_json::json;
use serde_json::Value as JsonValue;

fn opt<T>(value: &Option<T>, f: impl Fn(&T) -> JsonValue) -> JsonValue {
    match value {
        Some(inner) => f(inner),
        None => JsonValue::Null,
    }
}

fn list<T>(values: &[T], f: impl Fn(&T) -> JsonValue) -> JsonValue {
    JsonValue::Array(values.iter().map(f).collect())
}

impl Document<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "Document",
            "definitions": list(&self.definitions, Definition::to_json),
        })
    }
}

impl Definition<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Definition::OperationDefinition(def) => def.to_json(),
            Definition::FragmentDefinition(def) => def.to_json(),
            Definition::SchemaDefinition(def) => def.to_json(),
            Definition::TypeDefinition(def) => def.to_json(),
            Definition::TypeExtension(ext) => ext.to_json(),
            Definition::DirectiveDefinition(def) => def.to_json(),
        }
    }
}

impl Name<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({ "__kind__": "Name", "value": self.value })
    }
}

// =========================================================
// Executable definitions
// =========================================================

impl OperationDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "OperationDefinition",
            "operation": self.operation.keyword(),
            "name": opt(&self.name, Name::to_json),
            "variable_definitions": list(&self.variable_definitions, VariableDefinition::to_json),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
            "selection_set": self.selection_set.to_json(),
        })
    }
}

impl FragmentDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "FragmentDefinition",
            "name": self.name.to_json(),
            "type_condition": self.type_condition.named_type.to_json(),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
            "selection_set": self.selection_set.to_json(),
        })
    }
}

impl VariableDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "VariableDefinition",
            "variable": json!({ "__kind__": "Variable", "name": self.variable.to_json() }),
            "type": self.var_type.to_json(),
            "default_value": opt(&self.default_value, Value::to_json),
        })
    }
}

impl SelectionSet<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "SelectionSet",
            "selections": list(&self.selections, Selection::to_json),
        })
    }
}

impl Selection<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Selection::Field(field) => field.to_json(),
            Selection::FragmentSpread(spread) => spread.to_json(),
            Selection::InlineFragment(inline) => inline.to_json(),
        }
    }
}

impl Field<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "Field",
            "alias": opt(&self.alias, Name::to_json),
            "name": self.name.to_json(),
            "arguments": list(&self.arguments, Argument::to_json),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
            "selection_set": opt(&self.selection_set, SelectionSet::to_json),
        })
    }
}

impl FragmentSpread<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "FragmentSpread",
            "name": self.name.to_json(),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
        })
    }
}

impl InlineFragment<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "InlineFragment",
            "type_condition": opt(&self.type_condition, |tc| tc.named_type.to_json()),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
            "selection_set": self.selection_set.to_json(),
        })
    }
}

// =========================================================
// Directives & arguments
// =========================================================

impl DirectiveAnnotation<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "Directive",
            "name": self.name.to_json(),
            "arguments": list(&self.arguments, Argument::to_json),
        })
    }
}

impl Argument<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "Argument",
            "name": self.name.to_json(),
            "value": self.value.to_json(),
        })
    }
}

// =========================================================
// Type annotations
// =========================================================

impl TypeAnnotation<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypeAnnotation::Named(named) => named.to_json(),
            TypeAnnotation::List(inner) => json!({
                "__kind__": "ListType",
                "type": inner.item.to_json(),
            }),
            TypeAnnotation::NonNull(inner) => json!({
                "__kind__": "NonNullType",
                "type": inner.inner.to_json(),
            }),
        }
    }
}

impl NamedTypeAnnotation<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({ "__kind__": "NamedType", "name": self.name.to_json() })
    }
}

// =========================================================
// Values
// =========================================================

impl Value<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Int(v) => json!({ "__kind__": "IntValue", "value": v.raw }),
            Value::Float(v) => json!({ "__kind__": "FloatValue", "value": v.raw }),
            Value::String(v) => json!({
                "__kind__": "StringValue",
                "value": v.value,
                "block": v.block,
            }),
            Value::Boolean(v) => json!({ "__kind__": "BooleanValue", "value": v.value }),
            Value::Null(_) => json!({ "__kind__": "NullValue" }),
            Value::Enum(v) => json!({ "__kind__": "EnumValue", "value": v.value }),
            Value::List(v) => json!({
                "__kind__": "ListValue",
                "values": list(&v.values, Value::to_json),
            }),
            Value::Object(v) => json!({
                "__kind__": "ObjectValue",
                "fields": list(&v.fields, ObjectField::to_json),
            }),
            Value::Variable(v) => json!({ "__kind__": "Variable", "name": v.name.to_json() }),
        }
    }
}

impl ObjectField<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "ObjectField",
            "name": self.name.to_json(),
            "value": self.value.to_json(),
        })
    }
}

// =========================================================
// Type-system definitions
// =========================================================

fn description_json(description: &Option<StringValue<'_>>) -> JsonValue {
    opt(description, |s| {
        json!({ "__kind__": "StringValue", "value": s.value, "block": s.block })
    })
}

impl SchemaDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "SchemaDefinition",
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
            "operation_types": list(&self.operation_types, RootOperationTypeDefinition::to_json),
        })
    }
}

impl RootOperationTypeDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "OperationTypeDefinition",
            "operation": self.operation.keyword(),
            "type": self.named_type.to_json(),
        })
    }
}

impl TypeDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypeDefinition::Scalar(def) => json!({
                "__kind__": "ScalarTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
            }),
            TypeDefinition::Object(def) => json!({
                "__kind__": "ObjectTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "interfaces": list(&def.interfaces, NamedTypeAnnotation::to_json),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
                "fields": list(&def.fields, FieldDefinition::to_json),
            }),
            TypeDefinition::Interface(def) => json!({
                "__kind__": "InterfaceTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
                "fields": list(&def.fields, FieldDefinition::to_json),
            }),
            TypeDefinition::Union(def) => json!({
                "__kind__": "UnionTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
                "types": list(&def.members, NamedTypeAnnotation::to_json),
            }),
            TypeDefinition::Enum(def) => json!({
                "__kind__": "EnumTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
                "values": list(&def.values, EnumValueDefinition::to_json),
            }),
            TypeDefinition::InputObject(def) => json!({
                "__kind__": "InputObjectTypeDefinition",
                "description": description_json(&def.description),
                "name": def.name.to_json(),
                "directives": list(&def.directives, DirectiveAnnotation::to_json),
                "fields": list(&def.fields, InputValueDefinition::to_json),
            }),
        }
    }
}

impl FieldDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "FieldDefinition",
            "description": description_json(&self.description),
            "name": self.name.to_json(),
            "arguments": list(&self.arguments, InputValueDefinition::to_json),
            "type": self.field_type.to_json(),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
        })
    }
}

impl InputValueDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "InputValueDefinition",
            "description": description_json(&self.description),
            "name": self.name.to_json(),
            "type": self.value_type.to_json(),
            "default_value": opt(&self.default_value, Value::to_json),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
        })
    }
}

impl EnumValueDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "EnumValueDefinition",
            "description": description_json(&self.description),
            "name": self.name.to_json(),
            "directives": list(&self.directives, DirectiveAnnotation::to_json),
        })
    }
}

impl TypeExtension<'_> {
    pub fn to_json(&self) -> JsonValue {
        match self {
            TypeExtension::Scalar(ext) => json!({
                "__kind__": "ScalarTypeExtension",
                "name": ext.name.to_json(),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
            }),
            TypeExtension::Object(ext) => json!({
                "__kind__": "ObjectTypeExtension",
                "name": ext.name.to_json(),
                "interfaces": list(&ext.interfaces, NamedTypeAnnotation::to_json),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
                "fields": list(&ext.fields, FieldDefinition::to_json),
            }),
            TypeExtension::Interface(ext) => json!({
                "__kind__": "InterfaceTypeExtension",
                "name": ext.name.to_json(),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
                "fields": list(&ext.fields, FieldDefinition::to_json),
            }),
            TypeExtension::Union(ext) => json!({
                "__kind__": "UnionTypeExtension",
                "name": ext.name.to_json(),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
                "types": list(&ext.members, NamedTypeAnnotation::to_json),
            }),
            TypeExtension::Enum(ext) => json!({
                "__kind__": "EnumTypeExtension",
                "name": ext.name.to_json(),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
                "values": list(&ext.values, EnumValueDefinition::to_json),
            }),
            TypeExtension::InputObject(ext) => json!({
                "__kind__": "InputObjectTypeExtension",
                "name": ext.name.to_json(),
                "directives": list(&ext.directives, DirectiveAnnotation::to_json),
                "fields": list(&ext.fields, InputValueDefinition::to_json),
            }),
        }
    }
}

impl DirectiveDefinition<'_> {
    pub fn to_json(&self) -> JsonValue {
        json!({
            "__kind__": "DirectiveDefinition",
            "description": description_json(&self.description),
            "name": self.name.to_json(),
            "arguments": list(&self.arguments, InputValueDefinition::to_json),
            "locations": JsonValue::Array(
                self.locations
                    .iter()
                    .map(|location| JsonValue::String(location.keyword().to_string()))
                    .collect(),
            ),
        })
    }
}
