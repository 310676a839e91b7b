//! Canonical printer for GraphQL AST nodes.
//!
//! Printing is the inverse of parsing up to formatting: for any document
//! `D`, `parse(print(D))` is structurally identical to `D` (spans
//! excluded). Output uses 2-space indentation and one blank line between
//! top-level definitions.

use crate::ast;

/// Prints a full document.
pub fn print_document(document: &ast::Document<'_>) -> String {
    let blocks: Vec<String> = document
        .definitions
        .iter()
        .map(print_definition)
        .collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn print_definition(definition: &ast::Definition<'_>) -> String {
    match definition {
        ast::Definition::OperationDefinition(def) => print_operation(def),
        ast::Definition::FragmentDefinition(def) => print_fragment(def),
        ast::Definition::SchemaDefinition(def) => print_schema_definition(def),
        ast::Definition::TypeDefinition(def) => print_type_definition(def),
        ast::Definition::TypeExtension(ext) => print_type_extension(ext),
        ast::Definition::DirectiveDefinition(def) => print_directive_definition(def),
    }
}

// =============================================================================
// Executable definitions
// =============================================================================

fn print_operation(def: &ast::OperationDefinition<'_>) -> String {
    // The shorthand form is only valid for an anonymous query with no
    // variable definitions or directives.
    let shorthand = def.operation == ast::OperationKind::Query
        && def.name.is_none()
        && def.variable_definitions.is_empty()
        && def.directives.is_empty();
    if shorthand {
        return print_selection_set(&def.selection_set, 0);
    }

    let mut out = def.operation.keyword().to_string();
    if let Some(name) = &def.name {
        out.push(' ');
        out.push_str(name.as_str());
    }
    if !def.variable_definitions.is_empty() {
        let rendered: Vec<String> = def
            .variable_definitions
            .iter()
            .map(print_variable_definition)
            .collect();
        out.push_str(&format!("({})", rendered.join(", ")));
    }
    out.push_str(&print_directives_inline(&def.directives));
    out.push(' ');
    out.push_str(&print_selection_set(&def.selection_set, 0));
    out
}

fn print_variable_definition(def: &ast::VariableDefinition<'_>) -> String {
    let mut out = format!("${}: {}", def.variable, def.var_type);
    if let Some(default_value) = &def.default_value {
        out.push_str(&format!(" = {}", print_value(default_value)));
    }
    out
}

fn print_fragment(def: &ast::FragmentDefinition<'_>) -> String {
    format!(
        "fragment {} on {}{} {}",
        def.name,
        def.type_condition.named_type.name,
        print_directives_inline(&def.directives),
        print_selection_set(&def.selection_set, 0),
    )
}

fn print_selection_set(selection_set: &ast::SelectionSet<'_>, indent: usize) -> String {
    let pad = "  ".repeat(indent + 1);
    let mut out = "{\n".to_string();
    for selection in &selection_set.selections {
        out.push_str(&pad);
        out.push_str(&print_selection(selection, indent + 1));
        out.push('\n');
    }
    out.push_str(&"  ".repeat(indent));
    out.push('}');
    out
}

fn print_selection(selection: &ast::Selection<'_>, indent: usize) -> String {
    match selection {
        ast::Selection::Field(field) => {
            let mut out = String::new();
            if let Some(alias) = &field.alias {
                out.push_str(&format!("{alias}: "));
            }
            out.push_str(field.name.as_str());
            out.push_str(&print_arguments(&field.arguments));
            out.push_str(&print_directives_inline(&field.directives));
            if let Some(selection_set) = &field.selection_set {
                out.push(' ');
                out.push_str(&print_selection_set(selection_set, indent));
            }
            out
        }
        ast::Selection::FragmentSpread(spread) => format!(
            "...{}{}",
            spread.name,
            print_directives_inline(&spread.directives)
        ),
        ast::Selection::InlineFragment(inline) => {
            let mut out = "...".to_string();
            if let Some(type_condition) = &inline.type_condition {
                out.push_str(&format!(" on {}", type_condition.named_type.name));
            }
            out.push_str(&print_directives_inline(&inline.directives));
            out.push(' ');
            out.push_str(&print_selection_set(&inline.selection_set, indent));
            out
        }
    }
}

fn print_arguments(arguments: &[ast::Argument<'_>]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = arguments
        .iter()
        .map(|arg| format!("{}: {}", arg.name, print_value(&arg.value)))
        .collect();
    format!("({})", rendered.join(", "))
}

fn print_directives_inline(directives: &[ast::DirectiveAnnotation<'_>]) -> String {
    directives
        .iter()
        .map(|directive| {
            format!(
                " @{}{}",
                directive.name,
                print_arguments(&directive.arguments)
            )
        })
        .collect()
}

// =============================================================================
// Values
// =============================================================================

/// Prints a value literal.
pub fn print_value(value: &ast::Value<'_>) -> String {
    match value {
        ast::Value::Int(v) => v.raw.to_string(),
        ast::Value::Float(v) => v.raw.to_string(),
        ast::Value::String(v) => {
            if v.block {
                print_block_string(&v.value, "")
            } else {
                print_quoted_string(&v.value)
            }
        }
        ast::Value::Boolean(v) => v.value.to_string(),
        ast::Value::Null(_) => "null".to_string(),
        ast::Value::Enum(v) => v.value.to_string(),
        ast::Value::List(v) => {
            let rendered: Vec<String> = v.values.iter().map(print_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        ast::Value::Object(v) => {
            let rendered: Vec<String> = v
                .fields
                .iter()
                .map(|field| format!("{}: {}", field.name, print_value(&field.value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        ast::Value::Variable(v) => format!("${}", v.name),
    }
}

fn print_quoted_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Prints a block string such that re-parsing (and re-trimming) the output
/// yields the original value.
fn print_block_string(value: &str, indentation: &str) -> String {
    let escaped = value.replace("\"\"\"", "\\\"\"\"");
    let is_single_line = !escaped.contains('\n');
    let has_leading_space = escaped.starts_with(' ') || escaped.starts_with('\t');
    let has_trailing_quote = escaped.ends_with('"');
    let multi_line_form = !is_single_line || has_trailing_quote;

    let mut out = String::from("\"\"\"");
    if multi_line_form && !(is_single_line && has_leading_space) {
        out.push('\n');
        out.push_str(indentation);
    }
    if indentation.is_empty() {
        out.push_str(&escaped);
    } else {
        out.push_str(&escaped.replace('\n', &format!("\n{indentation}")));
    }
    if multi_line_form {
        out.push('\n');
        out.push_str(indentation);
    }
    out.push_str("\"\"\"");
    out
}

// =============================================================================
// Type-system definitions (SDL)
// =============================================================================

fn print_description(description: &Option<ast::StringValue<'_>>, indent: usize) -> String {
    let Some(description) = description else {
        return String::new();
    };
    let pad = "  ".repeat(indent);
    let rendered = if description.block {
        print_block_string(&description.value, &pad)
    } else {
        print_quoted_string(&description.value)
    };
    format!("{pad}{rendered}\n")
}

fn print_schema_definition(def: &ast::SchemaDefinition<'_>) -> String {
    let mut out = String::from("schema");
    out.push_str(&print_directives_inline(&def.directives));
    out.push_str(" {\n");
    for operation_type in &def.operation_types {
        out.push_str(&format!(
            "  {}: {}\n",
            operation_type.operation.keyword(),
            operation_type.named_type.name,
        ));
    }
    out.push('}');
    out
}

fn print_type_definition(def: &ast::TypeDefinition<'_>) -> String {
    match def {
        ast::TypeDefinition::Scalar(def) => format!(
            "{}scalar {}{}",
            print_description(&def.description, 0),
            def.name,
            print_directives_inline(&def.directives),
        ),
        ast::TypeDefinition::Object(def) => format!(
            "{}type {}{}{}{}",
            print_description(&def.description, 0),
            def.name,
            print_implements(&def.interfaces),
            print_directives_inline(&def.directives),
            print_field_definitions(&def.fields),
        ),
        ast::TypeDefinition::Interface(def) => format!(
            "{}interface {}{}{}",
            print_description(&def.description, 0),
            def.name,
            print_directives_inline(&def.directives),
            print_field_definitions(&def.fields),
        ),
        ast::TypeDefinition::Union(def) => format!(
            "{}union {}{}{}",
            print_description(&def.description, 0),
            def.name,
            print_directives_inline(&def.directives),
            print_union_members(&def.members),
        ),
        ast::TypeDefinition::Enum(def) => format!(
            "{}enum {}{}{}",
            print_description(&def.description, 0),
            def.name,
            print_directives_inline(&def.directives),
            print_enum_values(&def.values),
        ),
        ast::TypeDefinition::InputObject(def) => format!(
            "{}input {}{}{}",
            print_description(&def.description, 0),
            def.name,
            print_directives_inline(&def.directives),
            print_input_field_definitions(&def.fields),
        ),
    }
}

fn print_implements(interfaces: &[ast::NamedTypeAnnotation<'_>]) -> String {
    if interfaces.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
    format!(" implements {}", names.join(" & "))
}

fn print_union_members(members: &[ast::NamedTypeAnnotation<'_>]) -> String {
    if members.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    format!(" = {}", names.join(" | "))
}

fn print_field_definitions(fields: &[ast::FieldDefinition<'_>]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut out = String::from(" {\n");
    for field in fields {
        out.push_str(&print_description(&field.description, 1));
        out.push_str(&format!(
            "  {}{}: {}{}\n",
            field.name,
            print_argument_definitions(&field.arguments),
            field.field_type,
            print_directives_inline(&field.directives),
        ));
    }
    out.push('}');
    out
}

fn print_argument_definitions(arguments: &[ast::InputValueDefinition<'_>]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = arguments.iter().map(print_input_value_inline).collect();
    format!("({})", rendered.join(", "))
}

fn print_input_value_inline(def: &ast::InputValueDefinition<'_>) -> String {
    let mut out = format!("{}: {}", def.name, def.value_type);
    if let Some(default_value) = &def.default_value {
        out.push_str(&format!(" = {}", print_value(default_value)));
    }
    out.push_str(&print_directives_inline(&def.directives));
    out
}

fn print_enum_values(values: &[ast::EnumValueDefinition<'_>]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let mut out = String::from(" {\n");
    for value in values {
        out.push_str(&print_description(&value.description, 1));
        out.push_str(&format!(
            "  {}{}\n",
            value.name,
            print_directives_inline(&value.directives),
        ));
    }
    out.push('}');
    out
}

fn print_input_field_definitions(fields: &[ast::InputValueDefinition<'_>]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut out = String::from(" {\n");
    for field in fields {
        out.push_str(&print_description(&field.description, 1));
        out.push_str(&format!("  {}\n", print_input_value_inline(field)));
    }
    out.push('}');
    out
}

fn print_type_extension(ext: &ast::TypeExtension<'_>) -> String {
    match ext {
        ast::TypeExtension::Scalar(ext) => format!(
            "extend scalar {}{}",
            ext.name,
            print_directives_inline(&ext.directives),
        ),
        ast::TypeExtension::Object(ext) => format!(
            "extend type {}{}{}{}",
            ext.name,
            print_implements(&ext.interfaces),
            print_directives_inline(&ext.directives),
            print_field_definitions(&ext.fields),
        ),
        ast::TypeExtension::Interface(ext) => format!(
            "extend interface {}{}{}",
            ext.name,
            print_directives_inline(&ext.directives),
            print_field_definitions(&ext.fields),
        ),
        ast::TypeExtension::Union(ext) => format!(
            "extend union {}{}{}",
            ext.name,
            print_directives_inline(&ext.directives),
            print_union_members(&ext.members),
        ),
        ast::TypeExtension::Enum(ext) => format!(
            "extend enum {}{}{}",
            ext.name,
            print_directives_inline(&ext.directives),
            print_enum_values(&ext.values),
        ),
        ast::TypeExtension::InputObject(ext) => format!(
            "extend input {}{}{}",
            ext.name,
            print_directives_inline(&ext.directives),
            print_input_field_definitions(&ext.fields),
        ),
    }
}

fn print_directive_definition(def: &ast::DirectiveDefinition<'_>) -> String {
    let locations: Vec<&str> = def
        .locations
        .iter()
        .map(|location| location.keyword())
        .collect();
    format!(
        "{}directive @{}{} on {}",
        print_description(&def.description, 0),
        def.name,
        print_argument_definitions(&def.arguments),
        locations.join(" | "),
    )
}
