use crate::ast::Name;
use crate::SourceSpan;
use std::borrow::Cow;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// A GraphQL input value literal.
///
/// See [Input Values](https://spec.graphql.org/June2018/#sec-Input-Values)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'src> {
    Int(IntValue<'src>),
    Float(FloatValue<'src>),
    String(StringValue<'src>),
    Boolean(BooleanValue),
    Null(NullValue),
    Enum(EnumValue<'src>),
    List(ListValue<'src>),
    Object(ObjectValue<'src>),
    Variable(VariableValue<'src>),
}

impl Value<'_> {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Value::Int(v) => &v.span,
            Value::Float(v) => &v.span,
            Value::String(v) => &v.span,
            Value::Boolean(v) => &v.span,
            Value::Null(v) => &v.span,
            Value::Enum(v) => &v.span,
            Value::List(v) => &v.span,
            Value::Object(v) => &v.span,
            Value::Variable(v) => &v.span,
        }
    }

    /// True when this value is (or contains, for lists and objects) a
    /// variable reference.
    pub fn has_variables(&self) -> bool {
        match self {
            Value::Variable(_) => true,
            Value::List(list) => list.values.iter().any(Value::has_variables),
            Value::Object(object) => {
                object.fields.iter().any(|field| field.value.has_variables())
            }
            _ => false,
        }
    }
}

/// An integer literal. The raw source text is kept; use
/// [`IntValue::parse()`] to obtain the numeric value.
#[derive(Clone, Debug, PartialEq)]
pub struct IntValue<'src> {
    pub raw: Cow<'src, str>,
    pub span: SourceSpan,
}

impl IntValue<'_> {
    pub fn parse(&self) -> Result<i64, ParseIntError> {
        self.raw.parse()
    }
}

/// A float literal. The raw source text is kept; use
/// [`FloatValue::parse()`] to obtain the numeric value.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue<'src> {
    pub raw: Cow<'src, str>,
    pub span: SourceSpan,
}

impl FloatValue<'_> {
    pub fn parse(&self) -> Result<f64, ParseFloatError> {
        self.raw.parse()
    }
}

/// A string literal, already unescaped (and block-trimmed when `block`).
#[derive(Clone, Debug, PartialEq)]
pub struct StringValue<'src> {
    pub value: Cow<'src, str>,
    pub block: bool,
    pub span: SourceSpan,
}

/// `true` or `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanValue {
    pub value: bool,
    pub span: SourceSpan,
}

/// The `null` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct NullValue {
    pub span: SourceSpan,
}

/// An enum literal: a bare name that is not `true`, `false`, or `null`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue<'src> {
    pub value: Cow<'src, str>,
    pub span: SourceSpan,
}

/// A bracketed list of values.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue<'src> {
    pub values: Vec<Value<'src>>,
    pub span: SourceSpan,
}

/// A braced input object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue<'src> {
    pub fields: Vec<ObjectField<'src>>,
    pub span: SourceSpan,
}

/// A single `name: value` entry of an [`ObjectValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField<'src> {
    pub name: Name<'src>,
    pub value: Value<'src>,
    pub span: SourceSpan,
}

/// A `$variable` reference.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableValue<'src> {
    pub name: Name<'src>,
    pub span: SourceSpan,
}
