use crate::SourceSpan;
use std::borrow::Cow;
use std::fmt;

/// A GraphQL name, matching `[_A-Za-z][_A-Za-z0-9]*`.
///
/// See [Names](https://spec.graphql.org/June2018/#sec-Names) in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Name<'src> {
    pub value: Cow<'src, str>,
    pub span: SourceSpan,
}

impl Name<'_> {
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_ref())
    }
}
