/// Records whether a field or enum variant is marked `@deprecated`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum DeprecationState {
    #[default]
    NotDeprecated,
    /// Deprecated, with the optional `reason:` argument.
    Deprecated(Option<String>),
}

impl DeprecationState {
    pub fn is_deprecated(&self) -> bool {
        matches!(self, DeprecationState::Deprecated(_))
    }

    /// The `reason:` payload when deprecated.
    pub fn reason(&self) -> Option<&str> {
        match self {
            DeprecationState::Deprecated(reason) => reason.as_deref(),
            DeprecationState::NotDeprecated => None,
        }
    }
}
