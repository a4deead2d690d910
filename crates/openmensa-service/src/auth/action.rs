//! Actions for Casbin enforcement.
//!
//! One action per controller action on the users resource.

/// Actions that can be performed on users.
///
/// These are used as the `act` parameter in Casbin enforcement requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    New,
    Create,
    Show,
    Edit,
    Update,
    Delete,
    Destroy,
}

impl Action {
    pub const ALL: [Self; 8] = [
        Self::Index,
        Self::New,
        Self::Create,
        Self::Show,
        Self::Edit,
        Self::Update,
        Self::Delete,
        Self::Destroy,
    ];

    /// Returns the Casbin action string for this action.
    #[must_use]
    pub const fn as_casbin_action(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::New => "new",
            Self::Create => "create",
            Self::Show => "show",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Destroy => "destroy",
        }
    }

    /// Parse a Casbin action string into an action.
    #[must_use]
    pub fn from_casbin_action(action: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_casbin_action() == action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_casbin_action())
    }
}
