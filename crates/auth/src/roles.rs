use serde::{Deserialize, Serialize};

/// Caller role, ordered by capability: `None < Staff < Admin`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Anonymous caller.
    #[default]
    None,
    /// Read-only access to stock.
    Staff,
    /// Read and write access to stock.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }

    /// Roles a caller can log in as. `none` is never a login target.
    pub fn parse_login(s: &str) -> Option<Self> {
        match s {
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether this role grants at least the capabilities of `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
