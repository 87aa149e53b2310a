use thiserror::Error;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthorized: no active session")]
    Unauthenticated,

    #[error("forbidden: role '{actual}' does not grant '{required}'")]
    InsufficientRole { required: Role, actual: Role },
}

/// Operation-side contract: the minimum role an operation needs.
///
/// The API layer checks this before the operation reaches the inventory store.
pub trait RoleRequirement {
    fn required_role(&self) -> Role;
}

/// Pure policy check of a caller's role against a minimum.
pub fn authorize(role: Role, required: Role) -> Result<(), AuthzError> {
    if role == Role::None {
        return Err(AuthzError::Unauthenticated);
    }
    if role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole { required, actual: role })
    }
}
