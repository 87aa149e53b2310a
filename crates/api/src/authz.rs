//! API-side authorization guard for stock operations.
//!
//! Enforced at the handler boundary, before the inventory store is touched.

use chrono::Utc;

use printstock_auth::{AccessGate, AuthzError, Role, RoleRequirement};

use crate::context::SessionContext;

/// Stock API operations, by the role they need.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockOperation {
    ReadAll,
    ReadSubtree,
    SetItem,
    SetSizeGroup,
}

impl RoleRequirement for StockOperation {
    fn required_role(&self) -> Role {
        match self {
            StockOperation::ReadAll | StockOperation::ReadSubtree => Role::Staff,
            StockOperation::SetItem | StockOperation::SetSizeGroup => Role::Admin,
        }
    }
}

/// Check that the caller behind `session` may perform `op`.
pub fn authorize_operation<O: RoleRequirement>(
    gate: &AccessGate,
    session: &SessionContext,
    op: &O,
) -> Result<Role, AuthzError> {
    gate.authorize(session.session_id(), op.required_role(), Utc::now())
}
