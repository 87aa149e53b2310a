use printstock_core::DomainResult;

use crate::path::{GroupPath, ItemPath};
use crate::stock::{Status, StockTree};

/// Command: set one item's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetItem {
    pub path: ItemPath,
    pub status: Status,
}

/// Command: set every item of one size group to the same status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSizeGroup {
    pub path: GroupPath,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCommand {
    SetItem(SetItem),
    SetSizeGroup(SetSizeGroup),
}

impl StockCommand {
    /// Build a [`SetItem`] from raw request values.
    ///
    /// The status is checked before the path, so a request that is wrong in
    /// both ways reports a validation error.
    pub fn set_item(
        font: &str,
        kit: &str,
        category: &str,
        size: &str,
        item: &str,
        status: &str,
    ) -> DomainResult<Self> {
        let status: Status = status.parse()?;
        let path = ItemPath::parse(font, kit, category, size, item)?;
        Ok(Self::SetItem(SetItem { path, status }))
    }

    /// Build a [`SetSizeGroup`] from raw request values (status checked first).
    pub fn set_size_group(
        font: &str,
        kit: &str,
        category: &str,
        size: &str,
        status: &str,
    ) -> DomainResult<Self> {
        let status: Status = status.parse()?;
        let path = GroupPath::parse(font, kit, category, size)?;
        Ok(Self::SetSizeGroup(SetSizeGroup { path, status }))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StockCommand::SetItem(_) => "stock.item.set",
            StockCommand::SetSizeGroup(_) => "stock.size_group.set",
        }
    }

    /// Apply to `tree`. Returns the number of items written.
    ///
    /// The path is fully resolved before anything is written, so an error
    /// leaves `tree` untouched.
    pub fn apply(&self, tree: &mut StockTree) -> DomainResult<usize> {
        match self {
            StockCommand::SetItem(c) => {
                *c.path.resolve_mut(tree)? = c.status;
                Ok(1)
            }
            StockCommand::SetSizeGroup(c) => Ok(c.path.resolve_mut(tree)?.set_all(c.status)),
        }
    }
}

impl core::fmt::Display for StockCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockCommand::SetItem(c) => write!(f, "{} {}={}", self.kind(), c.path, c.status),
            StockCommand::SetSizeGroup(c) => write!(f, "{} {}={}", self.kind(), c.path, c.status),
        }
    }
}
