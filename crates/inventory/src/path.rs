//! Typed addressing into the stock tree.
//!
//! A path is parsed from its raw wire segments, then resolved against a
//! concrete tree. Both steps report failures as `DomainError::InvalidPath`,
//! naming the first segment that did not resolve. Resolution never creates
//! nodes.

use printstock_core::{DomainError, DomainResult};

use crate::stock::{Category, Font, Kit, SizeClass, SizeGroup, Status, StockTree};

/// Address of a size group: font → kit → category → size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GroupPath {
    pub font: Font,
    pub kit: Kit,
    pub category: Category,
    pub size: SizeClass,
}

/// Address of a single item within a size group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPath {
    pub group: GroupPath,
    pub item: String,
}

fn segment<T>(parsed: Option<T>, what: &str, raw: &str) -> DomainResult<T> {
    parsed.ok_or_else(|| DomainError::invalid_path(format!("unknown {what} '{raw}'")))
}

impl GroupPath {
    pub fn parse(font: &str, kit: &str, category: &str, size: &str) -> DomainResult<Self> {
        Ok(Self {
            font: segment(Font::parse(font), "font", font)?,
            kit: segment(Kit::parse(kit), "kit", kit)?,
            category: segment(Category::parse(category), "category", category)?,
            size: segment(SizeClass::parse(size), "size", size)?,
        })
    }

    pub fn resolve<'t>(&self, tree: &'t StockTree) -> DomainResult<&'t SizeGroup> {
        let kit = tree
            .font(self.font)
            .ok_or_else(|| self.missing_font())?
            .get(self.kit)
            .ok_or_else(|| self.missing_kit())?;
        kit.category(self.category)
            .get(&self.size)
            .ok_or_else(|| self.missing_size())
    }

    pub fn resolve_mut<'t>(&self, tree: &'t mut StockTree) -> DomainResult<&'t mut SizeGroup> {
        let kit = tree
            .font_mut(self.font)
            .ok_or_else(|| self.missing_font())?
            .get_mut(self.kit)
            .ok_or_else(|| self.missing_kit())?;
        kit.category_mut(self.category)
            .get_mut(&self.size)
            .ok_or_else(|| self.missing_size())
    }

    fn missing_font(&self) -> DomainError {
        DomainError::invalid_path(format!("font '{}' not present", self.font))
    }

    fn missing_kit(&self) -> DomainError {
        DomainError::invalid_path(format!("font '{}' has no kit '{}'", self.font, self.kit))
    }

    fn missing_size(&self) -> DomainError {
        DomainError::invalid_path(format!(
            "{}/{} has no {} size '{}'",
            self.font, self.kit, self.category, self.size
        ))
    }
}

impl core::fmt::Display for GroupPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.font, self.kit, self.category, self.size)
    }
}

impl ItemPath {
    pub fn parse(font: &str, kit: &str, category: &str, size: &str, item: &str) -> DomainResult<Self> {
        Ok(Self {
            group: GroupPath::parse(font, kit, category, size)?,
            item: item.to_string(),
        })
    }

    pub fn resolve(&self, tree: &StockTree) -> DomainResult<Status> {
        self.group
            .resolve(tree)?
            .get(&self.item)
            .ok_or_else(|| self.missing_item())
    }

    pub fn resolve_mut<'t>(&self, tree: &'t mut StockTree) -> DomainResult<&'t mut Status> {
        self.group
            .resolve_mut(tree)?
            .get_mut(&self.item)
            .ok_or_else(|| self.missing_item())
    }

    fn missing_item(&self) -> DomainError {
        DomainError::invalid_path(format!("{} has no item '{}'", self.group, self.item))
    }
}

impl core::fmt::Display for ItemPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.group, self.item)
    }
}
