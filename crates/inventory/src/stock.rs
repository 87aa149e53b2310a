use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use printstock_core::DomainError;

/// Generates the closed key enums of the stock tree.
///
/// Each variant serializes as its lowercase name, which is also the JSON map
/// key in the persisted snapshot.
macro_rules! key_enum {
    ($(#[$meta:meta])* $t:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $t {
            $($variant),+
        }

        impl $t {
            pub const ALL: &'static [$t] = &[$($t::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($t::$variant => $name),+
                }
            }

            /// Parse the lowercase wire name; `None` for anything else.
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($name => Some($t::$variant),)+
                    _ => None,
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

key_enum!(
    /// Print style; the top-level partition of stock.
    Font { Prem => "prem", Club => "club", Wsl => "wsl" }
);

key_enum!(
    /// Shirt variant within a font.
    Kit { Home => "home", Away => "away", Third => "third" }
);

key_enum!(
    /// Letters or numbers.
    Category { Letters => "letters", Numbers => "numbers" }
);

key_enum!(
    /// Sub-grouping by wearer size. Which classes exist depends on font and category.
    SizeClass { Adult => "adult", Baby => "baby", Youth => "youth", Short => "short" }
);

key_enum!(
    /// Stock level of one item: in stock, low, out.
    Status { Green => "green", Yellow => "yellow", Red => "red" }
);

impl core::str::FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s).ok_or_else(|| {
            DomainError::validation(format!(
                "invalid status '{s}': must be one of green, yellow, red"
            ))
        })
    }
}

/// Item key → status for one (font, kit, category, size) combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeGroup(BTreeMap<String, Status>);

impl SizeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: &str) -> Option<Status> {
        self.0.get(item).copied()
    }

    /// Mutable access to an existing item; never inserts.
    pub fn get_mut(&mut self, item: &str) -> Option<&mut Status> {
        self.0.get_mut(item)
    }

    /// Overwrite every item currently in the group. Returns how many were written.
    pub fn set_all(&mut self, status: Status) -> usize {
        for value in self.0.values_mut() {
            *value = status;
        }
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Status)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Status)> for SizeGroup {
    fn from_iter<I: IntoIterator<Item = (String, Status)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stock for one kit: size groups for letters and for numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitStock {
    pub letters: BTreeMap<SizeClass, SizeGroup>,
    pub numbers: BTreeMap<SizeClass, SizeGroup>,
}

impl KitStock {
    pub fn category(&self, category: Category) -> &BTreeMap<SizeClass, SizeGroup> {
        match category {
            Category::Letters => &self.letters,
            Category::Numbers => &self.numbers,
        }
    }

    pub fn category_mut(&mut self, category: Category) -> &mut BTreeMap<SizeClass, SizeGroup> {
        match category {
            Category::Letters => &mut self.letters,
            Category::Numbers => &mut self.numbers,
        }
    }
}

/// Kit → stock for one font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontStock(BTreeMap<Kit, KitStock>);

impl FontStock {
    pub fn get(&self, kit: Kit) -> Option<&KitStock> {
        self.0.get(&kit)
    }

    pub fn get_mut(&mut self, kit: Kit) -> Option<&mut KitStock> {
        self.0.get_mut(&kit)
    }

    pub fn kits(&self) -> impl Iterator<Item = (Kit, &KitStock)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(Kit, KitStock)> for FontStock {
    fn from_iter<I: IntoIterator<Item = (Kit, KitStock)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Root of the stock data: font → [`FontStock`].
///
/// Serializes to the nested JSON object persisted as the snapshot, e.g.
/// `{"prem":{"home":{"letters":{"adult":{"A":"green"}}}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockTree(BTreeMap<Font, FontStock>);

impl StockTree {
    pub fn font(&self, font: Font) -> Option<&FontStock> {
        self.0.get(&font)
    }

    pub fn font_mut(&mut self, font: Font) -> Option<&mut FontStock> {
        self.0.get_mut(&font)
    }

    pub fn kit(&self, font: Font, kit: Kit) -> Option<&KitStock> {
        self.font(font)?.get(kit)
    }

    /// Look up a kit by its raw wire names.
    pub fn kit_by_name(&self, font: &str, kit: &str) -> Result<&KitStock, DomainError> {
        let font_key =
            Font::parse(font).ok_or_else(|| DomainError::not_found(format!("font '{font}'")))?;
        let kit_key =
            Kit::parse(kit).ok_or_else(|| DomainError::not_found(format!("kit '{kit}'")))?;
        self.kit(font_key, kit_key)
            .ok_or_else(|| DomainError::not_found(format!("{font}/{kit}")))
    }

    pub fn fonts(&self) -> impl Iterator<Item = (Font, &FontStock)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(Font, FontStock)> for StockTree {
    fn from_iter<I: IntoIterator<Item = (Font, FontStock)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
