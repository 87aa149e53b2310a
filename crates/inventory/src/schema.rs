//! The fixed stock schema and the initial (all green) tree.
//!
//! prem and club carry adult/baby letters and adult/youth/short numbers;
//! wsl carries adult only in both categories.

use crate::stock::{Category, Font, FontStock, Kit, KitStock, SizeClass, SizeGroup, Status, StockTree};

/// Size classes that exist for a font in a category.
pub fn size_classes(font: Font, category: Category) -> &'static [SizeClass] {
    match (font, category) {
        (Font::Wsl, _) => &[SizeClass::Adult],
        (Font::Prem | Font::Club, Category::Letters) => &[SizeClass::Adult, SizeClass::Baby],
        (Font::Prem | Font::Club, Category::Numbers) => {
            &[SizeClass::Adult, SizeClass::Youth, SizeClass::Short]
        }
    }
}

/// Item keys of a category: `A`..=`Z` for letters, `0`..=`9` for numbers.
pub fn item_keys(category: Category) -> impl Iterator<Item = String> {
    let range = match category {
        Category::Letters => 'A'..='Z',
        Category::Numbers => '0'..='9',
    };
    range.map(String::from)
}

fn seed_group(category: Category, status: Status) -> SizeGroup {
    item_keys(category).map(|k| (k, status)).collect()
}

fn seed_kit(font: Font) -> KitStock {
    let mut kit = KitStock::default();
    for &category in Category::ALL {
        let groups = kit.category_mut(category);
        for &size in size_classes(font, category) {
            groups.insert(size, seed_group(category, Status::Green));
        }
    }
    kit
}

/// Build the canonical initial tree: every font, kit and schema size class,
/// with every item set to green.
pub fn seed_tree() -> StockTree {
    Font::ALL
        .iter()
        .map(|&font| {
            let kits: FontStock = Kit::ALL.iter().map(|&kit| (kit, seed_kit(font))).collect();
            (font, kits)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_font_has_every_kit() {
        let tree = seed_tree();
        for &font in Font::ALL {
            for &kit in Kit::ALL {
                assert!(tree.kit(font, kit).is_some(), "{font}/{kit} missing");
            }
        }
    }

    #[test]
    fn kit_shape_matches_schema() {
        let tree = seed_tree();
        for (font, fs) in tree.fonts() {
            for (_kit, ks) in fs.kits() {
                for &category in Category::ALL {
                    let sizes: Vec<SizeClass> = ks.category(category).keys().copied().collect();
                    assert_eq!(sizes, size_classes(font, category));

                    for group in ks.category(category).values() {
                        let keys: Vec<String> = group.keys().map(str::to_string).collect();
                        let expected: Vec<String> = item_keys(category).collect();
                        assert_eq!(keys, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn wsl_has_no_baby_letters_or_youth_short_numbers() {
        let tree = seed_tree();
        for &kit in Kit::ALL {
            let ks = tree.kit(Font::Wsl, kit).unwrap();
            assert!(!ks.letters.contains_key(&SizeClass::Baby));
            assert!(!ks.numbers.contains_key(&SizeClass::Youth));
            assert!(!ks.numbers.contains_key(&SizeClass::Short));
        }
        assert!(!size_classes(Font::Wsl, Category::Letters).contains(&SizeClass::Baby));
        assert!(size_classes(Font::Club, Category::Numbers).contains(&SizeClass::Short));
    }

    #[test]
    fn seeded_items_are_all_green() {
        let tree = seed_tree();
        let mut count = 0;
        for (_, fs) in tree.fonts() {
            for (_, ks) in fs.kits() {
                for group in ks.letters.values().chain(ks.numbers.values()) {
                    for (_, status) in group.iter() {
                        assert_eq!(status, Status::Green);
                        count += 1;
                    }
                }
            }
        }
        // prem/club: 3 kits * (2*26 + 3*10); wsl: 3 kits * (26 + 10)
        assert_eq!(count, 2 * 3 * (52 + 30) + 3 * 36);
    }

    #[test]
    fn seed_is_deterministic() {
        let a = serde_json::to_string_pretty(&seed_tree()).unwrap();
        let b = serde_json::to_string_pretty(&seed_tree()).unwrap();
        assert_eq!(a, b);
    }
}
