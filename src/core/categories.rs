//! Static category table for the Open Trivia DB provider.
//!
//! Maps the display names offered in the category selector to the
//! provider's numeric ids. Baked into the binary and never mutated.

/// Display name to provider id, as published by the provider.
pub const CATEGORIES: &[(&str, u16)] = &[
    ("General Knowledge", 9),
    ("Entertainment: Books", 10),
    ("Entertainment: Film", 11),
    ("Entertainment: Music", 12),
    ("Entertainment: Musicals & Theaters", 13),
    ("Entertainment: Television", 14),
    ("Entertainment: Video Games", 15),
    ("Entertainment: Board Games", 16),
    ("Science & Nature", 17),
    ("Science: Computers", 18),
    ("Science: Mathematics", 19),
    ("Mythology", 20),
    ("Sports", 21),
    ("Geography", 22),
    ("History", 23),
    ("Politics", 24),
    ("Art", 25),
    ("Celebrities", 26),
    ("Animals", 27),
    ("Vehicles", 28),
    ("Entertainment: Comics", 29),
    ("Science: Gadgets", 30),
    ("Entertainment: Japanese Anime & Manga", 31),
    ("Entertainment: Cartoon & Animations", 32),
];

/// Looks up the provider id for a display name.
pub fn category_id(name: &str) -> Option<u16> {
    CATEGORIES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, id)| *id)
}

/// Category names in alphabetical order, for selector rendering.
pub fn sorted_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CATEGORIES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_category() {
        assert_eq!(category_id("General Knowledge"), Some(9));
        assert_eq!(category_id("History"), Some(23));
    }

    #[test]
    fn test_lookup_unknown_category() {
        assert_eq!(category_id("Underwater Basket Weaving"), None);
        // Lookup is exact, not case-insensitive
        assert_eq!(category_id("history"), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<u16> = CATEGORIES.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids.len(), CATEGORIES.len());
    }

    #[test]
    fn test_sorted_names_cover_the_table() {
        let names = sorted_names();
        assert_eq!(names.len(), CATEGORIES.len());
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(names.iter().all(|name| category_id(name).is_some()));
    }
}
