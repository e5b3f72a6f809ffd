use serde::Deserialize;
use serde::Serialize;

pub const ALL_TAB: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Business,
    Comfort,
    Premium,
    Unknown,
}

impl CategoryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Comfort => "comfort",
            Self::Premium => "premium",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Comfort => "Comfort",
            Self::Premium => "Premium",
            Self::Unknown => "Other",
        }
    }

    /// Parses a canonical key (`"business"`, ...). Raw feed labels go through
    /// [`normalize_type`] instead.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "business" => Some(Self::Business),
            "comfort" => Some(Self::Comfort),
            "premium" => Some(Self::Premium),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Feed labels, in both scripts. The feed itself never spells the business
/// tier in Latin; `"Business"` is accepted anyway so all three tiers have a
/// Latin form.
const TYPE_TABLE: &[(&str, CategoryKey)] = &[
    ("Бізнес", CategoryKey::Business),
    ("Business", CategoryKey::Business),
    ("Комфорт", CategoryKey::Comfort),
    ("Comfort", CategoryKey::Comfort),
    ("Преміум", CategoryKey::Premium),
    ("Premium", CategoryKey::Premium),
];

/// Maps a raw project type label from the feed to its category.
///
/// Total: surrounding whitespace is ignored and anything outside the table,
/// including an empty or missing label, maps to [`CategoryKey::Unknown`].
pub fn normalize_type(raw: Option<&str>) -> CategoryKey {
    let Some(raw) = raw else {
        return CategoryKey::Unknown;
    };
    let trimmed = raw.trim();
    TYPE_TABLE
        .iter()
        .find(|(label, _)| *label == trimmed)
        .map_or(CategoryKey::Unknown, |(_, key)| *key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveFilter {
    All,
    Category(CategoryKey),
}

impl Default for ActiveFilter {
    fn default() -> Self {
        Self::All
    }
}

impl ActiveFilter {
    pub fn from_tab(tab_id: &str) -> Option<Self> {
        if tab_id == ALL_TAB {
            return Some(Self::All);
        }
        CategoryKey::from_key(tab_id).map(Self::Category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_TAB,
            Self::Category(key) => key.as_str(),
        }
    }

    pub fn matches(self, key: CategoryKey) -> bool {
        match self {
            Self::All => true,
            Self::Category(active) => active == key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_labels_normalize_regardless_of_whitespace() {
        for (label, expected) in TYPE_TABLE {
            assert_eq!(normalize_type(Some(label)), *expected);
            let padded = format!("  {label}\t\n");
            assert_eq!(normalize_type(Some(padded.as_str())), *expected);
        }
    }

    #[test]
    fn mixed_script_variants_share_a_key() {
        assert_eq!(normalize_type(Some("Комфорт")), normalize_type(Some("Comfort")));
        assert_eq!(normalize_type(Some("Преміум")), normalize_type(Some("Premium")));
        assert_eq!(normalize_type(Some("Бізнес")), CategoryKey::Business);
        assert_eq!(normalize_type(Some(" Business ")), CategoryKey::Business);
    }

    #[test]
    fn unmapped_labels_fall_back_to_unknown() {
        for raw in ["", "   ", "premium", "PREMIUM", "Економ", "Premium Plus"] {
            assert_eq!(normalize_type(Some(raw)), CategoryKey::Unknown, "{raw:?}");
        }
        assert_eq!(normalize_type(None), CategoryKey::Unknown);
    }

    #[test]
    fn tab_ids_parse_into_filters() {
        assert_eq!(ActiveFilter::from_tab("all"), Some(ActiveFilter::All));
        assert_eq!(
            ActiveFilter::from_tab("comfort"),
            Some(ActiveFilter::Category(CategoryKey::Comfort))
        );
        assert_eq!(ActiveFilter::from_tab("Comfort"), None);
        assert_eq!(ActiveFilter::from_tab(""), None);
    }

    #[test]
    fn all_filter_matches_every_key() {
        assert!(ActiveFilter::All.matches(CategoryKey::Unknown));
        assert!(ActiveFilter::Category(CategoryKey::Premium).matches(CategoryKey::Premium));
        assert!(!ActiveFilter::Category(CategoryKey::Premium).matches(CategoryKey::Comfort));
    }
}
