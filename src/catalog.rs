//! Static lookup tables for developer branding and garage metadata
//!
//! All tables here are fixed at compile time. Lookups never fail: unknown
//! developer names resolve to no logo, unknown garage codes resolve to the
//! documented fallback values.

/// Known developer brands and their logo assets.
///
/// Matching is exact and case-sensitive; names outside this set simply have
/// no logo entry.
const DEVELOPER_LOGOS: &[(&str, &str)] = &[
    ("Barratt Homes", "logos/barratt.png"),
    ("Bellway", "logos/bellway.png"),
    ("Berkeley Group", "logos/berkeley.png"),
    ("Persimmon", "logos/persimmon.png"),
    ("Redrow", "logos/redrow.png"),
    ("Taylor Wimpey", "logos/taylor-wimpey.png"),
];

/// Look up the logo asset for a developer brand name.
pub fn developer_logo(name: &str) -> Option<&'static str> {
    DEVELOPER_LOGOS
        .iter()
        .find(|(brand, _)| *brand == name)
        .map(|(_, logo)| *logo)
}

/// The two garage layouts the platform knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarageType {
    Single,
    Double,
}

impl GarageType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "single" => Some(Self::Single),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Garage",
            Self::Double => "Double Garage",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Single => "󰗼",
            Self::Double => "󰗽",
        }
    }
}

/// Display label for a garage type code.
/// Unknown codes fall back to the raw code itself.
pub fn garage_label(code: &str) -> String {
    match GarageType::from_code(code) {
        Some(t) => t.label().to_string(),
        None => code.to_string(),
    }
}

/// Icon glyph for a garage type code.
/// Unknown codes fall back to the single garage's icon, not the input.
pub fn garage_icon(code: &str) -> &'static str {
    GarageType::from_code(code)
        .unwrap_or(GarageType::Single)
        .icon()
}

/// Display labels for the five garage lift types.
const LIFT_LABELS: &[(&str, &str)] = &[
    ("two_post", "Two-Post Lift"),
    ("four_post", "Four-Post Lift"),
    ("scissor", "Scissor Lift"),
    ("single_post", "Single-Post Lift"),
    ("portable", "Portable Lift"),
];

/// Display label for a garage lift type code.
/// Follows the same fallback policy as [`garage_label`]: unknown codes come
/// back unchanged.
pub fn lift_label(code: &str) -> String {
    LIFT_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_developer_logo_lookup() {
        assert_eq!(developer_logo("Bellway"), Some("logos/bellway.png"));
        assert_eq!(developer_logo("bellway"), None); // case-sensitive
        assert_eq!(developer_logo("Unknown Homes"), None);
    }

    #[test]
    fn test_garage_label() {
        assert_eq!(garage_label("single"), "Single Garage");
        assert_eq!(garage_label("double"), "Double Garage");
        assert_eq!(garage_label("unknown"), "unknown");
    }

    #[test]
    fn test_garage_icon_fallback_is_single() {
        assert_eq!(garage_icon("double"), GarageType::Double.icon());
        // Unknown codes get the single icon, never the raw input
        assert_eq!(garage_icon("bogus"), GarageType::Single.icon());
        assert_ne!(garage_icon("bogus"), "bogus");
    }

    #[test]
    fn test_lift_labels() {
        assert_eq!(lift_label("scissor"), "Scissor Lift");
        assert_eq!(lift_label("hydraulic"), "hydraulic");
    }
}
