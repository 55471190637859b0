//! Terminal colors loaded from the system kitty theme, with fallbacks

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, the claim prompt
    pub danger: Color,      // Errors
    pub warning: Color,     // Status messages
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Secondary text, hints
    pub bg_selected: Color, // Selection background
    pub inactive: Color,    // Inactive borders, separators
    pub header: Color,      // Table headers
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(255, 193, 7),
            danger: Color::Rgb(211, 95, 95),
            warning: Color::Rgb(230, 142, 13),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Load theme colors, falling back to the defaults when the system theme
    /// is missing or unreadable.
    pub fn load() -> Self {
        Self::load_kitty_theme().unwrap_or_default()
    }

    fn load_kitty_theme() -> Option<Self> {
        let path = dirs::home_dir()?.join(".config/omarchy/current/theme/kitty.conf");
        let content = fs::read_to_string(path).ok()?;
        let colors = Self::parse_kitty_conf(&content);

        if colors.is_empty() {
            return None;
        }

        let fallback = Self::default();
        let pick = |key: &str, default: Color| colors.get(key).copied().unwrap_or(default);

        Some(Self {
            accent: pick("color2", fallback.accent),
            danger: pick("color1", fallback.danger),
            warning: pick("color4", fallback.warning),
            text: pick("foreground", fallback.text),
            text_dim: pick("color8", fallback.text_dim),
            bg_selected: pick("selection_background", fallback.bg_selected),
            inactive: pick("color8", fallback.inactive),
            header: pick("color1", fallback.header),
        })
    }

    /// Parse `key #RRGGBB` lines from kitty.conf
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| {
                let (key, value) = line.split_once(char::is_whitespace)?;
                let color = Self::parse_hex_color(value.trim())?;
                Some((key.to_string(), color))
            })
            .collect()
    }

    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim_start_matches('#');
        if s.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            Theme::parse_hex_color("#ffc107"),
            Some(Color::Rgb(255, 193, 7))
        );
        assert_eq!(Theme::parse_hex_color("#fff"), None);
        assert_eq!(Theme::parse_hex_color("not-a-color"), None);
    }

    #[test]
    fn test_parse_kitty_conf_skips_comments() {
        let conf = "# a comment\nforeground #bebebe\ncolor2 #FFC107\nbadline\n";
        let colors = Theme::parse_kitty_conf(conf);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get("color2"), Some(&Color::Rgb(255, 193, 7)));
    }
}
