//! Rating grade to color lookup.

use super::palette::ColorToken;

/// Color used for any grade not in [`RATING_COLORS`].
pub const DEFAULT_RATING_COLOR: ColorToken = ColorToken::Neutral;

/// Fixed grade → color table, best grade first.
pub static RATING_COLORS: [(&str, ColorToken); 10] = [
    ("AAA", ColorToken::Green),
    ("AA", ColorToken::Emerald),
    ("A", ColorToken::Blue),
    ("BBB", ColorToken::Orange),
    ("BB", ColorToken::Carrot),
    ("B", ColorToken::Red),
    ("CCC", ColorToken::DarkRed),
    ("CC", ColorToken::Crimson),
    ("C", ColorToken::Maroon),
    ("D", ColorToken::Oxblood),
];

/// Look up the display color for a rating as reported by the model.
///
/// Unrecognised grades get [`DEFAULT_RATING_COLOR`].
pub fn map_rating_color(rating: &str) -> ColorToken {
    RATING_COLORS
        .iter()
        .find(|(grade, _)| *grade == rating)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_RATING_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;

    #[test]
    fn aaa_is_green() {
        assert_eq!(map_rating_color("AAA"), ColorToken::Green);
        assert_eq!(map_rating_color("AA"), ColorToken::Emerald);
    }

    #[test]
    fn unknown_grade_falls_back_to_neutral() {
        assert_eq!(map_rating_color("ZZZ"), ColorToken::Neutral);
        assert_eq!(map_rating_color(""), ColorToken::Neutral);
        assert_eq!(map_rating_color("aaa"), ColorToken::Neutral);
    }

    #[test]
    fn every_grade_has_its_own_color() {
        for rating in Rating::ALL {
            assert_ne!(map_rating_color(rating.as_str()), DEFAULT_RATING_COLOR, "{rating}");
        }
        assert_eq!(map_rating_color("D"), ColorToken::Oxblood);
        assert_eq!(map_rating_color("BBB"), map_rating_color("BBB"));
    }
}
