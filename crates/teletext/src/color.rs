//! Color types for teletext markup.
//!
//! Teletext pages only use a handful of colors, each addressed by a one
//! letter class name (`B`, `C`, `W`, ...).

use std::fmt;

/// One of the colors a teletext page can use for text or background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Blue,
    Cyan,
    Green,
    Red,
    White,
    Yellow,
}

impl Color {
    /// Look up a color by its class letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use teletext::Color;
    ///
    /// assert_eq!(Color::from_code("Y"), Some(Color::Yellow));
    /// assert_eq!(Color::from_code("X"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B" => Some(Color::Blue),
            "C" => Some(Color::Cyan),
            "W" => Some(Color::White),
            "G" => Some(Color::Green),
            "Y" => Some(Color::Yellow),
            "R" => Some(Color::Red),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Green => "green",
            Color::Red => "red",
            Color::White => "white",
            Color::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_class_letters() {
        assert_eq!(Color::from_code("B"), Some(Color::Blue));
        assert_eq!(Color::from_code("C"), Some(Color::Cyan));
        assert_eq!(Color::from_code("W"), Some(Color::White));
        assert_eq!(Color::from_code("G"), Some(Color::Green));
        assert_eq!(Color::from_code("Y"), Some(Color::Yellow));
        assert_eq!(Color::from_code("R"), Some(Color::Red));
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert_eq!(Color::from_code("b"), None);
        assert_eq!(Color::from_code(""), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Color::Cyan.to_string(), "cyan");
    }
}
