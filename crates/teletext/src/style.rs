//! Style types for teletext tokens.
//!
//! A Style combines a foreground color, a background color and an optional
//! extra attribute.

use std::fmt;

use crate::color::Color;

/// Extra text attribute on top of the colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Double height rows, rendered as bold.
    Bold,
}

/// Complete style of a token.
///
/// Each field is `None` when the markup never set it. The style a page starts
/// out with, and the one separator tokens always use, is [`Style::DEFAULT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground (text) color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Extra attribute.
    pub extra: Option<Attribute>,
}

impl Style {
    /// White on black, no extra attribute.
    pub const DEFAULT: Style = Style {
        fg: Some(Color::White),
        bg: Some(Color::Black),
        extra: None,
    };

    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            extra: None,
        }
    }

    pub fn with_fg(self, fg: Color) -> Self {
        Self {
            fg: Some(fg),
            ..self
        }
    }

    pub fn with_bg(self, bg: Color) -> Self {
        Self {
            bg: Some(bg),
            ..self
        }
    }

    pub fn with_extra(self, extra: Attribute) -> Self {
        Self {
            extra: Some(extra),
            ..self
        }
    }

    pub fn is_bold(&self) -> bool {
        self.extra == Some(Attribute::Bold)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Style {
    /// Formats as `fg on bg`, followed by ` bold` when set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fg {
            Some(fg) => write!(f, "{fg}")?,
            None => f.write_str("none")?,
        }
        match self.bg {
            Some(bg) => write!(f, " on {bg}")?,
            None => f.write_str(" on none")?,
        }
        if self.is_bold() {
            f.write_str(" bold")?;
        }
        Ok(())
    }
}
