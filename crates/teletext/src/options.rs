//! Configuration options for payload parsing

/// Options controlling escape decoding and markup cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Character substituted for escapes and entities that cannot be decoded.
    pub placeholder: char,

    /// Longest entity accepted, counted from `&` through `;`.
    /// Longer runs are copied through as plain text.
    pub max_entity_length: usize,

    /// Strip the `<div class="root">` container wrapping page content.
    pub strip_wrapper: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            placeholder: '?',
            max_entity_length: 8,
            strip_wrapper: true,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_max_entity_length(mut self, max_entity_length: usize) -> Self {
        self.max_entity_length = max_entity_length;
        self
    }

    pub fn with_strip_wrapper(mut self, strip_wrapper: bool) -> Self {
        self.strip_wrapper = strip_wrapper;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.placeholder, '?');
        assert_eq!(options.max_entity_length, 8);
        assert!(options.strip_wrapper);
    }

    #[test]
    fn builder() {
        let options = Options::new()
            .with_placeholder('#')
            .with_max_entity_length(6)
            .with_strip_wrapper(false);
        assert_eq!(options.placeholder, '#');
        assert_eq!(options.max_entity_length, 6);
        assert!(!options.strip_wrapper);
    }
}
