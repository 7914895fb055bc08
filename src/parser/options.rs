//! Parsing options and configuration.

/// Options for reading spans out of a PDF.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How page-level failures are handled
    pub error_mode: ErrorMode,

    /// Only read the first N pages (None = all pages)
    pub max_pages: Option<u32>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first unreadable page.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Read at most `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Whether a page number is within the page limit.
    pub fn includes_page(&self, page: u32) -> bool {
        self.max_pages.map_or(true, |max| page <= max)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_pages: None,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    Strict,
    /// Skip unreadable pages and continue
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().strict().with_max_pages(3);
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.includes_page(3));
        assert!(!options.includes_page(4));
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.includes_page(1000));
    }
}
