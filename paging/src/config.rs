use shared::{ListKey, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Tuning for one paged list
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: u32,
    /// How close (in px) to the end of the content a scroll has to get
    /// before the next page is requested
    pub scroll_threshold_px: f64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold_px: 300.0,
        }
    }
}

impl ListConfig {
    /// Defaults for the feature `key` belongs to
    pub fn for_key(key: &ListKey) -> Self {
        Self {
            page_size: key.default_page_size(),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_scroll_threshold(mut self, threshold_px: f64) -> Self {
        self.scroll_threshold_px = threshold_px.max(0.0);
        self
    }
}
