//! # Load-more triggers
//!
//! Triggers turn viewport signals into "you may want more data now". They
//! carry no payload and may fire as often as the platform reports scroll or
//! intersection changes; the list controller's gate decides whether a
//! request actually goes out.

use crate::config::ListConfig;

/// Scroll position of a scrollable container, all values in px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Distance between the bottom of the viewport and the end of the content
    pub fn distance_to_end(&self) -> f64 {
        (self.content_height - (self.scroll_top + self.viewport_height)).max(0.0)
    }
}

/// Fires when a scroll gets within `threshold_px` of the end of the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    threshold_px: f64,
}

impl ScrollTrigger {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px: threshold_px.max(0.0),
        }
    }

    pub fn from_config(config: &ListConfig) -> Self {
        Self::new(config.scroll_threshold_px)
    }

    /// Content shorter than the viewport counts as "at the end", so a list
    /// keeps loading until it fills the screen or runs out.
    pub fn should_request(&self, metrics: &ScrollMetrics) -> bool {
        metrics.distance_to_end() <= self.threshold_px
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::from_config(&ListConfig::default())
    }
}

/// Fires when a sentinel element placed after the last item becomes visible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionTrigger {
    min_ratio: f64,
}

impl IntersectionTrigger {
    /// `min_ratio` is the visible fraction of the sentinel (0.0..=1.0) that
    /// has to be exceeded
    pub fn new(min_ratio: f64) -> Self {
        Self {
            min_ratio: min_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn should_request(&self, is_intersecting: bool, intersection_ratio: f64) -> bool {
        is_intersecting && (intersection_ratio > self.min_ratio || self.min_ratio == 0.0)
    }
}

impl Default for IntersectionTrigger {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            viewport_height: 800.0,
            content_height: 3000.0,
        }
    }

    #[test]
    fn test_scroll_trigger_threshold() {
        let trigger = ScrollTrigger::new(300.0);
        assert!(!trigger.should_request(&metrics(0.0)));
        assert!(!trigger.should_request(&metrics(1899.0)));
        assert!(trigger.should_request(&metrics(1900.0)));
        assert!(trigger.should_request(&metrics(2200.0)));
    }

    #[test]
    fn test_overscroll_is_at_end() {
        // iOS rubber-banding reports scroll positions past the content
        let bounced = metrics(2400.0);
        assert_eq!(bounced.distance_to_end(), 0.0);
        assert!(ScrollTrigger::new(0.0).should_request(&bounced));
    }

    #[test]
    fn test_short_content_requests_more() {
        let short = ScrollMetrics {
            scroll_top: 0.0,
            viewport_height: 800.0,
            content_height: 400.0,
        };
        assert!(ScrollTrigger::default().should_request(&short));
    }

    #[test]
    fn test_intersection_trigger() {
        let any = IntersectionTrigger::default();
        assert!(any.should_request(true, 0.0));
        assert!(!any.should_request(false, 0.0));

        let half = IntersectionTrigger::new(0.5);
        assert!(!half.should_request(true, 0.25));
        assert!(half.should_request(true, 0.75));
    }
}
