//! Accept-header negotiation: picks the encoder list for a request.

use crate::encoder::{self, Encoder};
use std::path::PathBuf;
use std::sync::Arc;

/// A media range from an `Accept` header, with its quality weight.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    pub kind: String,
    pub subtype: String,
    pub quality: f32,
}

impl MediaType {
    fn parse(range: &str) -> Option<Self> {
        let mut parts = range.split(';');
        let (kind, subtype) = parts.next()?.trim().split_once('/')?;
        if kind.is_empty() || subtype.is_empty() {
            return None;
        }

        let mut quality = 1.0f32;
        for param in parts {
            if let Some((name, value)) = param.trim().split_once('=') {
                if name.trim() == "q" {
                    quality = value.trim().parse().unwrap_or(0.0);
                }
            }
        }

        Some(Self {
            kind: kind.trim().to_ascii_lowercase(),
            subtype: subtype.trim().to_ascii_lowercase(),
            quality,
        })
    }

    fn matches(&self, kind: &str, subtype: &str) -> bool {
        (self.kind == kind || self.kind == "*") && (self.subtype == subtype || self.subtype == "*")
    }
}

/// A parsed `Accept` header, ranges sorted by descending quality.
#[derive(Debug, Clone, Default)]
pub struct Accept {
    ranges: Vec<MediaType>,
}

impl Accept {
    /// Parse an `Accept` header value. Malformed ranges are skipped; an
    /// absent or empty header accepts anything.
    pub fn parse(header: &str) -> Self {
        let mut ranges: Vec<MediaType> = header.split(',').filter_map(MediaType::parse).collect();
        ranges.sort_by(|a, b| {
            b.quality
                .partial_cmp(&a.quality)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { ranges }
    }

    /// Whether JSON is the preferred representation. JSON wins ties with
    /// wildcard ranges; an empty header prefers JSON as the API default.
    pub fn prefers_json(&self) -> bool {
        for range in &self.ranges {
            if range.quality <= 0.0 {
                continue;
            }
            if range.matches("application", "json") {
                return true;
            }
            if range.matches("text", "html") {
                return false;
            }
        }
        true
    }
}

/// The encoder list matching a request's `Accept` header.
pub fn encoders_for(accept: &Accept, error_template: Option<PathBuf>) -> Vec<Arc<dyn Encoder>> {
    if accept.prefers_json() {
        encoder::json_encoders()
    } else {
        encoder::html_encoders(error_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_ordering_decides_preference() {
        let accept = Accept::parse("text/html;q=0.9, application/json");
        assert!(accept.prefers_json());

        let accept = Accept::parse("application/json;q=0.4, text/html");
        assert!(!accept.prefers_json());
    }

    #[test]
    fn wildcard_and_empty_default_to_json() {
        assert!(Accept::parse("*/*").prefers_json());
        assert!(Accept::parse("").prefers_json());
    }

    #[test]
    fn zero_quality_ranges_are_ignored() {
        let accept = Accept::parse("application/json;q=0, text/html");
        assert!(!accept.prefers_json());
    }

    #[test]
    fn malformed_ranges_are_skipped() {
        let accept = Accept::parse("nonsense, text/html");
        assert!(!accept.prefers_json());
    }
}
