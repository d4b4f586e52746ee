//! # Image Preloader
//!
//! Decides which catalogue images to fetch ahead of time and with what
//! priority. Requested URLs are remembered for the session and never
//! requested twice.

use crate::app::models::{ContentCatalog, MediaKind};
use std::collections::HashSet;

/// Number of leading images requested eagerly
pub const HIGH_PRIORITY_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadPriority {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadRequest {
    pub url: String,
    pub priority: PreloadPriority,
}

#[derive(Debug, Default)]
pub struct ImagePreloader {
    requested: HashSet<String>,
}

impl ImagePreloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Covers, image media and the announcement image, in catalogue order
    pub fn collect_urls(catalog: &ContentCatalog) -> Vec<String> {
        let mut urls = Vec::new();
        for item in catalog.resources() {
            if !item.cover.is_empty() {
                urls.push(item.cover.clone());
            }
            urls.extend(
                item.media
                    .iter()
                    .filter(|m| m.kind == MediaKind::Image && !m.url.is_empty())
                    .map(|m| m.url.clone()),
            );
        }
        let image = &catalog.announcement().image;
        if !image.is_empty() {
            urls.push(image.clone());
        }
        urls
    }

    /// Request every catalogue image not yet requested
    pub fn preload_all(&mut self, catalog: &ContentCatalog) -> Vec<PreloadRequest> {
        let urls = Self::collect_urls(catalog);
        let mut requests = Vec::new();
        for (index, url) in urls.into_iter().enumerate() {
            let priority = if index < HIGH_PRIORITY_COUNT {
                PreloadPriority::High
            } else {
                PreloadPriority::Low
            };
            if self.requested.insert(url.clone()) {
                requests.push(PreloadRequest { url, priority });
            }
        }
        tracing::debug!("preloading {} images", requests.len());
        requests
    }

    pub fn is_requested(&self, url: &str) -> bool {
        self.requested.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_urls_should_skip_video_media() {
        let catalog = ContentCatalog::seeded().unwrap();
        let urls = ImagePreloader::collect_urls(&catalog);
        assert!(urls.iter().all(|u| !u.contains("youtube.com")));
        assert_eq!(urls.last(), Some(&catalog.announcement().image));
    }

    #[test]
    fn preload_should_prioritise_leading_images_once() {
        let catalog = ContentCatalog::seeded().unwrap();
        let mut preloader = ImagePreloader::new();

        let first = preloader.preload_all(&catalog);
        assert!(first.len() > HIGH_PRIORITY_COUNT);
        assert!(first[..HIGH_PRIORITY_COUNT]
            .iter()
            .all(|r| r.priority == PreloadPriority::High));
        assert_eq!(first[HIGH_PRIORITY_COUNT].priority, PreloadPriority::Low);
        assert!(preloader.is_requested(&first[0].url));

        assert!(preloader.preload_all(&catalog).is_empty());
    }
}
