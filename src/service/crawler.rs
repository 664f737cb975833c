//! Sitemap traversal.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use url::Url;

use crate::config::SitemapConfig;
use crate::error::{AppError, Result};
use crate::extractor::sitemap::{parse_sitemap, SitemapDocument, SitemapEntry, SITE_MAP_PATH};
use crate::service::http::{validate_url, PageFetcher};

/// Conventional sitemap location for a site: `/sitemap.xml` on its origin.
pub fn discover_sitemap(site_url: &str) -> Result<Url> {
    let base = validate_url(site_url)?;
    base.join(&format!("/{SITE_MAP_PATH}"))
        .map_err(|e| AppError::invalid_url(format!("{site_url}: {e}")))
}

pub struct SitemapCrawler {
    fetcher: PageFetcher,
    config: SitemapConfig,
}

impl SitemapCrawler {
    pub fn new(fetcher: PageFetcher, config: SitemapConfig) -> Self {
        Self { fetcher, config }
    }

    /// Collects page entries reachable from `sitemap_url`.
    ///
    /// A urlset is returned directly. An index is walked breadth-first:
    /// at most `max_child_sitemaps` children are fetched in total, nested
    /// indexes are followed down to `max_depth`, and collection stops at
    /// `max_urls` entries. Child failures are logged and skipped; a root
    /// failure is returned.
    pub async fn crawl(&self, sitemap_url: &str) -> Result<Vec<SitemapEntry>> {
        tracing::info!("[SITEMAP] Fetching root sitemap: {}", sitemap_url);
        let root = self.fetcher.fetch_text(sitemap_url).await?;

        let mut collector = EntryCollector::new(self.config.max_urls);
        let children = match parse_sitemap(&root)? {
            SitemapDocument::UrlSet(entries) => {
                collector.extend(entries);
                return Ok(collector.finish());
            }
            SitemapDocument::Index(children) => children,
        };

        tracing::info!("[SITEMAP] Sitemap index with {} children", children.len());
        let mut queue: VecDeque<(String, usize)> =
            children.into_iter().map(|child| (child, 1)).collect();
        let mut visited: HashSet<String> = HashSet::from([sitemap_url.to_string()]);
        let mut fetched = 0usize;

        while let Some((child, depth)) = queue.pop_front() {
            if collector.is_full() {
                tracing::info!("[SITEMAP] Reached URL limit: {}", self.config.max_urls);
                break;
            }
            if fetched >= self.config.max_child_sitemaps {
                tracing::info!(
                    "[SITEMAP] Reached child sitemap limit: {} ({} not visited)",
                    self.config.max_child_sitemaps,
                    queue.len() + 1
                );
                break;
            }
            if !visited.insert(child.clone()) {
                tracing::trace!("[SITEMAP] Skipping already visited: {}", child);
                continue;
            }

            if fetched > 0 {
                self.pause().await;
            }
            fetched += 1;

            let body = match self.fetcher.fetch_text(&child).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!("[SITEMAP] Failed to fetch child {}: {}", child, err);
                    continue;
                }
            };

            match parse_sitemap(&body) {
                Ok(SitemapDocument::UrlSet(entries)) => {
                    tracing::debug!("[SITEMAP] {} entries in {}", entries.len(), child);
                    collector.extend(entries);
                }
                Ok(SitemapDocument::Index(nested)) if depth < self.config.max_depth => {
                    tracing::debug!("[SITEMAP] Nested index {} with {} children", child, nested.len());
                    queue.extend(nested.into_iter().map(|n| (n, depth + 1)));
                }
                Ok(SitemapDocument::Index(nested)) => {
                    tracing::debug!(
                        "[SITEMAP] Ignoring {} children of {} beyond depth {}",
                        nested.len(),
                        child,
                        self.config.max_depth
                    );
                }
                Err(err) => tracing::warn!("[SITEMAP] Skipping unparsable child {}: {}", child, err),
            }
        }

        let entries = collector.finish();
        tracing::info!("[SITEMAP] Crawl complete - {} URLs", entries.len());
        Ok(entries)
    }

    async fn pause(&self) {
        let (min, max) = (self.config.jitter_min_ms, self.config.jitter_max_ms);
        let delay = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        if delay > 0 {
            tracing::trace!("[SITEMAP] Waiting {}ms before next sitemap", delay);
            sleep(Duration::from_millis(delay)).await;
        }
    }
}

/// Deduplicating, size-capped entry list.
struct EntryCollector {
    seen: HashSet<String>,
    entries: Vec<SitemapEntry>,
    limit: usize,
}

impl EntryCollector {
    fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            entries: Vec::new(),
            limit,
        }
    }

    fn extend(&mut self, entries: Vec<SitemapEntry>) {
        for entry in entries {
            if self.is_full() {
                break;
            }
            if self.seen.insert(entry.loc.clone()) {
                self.entries.push(entry);
            }
        }
    }

    fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    fn finish(self) -> Vec<SitemapEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::test_utils::fixtures::{sitemap_index_xml, urlset_xml};

    fn crawler(config: SitemapConfig) -> SitemapCrawler {
        let fetcher = PageFetcher::new(&HttpConfig::default()).unwrap();
        SitemapCrawler::new(
            fetcher,
            SitemapConfig {
                jitter_min_ms: 0,
                jitter_max_ms: 0,
                ..config
            },
        )
    }

    #[test]
    fn test_discover_sitemap_uses_site_root() {
        assert_eq!(
            discover_sitemap("https://example.com").unwrap().as_str(),
            "https://example.com/sitemap.xml"
        );
        assert_eq!(
            discover_sitemap("https://example.com/blog/post?x=1").unwrap().as_str(),
            "https://example.com/sitemap.xml"
        );
        assert!(discover_sitemap("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_collector_dedupes_and_caps() {
        let mut collector = EntryCollector::new(2);
        collector.extend(vec![
            SitemapEntry::new("https://a.test/1"),
            SitemapEntry::new("https://a.test/1"),
            SitemapEntry::new("https://a.test/2"),
            SitemapEntry::new("https://a.test/3"),
        ]);
        let locs: Vec<_> = collector.finish().into_iter().map(|e| e.loc).collect();
        assert_eq!(locs, vec!["https://a.test/1", "https://a.test/2"]);
    }

    #[tokio::test]
    async fn test_crawl_plain_urlset() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset_xml(&["https://site.test/a", "https://site.test/b"]))
            .create_async()
            .await;

        let entries = crawler(SitemapConfig::default())
            .crawl(&format!("{}/sitemap.xml", server.url()))
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].changefreq.as_deref(), Some("weekly"));
    }

    #[tokio::test]
    async fn test_crawl_index_skips_failing_child() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _root = server
            .mock("GET", "/sitemap.xml")
            .with_body(sitemap_index_xml(&[
                format!("{base}/posts.xml").as_str(),
                format!("{base}/broken.xml").as_str(),
                format!("{base}/pages.xml").as_str(),
            ]))
            .create_async()
            .await;
        let _posts = server
            .mock("GET", "/posts.xml")
            .with_body(urlset_xml(&["https://site.test/p1", "https://site.test/shared"]))
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/broken.xml")
            .with_status(500)
            .create_async()
            .await;
        let _pages = server
            .mock("GET", "/pages.xml")
            .with_body(urlset_xml(&["https://site.test/shared", "https://site.test/about"]))
            .create_async()
            .await;

        let entries = crawler(SitemapConfig::default())
            .crawl(format!("{base}/sitemap.xml").as_str())
            .await
            .unwrap();
        let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();

        assert_eq!(
            locs,
            vec!["https://site.test/p1", "https://site.test/shared", "https://site.test/about"]
        );
    }

    #[tokio::test]
    async fn test_crawl_respects_child_limit_and_depth() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let _root = server
            .mock("GET", "/sitemap.xml")
            .with_body(sitemap_index_xml(&[
                format!("{base}/nested.xml").as_str(),
                format!("{base}/one.xml").as_str(),
                format!("{base}/two.xml").as_str(),
            ]))
            .create_async()
            .await;
        let _nested = server
            .mock("GET", "/nested.xml")
            .with_body(sitemap_index_xml(&[format!("{base}/deep.xml").as_str()]))
            .create_async()
            .await;
        let _one = server
            .mock("GET", "/one.xml")
            .with_body(urlset_xml(&["https://site.test/one"]))
            .create_async()
            .await;
        let two = server
            .mock("GET", "/two.xml")
            .with_body(urlset_xml(&["https://site.test/two"]))
            .expect(0)
            .create_async()
            .await;
        let deep = server
            .mock("GET", "/deep.xml")
            .with_body(urlset_xml(&["https://site.test/deep"]))
            .expect(0)
            .create_async()
            .await;

        let config = SitemapConfig {
            max_child_sitemaps: 2,
            max_depth: 1,
            ..SitemapConfig::default()
        };
        let entries = crawler(config)
            .crawl(format!("{base}/sitemap.xml").as_str())
            .await
            .unwrap();

        assert_eq!(entries, vec![SitemapEntry {
            loc: "https://site.test/one".into(),
            changefreq: Some("weekly".into()),
            ..Default::default()
        }]);
        two.assert_async().await;
        deep.assert_async().await;
    }

    #[tokio::test]
    async fn test_crawl_stops_at_url_limit() {
        let mut server = mockito::Server::new_async().await;
        let locs: Vec<String> = (0..20).map(|i| format!("https://site.test/{i}")).collect();
        let loc_refs: Vec<&str> = locs.iter().map(String::as_str).collect();
        let _root = server
            .mock("GET", "/sitemap.xml")
            .with_body(urlset_xml(&loc_refs))
            .create_async()
            .await;

        let config = SitemapConfig {
            max_urls: 5,
            ..SitemapConfig::default()
        };
        let entries = crawler(config)
            .crawl(&format!("{}/sitemap.xml", server.url()))
            .await
            .unwrap();
        assert_eq!(entries.len(), 5);
    }

    #[tokio::test]
    async fn test_root_failure_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/sitemap.xml")
            .with_status(404)
            .create_async()
            .await;

        let err = crawler(SitemapConfig::default())
            .crawl(&format!("{}/sitemap.xml", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 404, .. }));
    }
}
