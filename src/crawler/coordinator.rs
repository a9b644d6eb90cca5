//! Crawl session - main traversal orchestration
//!
//! Owns the visited set, the work queue, and the rate pacing, and drives
//! each page through its lifecycle: guard checks, fetch, extraction, link
//! classification, file downloads, summarization, record emission, and
//! conditional enqueueing of child links.

use crate::config::Config;
use crate::crawler::classifier::classify;
use crate::crawler::extractor::{extract_main_text, extract_title};
use crate::crawler::fetcher::{fetch_page, PageFetch};
use crate::crawler::files::fetch_file;
use crate::output::{PageRecord, RecordSink};
use crate::summarize::Summarizer;
use crate::url::origin_prefix;
use crate::SitebriefError;
use reqwest::Client;
use scraper::Html;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// One unit of pending work: a URL at its traversal depth
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: u32,
}

/// Counters for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched, processed, and recorded
    pub pages_visited: u64,

    /// Queue items skipped (already visited or depth exceeded)
    pub pages_skipped: u64,

    /// Page fetches that failed (status or transport)
    pub fetch_failures: u64,

    /// File links that yielded usable text
    pub files_fetched: u64,

    /// Records appended to the sink
    pub records_written: u64,
}

/// Crawl session: one traversal from one seed, torn down at run end
pub struct CrawlSession<S: RecordSink> {
    config: Config,
    client: Client,
    summarizer: Summarizer,
    sink: S,
    origin_prefix: String,
    visited: HashSet<String>,
    queue: VecDeque<CrawlItem>,
    last_request: Option<Instant>,
    stats: CrawlStats,
}

impl<S: RecordSink> CrawlSession<S> {
    /// Creates a session seeded with the configured seed URL at depth 0
    pub fn new(
        config: Config,
        client: Client,
        summarizer: Summarizer,
        sink: S,
    ) -> Result<Self, SitebriefError> {
        let seed = Url::parse(&config.crawl.seed_url)?;
        let origin = origin_prefix(&seed);

        let mut queue = VecDeque::new();
        queue.push_back(CrawlItem {
            url: config.crawl.seed_url.clone(),
            depth: 0,
        });

        Ok(Self {
            config,
            client,
            summarizer,
            sink,
            origin_prefix: origin,
            visited: HashSet::new(),
            queue,
            last_request: None,
            stats: CrawlStats::default(),
        })
    }

    /// Runs the traversal until the work queue drains
    ///
    /// Every failure is downgraded to a per-node outcome; the run itself
    /// always completes.
    pub async fn run(&mut self) -> CrawlStats {
        tracing::info!(
            "Starting crawl of {} (max depth {}, follow below depth {})",
            self.config.crawl.seed_url,
            self.config.crawl.max_depth,
            self.config.crawl.link_follow_depth
        );

        while let Some(item) = self.queue.pop_front() {
            // Both bounds are enforced independently; the tighter governs.
            if item.depth > self.config.crawl.max_depth {
                self.stats.pages_skipped += 1;
                continue;
            }
            if self.visited.contains(&item.url) {
                self.stats.pages_skipped += 1;
                continue;
            }

            self.process_item(&item).await;
        }

        tracing::info!(
            "Crawl finished: {} pages visited, {} records written, {} fetch failures",
            self.stats.pages_visited,
            self.stats.records_written,
            self.stats.fetch_failures
        );

        self.stats.clone()
    }

    /// Returns the stats accumulated so far
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Processes one queue item through fetch, extraction, and emission
    async fn process_item(&mut self, item: &CrawlItem) {
        tracing::info!("Crawling: {} (depth: {})", item.url, item.depth);

        self.pace().await;

        let body = match fetch_page(&self.client, &item.url).await {
            PageFetch::Success { body } => body,
            PageFetch::HttpStatus { .. } | PageFetch::Transport { .. } => {
                // Not marked visited: another inbound path gets one retry.
                self.stats.fetch_failures += 1;
                return;
            }
        };

        // Visited before any child is enqueued, so mutual links cannot loop.
        self.visited.insert(item.url.clone());
        self.stats.pages_visited += 1;

        // The parsed document is !Send; keep it out of await scopes.
        let (title, main_text, links) = {
            let document = Html::parse_document(&body);
            let title = extract_title(&document);
            let main_text = extract_main_text(&document);
            let links = classify(
                &document,
                &item.url,
                &self.origin_prefix,
                &self.config.crawl.file_extensions,
            );
            (title, main_text, links)
        };

        let mut file_texts: BTreeMap<String, String> = BTreeMap::new();
        for file_url in &links.files {
            self.pace().await;
            if let Some(text) = fetch_file(&self.client, file_url).await {
                self.stats.files_fetched += 1;
                file_texts.insert(file_url.clone(), text);
            }
        }

        let summary = self.summarizer.summarize(&main_text, &file_texts).await;

        let record = PageRecord {
            url: item.url.clone(),
            title,
            summary,
        };
        match self.sink.append(&record) {
            Ok(()) => self.stats.records_written += 1,
            Err(e) => tracing::error!("Failed to save record for {}: {}", item.url, e),
        }

        if item.depth < self.config.crawl.link_follow_depth {
            for link in links.pages {
                self.queue.push_back(CrawlItem {
                    url: link,
                    depth: item.depth + 1,
                });
            }
        }
    }

    /// Enforces the minimum inter-request interval
    ///
    /// Equivalent to the fixed per-request delay of the reference behavior:
    /// the first request goes out immediately, every later one waits out the
    /// remainder of the configured interval.
    async fn pace(&mut self) {
        let delay = Duration::from_millis(self.config.crawl.request_delay_ms);
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < delay {
                tokio::time::sleep(delay - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SinkError;

    /// Sink that records appended rows in memory
    #[derive(Default)]
    struct MemorySink {
        records: Vec<PageRecord>,
    }

    impl RecordSink for MemorySink {
        fn append(&mut self, record: &PageRecord) -> Result<(), SinkError> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn test_config(seed: &str) -> Config {
        crate::config::parse_config(&format!(
            "[crawl]\nseed-url = \"{}\"\nrequest-delay-ms = 0\n",
            seed
        ))
        .unwrap()
    }

    fn test_session(seed: &str) -> CrawlSession<MemorySink> {
        let config = test_config(seed);
        let client = crate::crawler::build_http_client(&config.http).unwrap();
        let summarizer = Summarizer::from_config(&config.summarizer);
        CrawlSession::new(config, client, summarizer, MemorySink::default()).unwrap()
    }

    #[test]
    fn test_session_seeds_queue_at_depth_zero() {
        let session = test_session("https://x.test/");
        assert_eq!(session.queue.len(), 1);
        assert_eq!(session.queue[0].url, "https://x.test/");
        assert_eq!(session.queue[0].depth, 0);
        assert_eq!(session.origin_prefix, "https://x.test");
    }

    #[tokio::test]
    async fn test_visited_items_are_skipped_without_fetch() {
        let mut session = test_session("https://x.test/");
        session.visited.insert("https://x.test/".to_string());

        let stats = session.run().await;
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.pages_visited, 0);
        assert!(session.sink.records.is_empty());
    }

    #[tokio::test]
    async fn test_items_beyond_max_depth_are_skipped() {
        let mut session = test_session("https://x.test/");
        session.queue.clear();
        session.queue.push_back(CrawlItem {
            url: "https://x.test/too-deep".to_string(),
            depth: 4,
        });

        let stats = session.run().await;
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.pages_visited, 0);
    }

    #[tokio::test]
    async fn test_pace_is_immediate_for_first_request() {
        let mut session = test_session("https://x.test/");
        session.config.crawl.request_delay_ms = 10_000;

        let start = std::time::Instant::now();
        session.pace().await;
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
