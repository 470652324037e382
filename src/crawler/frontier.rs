//! Traversal frontier for a single crawl
//!
//! This module handles:
//! - FIFO ordering of pending URLs (breadth-first traversal)
//! - Membership checks so a URL is queued at most once
//! - The visited set, so a processed URL is never queued again

use std::collections::{HashSet, VecDeque};

/// Pending and visited URLs of one crawl invocation
///
/// The frontier is owned by a single crawl and dropped with it; nothing is
/// shared between crawls.
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<String>,

    /// Mirror of `queue` for membership tests
    queued: HashSet<String>,

    /// URLs already dequeued, whatever their fetch outcome
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the crawl's base URL
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Adds a URL at the tail of the queue
    ///
    /// Returns `false` when the URL was already visited or is already queued.
    pub fn push(&mut self, url: &str) -> bool {
        if self.visited.contains(url) || self.queued.contains(url) {
            return false;
        }

        self.queued.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Takes the next unvisited URL and marks it visited
    ///
    /// Returns `None` once the queue is exhausted.
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            self.queued.remove(&url);

            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }

        None
    }

    /// Returns the number of URLs waiting in the queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of URLs dequeued so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Whether `url` has already been dequeued
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frontier_holds_seed() {
        let frontier = Frontier::new("https://test.com/docs");
        assert_eq!(frontier.pending(), 1);
        assert!(!frontier.is_empty());
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new("a");
        frontier.push("b");
        frontier.push("c");

        assert_eq!(frontier.next_url().as_deref(), Some("a"));
        assert_eq!(frontier.next_url().as_deref(), Some("b"));
        assert_eq!(frontier.next_url().as_deref(), Some("c"));
        assert_eq!(frontier.next_url(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_push_rejects_queued_url() {
        let mut frontier = Frontier::new("a");
        assert!(frontier.push("b"));
        assert!(!frontier.push("b"));
        assert!(!frontier.push("a"));
        assert_eq!(frontier.pending(), 2);
    }

    #[test]
    fn test_push_rejects_visited_url() {
        let mut frontier = Frontier::new("a");
        assert_eq!(frontier.next_url().as_deref(), Some("a"));
        assert!(frontier.is_visited("a"));

        assert!(!frontier.push("a"));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_visited_count_tracks_dequeues() {
        let mut frontier = Frontier::new("a");
        frontier.push("b");
        frontier.next_url();
        frontier.next_url();
        assert_eq!(frontier.visited_count(), 2);
        assert_eq!(frontier.next_url(), None);
    }
}
