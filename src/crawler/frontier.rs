//! FIFO frontier of addresses awaiting fetch

use crate::url::Address;
use std::collections::{HashSet, VecDeque};

/// Breadth-first queue of addresses that rejects duplicates at enqueue time
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Address>,
    queued: HashSet<Address>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `address` to the tail unless it is already queued
    ///
    /// Returns true if the address was added.
    pub fn push(&mut self, address: Address) -> bool {
        if !self.queued.insert(address.clone()) {
            return false;
        }
        self.queue.push_back(address);
        true
    }

    /// Puts a dequeued address back at the head of the queue
    ///
    /// Used when a crawl stops between dequeuing an address and fetching it.
    pub fn requeue(&mut self, address: Address) -> bool {
        if !self.queued.insert(address.clone()) {
            return false;
        }
        self.queue.push_front(address);
        true
    }

    /// Removes and returns the head of the queue
    pub fn pop(&mut self) -> Option<Address> {
        let address = self.queue.pop_front()?;
        self.queued.remove(&address);
        Some(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.queued.contains(address)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates over queued addresses in dequeue order
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(path: &str) -> Address {
        Address::parse(&format!("https://example.test{}", path)).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(addr("/a"));
        frontier.push(addr("/b"));
        frontier.push(addr("/c"));

        assert_eq!(frontier.pop(), Some(addr("/a")));
        assert_eq!(frontier.pop(), Some(addr("/b")));
        assert_eq!(frontier.pop(), Some(addr("/c")));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_duplicates_rejected_at_enqueue() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(addr("/a")));
        assert!(!frontier.push(addr("/a")));
        assert!(!frontier.push(addr("/a#fragment")));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_popped_address_can_be_queued_again() {
        // Keeping visited addresses out is the controller's job
        let mut frontier = Frontier::new();
        frontier.push(addr("/a"));
        frontier.pop();
        assert!(!frontier.contains(&addr("/a")));
        assert!(frontier.push(addr("/a")));
    }

    #[test]
    fn test_requeue_goes_to_head() {
        let mut frontier = Frontier::new();
        frontier.push(addr("/a"));
        frontier.push(addr("/b"));
        let head = frontier.pop().unwrap();

        assert!(frontier.requeue(head));
        assert!(!frontier.requeue(addr("/b")));
        assert_eq!(frontier.pop(), Some(addr("/a")));
        assert_eq!(frontier.pop(), Some(addr("/b")));
    }

    #[test]
    fn test_iter_and_len() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        frontier.push(addr("/x"));
        frontier.push(addr("/y"));
        let paths: Vec<&str> = frontier.iter().map(|a| a.path()).collect();
        assert_eq!(paths, vec!["/x", "/y"]);
        assert_eq!(frontier.len(), 2);
    }
}
