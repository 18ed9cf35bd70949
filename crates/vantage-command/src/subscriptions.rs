//! Subscription reference counting for the event connection.
//!
//! The event connection tracks three reference-counted tables: status
//! categories, object VIDs, and enhanced-log types. A subscription command
//! is only sent when a counter transitions 0 → 1, and the matching
//! de-subscription command (where the protocol has one) when it returns
//! to 0. The tables survive reconnects so active subscriptions can be
//! replayed.

use crate::client::CommandClient;
use crate::events::StatusCategory;
use vantage_common::{ClientResult, Vid};

/// `ADDSTATUS`/`DELSTATUS` accept at most this many VIDs per command.
pub(crate) const OBJECT_BATCH_SIZE: usize = 16;

/// An insertion-ordered reference-count table.
///
/// Replay order must be deterministic, so entries keep the order in which
/// they were first subscribed.
#[derive(Debug)]
pub(crate) struct CountList<K: PartialEq + Clone> {
    entries: Vec<(K, usize)>,
}

impl<K: PartialEq + Clone> Default for CountList<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone> CountList<K> {
    /// Increment the count for a key, returning the new count.
    pub fn increment(&mut self, key: K) -> usize {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *count += 1;
            *count
        } else {
            self.entries.push((key, 1));
            1
        }
    }

    /// Decrement the count for a key, returning the new count. Counts do not
    /// go below zero.
    pub fn decrement(&mut self, key: &K) -> usize {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        }
    }

    /// The current count for a key.
    #[cfg(test)]
    pub fn count(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, count)| *count)
    }

    /// Keys with a positive count, in first-subscription order.
    pub fn active(&self) -> Vec<K> {
        self.entries
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// The three subscription tables of the event connection.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionBook {
    pub statuses: CountList<StatusCategory>,
    pub objects: CountList<Vid>,
    pub event_logs: CountList<String>,
}

/// An active category-status subscription.
///
/// The protocol has no per-category unsubscribe command, so dropping the
/// last reference only decrements the counter; the category is simply not
/// replayed after the next reconnect.
#[derive(Debug)]
pub struct StatusSubscription {
    client: CommandClient,
    categories: Vec<StatusCategory>,
}

impl StatusSubscription {
    pub(crate) fn new(client: CommandClient, categories: Vec<StatusCategory>) -> Self {
        Self { client, categories }
    }

    /// Release this subscription's references.
    pub fn unsubscribe(self) {
        let mut book = self.client.book();
        for category in &self.categories {
            book.statuses.decrement(category);
        }
    }
}

/// An active per-object status subscription.
#[derive(Debug)]
pub struct ObjectSubscription {
    client: CommandClient,
    vids: Vec<Vid>,
}

impl ObjectSubscription {
    pub(crate) fn new(client: CommandClient, vids: Vec<Vid>) -> Self {
        Self { client, vids }
    }

    /// Release this subscription's references, sending `DELSTATUS` for every
    /// VID whose count reached zero.
    pub async fn unsubscribe(self) -> ClientResult<()> {
        let released: Vec<Vid> = {
            let mut book = self.client.book();
            self.vids
                .iter()
                .filter(|vid| book.objects.decrement(vid) == 0)
                .copied()
                .collect()
        };

        for chunk in released.chunks(OBJECT_BATCH_SIZE) {
            let vids: Vec<String> = chunk.iter().map(ToString::to_string).collect();
            self.client
                .event_command(format!("DELSTATUS {}", vids.join(" ")))
                .await?;
        }
        Ok(())
    }
}

/// An active enhanced-log subscription.
#[derive(Debug)]
pub struct EnhancedLogSubscription {
    client: CommandClient,
    log_types: Vec<String>,
}

impl EnhancedLogSubscription {
    pub(crate) fn new(client: CommandClient, log_types: Vec<String>) -> Self {
        Self { client, log_types }
    }

    /// Release this subscription's references, sending `ELLOG <type> OFF`
    /// for every log type whose count reached zero.
    pub async fn unsubscribe(self) -> ClientResult<()> {
        let released: Vec<String> = {
            let mut book = self.client.book();
            self.log_types
                .iter()
                .filter(|log_type| book.event_logs.decrement(log_type) == 0)
                .cloned()
                .collect()
        };

        for log_type in released {
            self.client
                .event_command(format!("ELLOG {log_type} OFF"))
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_list_increments() {
        let mut list: CountList<&str> = CountList::default();
        assert_eq!(list.increment("LOAD"), 1);
        assert_eq!(list.increment("LOAD"), 2);
        assert_eq!(list.increment("BTN"), 1);
        assert_eq!(list.count(&"LOAD"), 2);
        assert_eq!(list.active(), vec!["LOAD", "BTN"]);
    }

    #[test]
    fn test_count_list_decrements_saturating() {
        let mut list: CountList<u32> = CountList::default();
        list.increment(17);
        assert_eq!(list.decrement(&17), 0);
        assert_eq!(list.decrement(&17), 0);
        assert_eq!(list.decrement(&99), 0);
        assert!(list.active().is_empty());
    }

    #[test]
    fn test_active_preserves_insertion_order() {
        let mut list: CountList<&str> = CountList::default();
        list.increment("LOAD");
        list.increment("BTN");
        list.increment("TEMP");
        list.decrement(&"BTN");
        assert_eq!(list.active(), vec!["LOAD", "TEMP"]);
        // Resubscribing a dropped key keeps its original slot
        list.increment("BTN");
        assert_eq!(list.active(), vec!["LOAD", "BTN", "TEMP"]);
    }
}
