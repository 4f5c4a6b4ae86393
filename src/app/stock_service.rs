//! In-memory stock records served by the mock backend.
//!
//! Records live only for the lifetime of the process. Ids follow the `INV###`
//! convention with random digits; timestamps are set on every write.

use crate::domain::filter::FilterQuery;
use crate::domain::model::{fixtures, StatusPolicy, StockDraft, StockItem};
use chrono::Utc;
use rand::Rng;

pub struct StockService {
    items: Vec<StockItem>,
    policy: StatusPolicy,
}

impl StockService {
    pub fn new(policy: StatusPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    /// Starts with the fixture inventory.
    pub fn seeded(policy: StatusPolicy) -> Self {
        Self {
            items: fixtures::seed_inventory(),
            policy,
        }
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StockItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Records matching `query`, in insertion order.
    pub fn list(&self, query: &FilterQuery) -> Vec<StockItem> {
        self.items
            .iter()
            .filter(|i| query.matches(i, &self.policy))
            .cloned()
            .collect()
    }

    /// One page (1-based) of the matching records plus the total match count.
    pub fn page(&self, query: &FilterQuery, page: u32, limit: u32) -> (Vec<StockItem>, u64) {
        let matching = self.list(query);
        let total = matching.len() as u64;
        let skip = (page.max(1) as usize - 1).saturating_mul(limit as usize);
        let data = matching.into_iter().skip(skip).take(limit as usize).collect();
        (data, total)
    }

    pub fn create(&mut self, draft: StockDraft) -> StockItem {
        let id = self.fresh_id();
        let item = draft.into_item(id, today(), &self.policy);
        self.items.push(item.clone());
        tracing::info!(id = %item.id, name = %item.name, "mock backend created stock item");
        item
    }

    /// Replaces the record, keeping its id. Returns `None` for unknown ids.
    pub fn update(&mut self, id: &str, draft: StockDraft) -> Option<StockItem> {
        let slot = self.items.iter_mut().find(|i| i.id == id)?;
        *slot = draft.into_item(id.to_string(), today(), &self.policy);
        tracing::info!(id, "mock backend updated stock item");
        Some(slot.clone())
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() < before;
        if removed {
            tracing::info!(id, "mock backend deleted stock item");
        }
        removed
    }

    fn fresh_id(&self) -> String {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let candidate = format!("INV{:03}", rng.gen_range(0..1000));
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
        // Three digits are nearly exhausted; widen the range.
        loop {
            let candidate = format!("INV{:06}", rng.gen_range(0..1_000_000));
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
