//! Inventory list view-model.
//!
//! `InventoryState` holds the pure transitions (load tickets, filter edits, derived
//! views); `InventoryViewModel` drives them against an `InventoryGateway`.
//!
//! Policies:
//! - every successful mutation is followed by a full reload (no local patching);
//! - a failed load clears the collection and records the error;
//! - a load whose ticket is no longer the latest is discarded on completion.

use crate::domain::filter::{self, FilterQuery, FilterTag};
use crate::domain::model::{FacetField, StatusPolicy, StockDraft, StockItem, StockStatus};
use crate::domain::validation::{Operation, ValidationRules};
use crate::error::AppError;
use crate::infra::gateway::InventoryGateway;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    /// User-facing message of the failed load.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A later `load()` was started before this one completed.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct InventoryState {
    phase: Phase,
    items: Vec<StockItem>,
    query: FilterQuery,
    policy: StatusPolicy,
    latest_ticket: u64,
    notice: Option<String>,
}

impl InventoryState {
    pub fn new(policy: StatusPolicy, facet: FacetField) -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            query: FilterQuery::with_facet(facet),
            policy,
            latest_ticket: 0,
            notice: None,
        }
    }

    /// Enters `Loading` and returns the ticket the completion must present.
    pub fn begin_load(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.phase = Phase::Loading;
        self.latest_ticket
    }

    pub fn finish_load(
        &mut self,
        ticket: u64,
        result: Result<Vec<StockItem>, AppError>,
    ) -> LoadOutcome {
        if ticket != self.latest_ticket {
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(items) => {
                self.items = items;
                let known = self.available_facet_values();
                let dropped = self.query.retain_known(&known);
                if !dropped.is_empty() {
                    tracing::debug!(?dropped, "dropped stale facet selections");
                }
                self.phase = Phase::Ready;
            }
            Err(err) => {
                self.items.clear();
                self.phase = Phase::Error(err.user_message());
            }
        }
        LoadOutcome::Applied
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut FilterQuery {
        &mut self.query
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    pub fn filtered(&self) -> Vec<&StockItem> {
        filter::filter(&self.items, &self.query, &self.policy)
    }

    pub fn available_facet_values(&self) -> Vec<String> {
        filter::distinct_values(&self.items, self.query.facet)
    }

    pub fn active_filters(&self) -> Vec<FilterTag> {
        filter::describe_active_filters(&self.query)
    }

    /// Item count per effective status, in `StockStatus::ALL` order.
    pub fn counts_by_status(&self) -> Vec<(StockStatus, usize)> {
        StockStatus::ALL
            .iter()
            .map(|status| {
                let n = self
                    .items
                    .iter()
                    .filter(|i| i.effective_status(&self.policy) == *status)
                    .count();
                (*status, n)
            })
            .collect()
    }

    pub fn view(&self) -> InventoryView {
        InventoryView {
            phase: self.phase.clone(),
            total: self.items.len(),
            visible: self.filtered().into_iter().cloned().collect(),
            facet_values: self.available_facet_values(),
            active_filters: self.active_filters(),
            status_counts: self.counts_by_status(),
            notice: self.notice.clone(),
        }
    }
}

/// Owned snapshot of everything the list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub phase: Phase,
    pub total: usize,
    pub visible: Vec<StockItem>,
    pub facet_values: Vec<String>,
    pub active_filters: Vec<FilterTag>,
    pub status_counts: Vec<(StockStatus, usize)>,
    pub notice: Option<String>,
}

pub struct InventoryViewModel {
    gateway: Arc<dyn InventoryGateway>,
    rules: ValidationRules,
    state: Mutex<InventoryState>,
}

impl InventoryViewModel {
    pub fn new(gateway: Arc<dyn InventoryGateway>, policy: StatusPolicy, rules: ValidationRules) -> Self {
        let state = InventoryState::new(policy, rules.facet);
        Self {
            gateway,
            rules,
            state: Mutex::new(state),
        }
    }

    pub async fn load(&self) -> Result<LoadOutcome, AppError> {
        let ticket = self.state.lock().await.begin_load();
        tracing::debug!(ticket, "loading inventory");

        let result = self.gateway.list().await;

        let mut state = self.state.lock().await;
        let failure = result.as_ref().err().cloned();
        let outcome = state.finish_load(ticket, result);
        drop(state);

        match (outcome, failure) {
            (LoadOutcome::Superseded, _) => {
                tracing::debug!(ticket, "discarding superseded inventory response");
                Ok(LoadOutcome::Superseded)
            }
            (LoadOutcome::Applied, Some(err)) => {
                tracing::warn!(ticket, error = %err, "inventory load failed");
                Err(err)
            }
            (LoadOutcome::Applied, None) => Ok(LoadOutcome::Applied),
        }
    }

    pub async fn create(&self, draft: StockDraft) -> Result<StockItem, AppError> {
        self.check(Operation::Create, &draft).await?;
        match self.gateway.create(&draft).await {
            Ok(created) => {
                self.after_write().await;
                Ok(created)
            }
            Err(err) => Err(self.reject(err).await),
        }
    }

    pub async fn update(&self, id: &str, draft: StockDraft) -> Result<Option<StockItem>, AppError> {
        self.check_id(id).await?;
        self.check(Operation::Update, &draft).await?;
        match self.gateway.update(id, &draft).await {
            Ok(updated) => {
                self.after_write().await;
                Ok(updated)
            }
            Err(err) => Err(self.reject(err).await),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.check_id(id).await?;
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.after_write().await;
                Ok(())
            }
            Err(err) => Err(self.reject(err).await),
        }
    }

    async fn check(&self, op: Operation, draft: &StockDraft) -> Result<(), AppError> {
        match self.rules.validate(op, draft) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.reject(err).await),
        }
    }

    async fn check_id(&self, id: &str) -> Result<(), AppError> {
        if id.trim().is_empty() {
            return Err(self.reject(AppError::validation("id", "is required")).await);
        }
        Ok(())
    }

    /// Records the failure as a notice; the collection is left untouched.
    async fn reject(&self, err: AppError) -> AppError {
        tracing::warn!(error = %err, "inventory mutation rejected");
        self.state.lock().await.set_notice(Some(err.user_message()));
        err
    }

    async fn after_write(&self) {
        self.state.lock().await.set_notice(None);
        // A failed reload is already reflected in the phase.
        let _ = self.load().await;
    }

    pub async fn set_search(&self, text: &str) {
        self.state.lock().await.query_mut().text = text.to_string();
    }

    pub async fn toggle_category(&self, value: &str, checked: bool) {
        self.state.lock().await.query_mut().toggle_category(value, checked);
    }

    pub async fn set_status_choice(&self, choice: &str) -> Result<(), AppError> {
        self.state
            .lock()
            .await
            .query_mut()
            .set_status_choice(choice)
            .map_err(|msg| AppError::validation("status", msg))
    }

    pub async fn apply_filter(&self, tag: &FilterTag) {
        self.state.lock().await.query_mut().apply(tag);
    }

    pub async fn remove_filter(&self, tag: &FilterTag) {
        self.state.lock().await.query_mut().remove(tag);
    }

    pub async fn clear_filters(&self) {
        self.state.lock().await.query_mut().clear();
    }

    pub async fn view(&self) -> InventoryView {
        self.state.lock().await.view()
    }

    pub async fn items(&self) -> Vec<StockItem> {
        self.state.lock().await.items().to_vec()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase().clone()
    }

    pub async fn query(&self) -> FilterQuery {
        self.state.lock().await.query().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, quantity: u32) -> StockItem {
        StockItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: Some(category.to_string()),
            supplier: None,
            supplier_id: None,
            cost: None,
            price: 10.0,
            quantity,
            status: None,
            last_updated: None,
        }
    }

    #[test]
    fn stale_ticket_does_not_overwrite_newer_state() {
        let mut state = InventoryState::new(StatusPolicy::default(), FacetField::Category);
        let first = state.begin_load();
        let second = state.begin_load();

        assert_eq!(state.finish_load(second, Ok(vec![item("B", "Y", 50)])), LoadOutcome::Applied);
        assert_eq!(
            state.finish_load(first, Ok(vec![item("A", "X", 0)])),
            LoadOutcome::Superseded
        );
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id, "B");
        assert_eq!(state.phase(), &Phase::Ready);
    }

    #[test]
    fn failed_load_clears_collection() {
        let mut state = InventoryState::new(StatusPolicy::default(), FacetField::Category);
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![item("A", "X", 1)]));

        let t = state.begin_load();
        state.finish_load(t, Err(AppError::Network("refused".into())));
        assert!(state.items().is_empty());
        assert_eq!(
            state.phase(),
            &Phase::Error("Could not reach the inventory service".to_string())
        );
    }

    #[test]
    fn refresh_prunes_vanished_categories() {
        let mut state = InventoryState::new(StatusPolicy::default(), FacetField::Category);
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![item("A", "X", 1), item("B", "Y", 1)]));
        state.query_mut().toggle_category("X", true);
        state.query_mut().toggle_category("Y", true);

        let t = state.begin_load();
        state.finish_load(t, Ok(vec![item("B", "Y", 1)]));
        assert_eq!(state.query().categories, vec!["Y"]);
        assert_eq!(state.active_filters(), vec![FilterTag::Category("Y".into())]);
    }

    #[test]
    fn status_counts_use_effective_status() {
        let mut state = InventoryState::new(StatusPolicy::default(), FacetField::Category);
        let mut explicit = item("C", "X", 3);
        explicit.status = Some(StockStatus::InStock);
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![item("A", "X", 0), item("B", "X", 4), explicit]));
        assert_eq!(
            state.counts_by_status(),
            vec![
                (StockStatus::InStock, 1),
                (StockStatus::LowStock, 1),
                (StockStatus::OutOfStock, 1)
            ]
        );
    }
}
