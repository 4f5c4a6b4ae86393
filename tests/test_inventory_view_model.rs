//! View-model behaviour against scripted gateways: load ordering, validation
//! before any call, refetch after writes and failure handling.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stockroom::app::{LoadOutcome, Phase};
use stockroom::domain::model::FacetField;
use stockroom::infra::auth::TokenSession;
use stockroom::infra::gateway::GatewaySettings;
use stockroom::{
    AppError, FilterTag, HttpGateway, InventoryGateway, InventoryViewModel, StatusPolicy, StockDraft,
    StockItem, StockStatus, ValidationRules,
};
use tokio::sync::oneshot;

type ListReply = Result<Vec<StockItem>, AppError>;

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

fn draft(name: &str, category: &str) -> StockDraft {
    StockDraft {
        name: name.to_string(),
        category: Some(category.to_string()),
        price: Some(19.99),
        quantity: 5,
        ..Default::default()
    }
}

fn view_model(gateway: Arc<dyn InventoryGateway>) -> InventoryViewModel {
    InventoryViewModel::new(gateway, StatusPolicy::default(), ValidationRules::default())
}

/// Each `list()` call waits on the next scripted reply; the test decides when it resolves.
struct DeferredGateway {
    replies: Mutex<VecDeque<oneshot::Receiver<ListReply>>>,
    list_calls: AtomicUsize,
}

impl DeferredGateway {
    fn new(replies: Vec<oneshot::Receiver<ListReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            list_calls: AtomicUsize::new(0),
        }
    }

    async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.list_calls.load(Ordering::SeqCst) < n {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("list() was not called in time");
    }
}

#[async_trait]
impl InventoryGateway for DeferredGateway {
    async fn list(&self) -> Result<Vec<StockItem>, AppError> {
        let rx = {
            let mut replies = self.replies.lock().unwrap();
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            replies.pop_front().expect("unexpected list() call")
        };
        rx.await
            .unwrap_or_else(|_| Err(AppError::Network("reply dropped".into())))
    }

    async fn create(&self, _draft: &StockDraft) -> Result<StockItem, AppError> {
        unreachable!("not scripted")
    }

    async fn update(&self, _id: &str, _draft: &StockDraft) -> Result<Option<StockItem>, AppError> {
        unreachable!("not scripted")
    }

    async fn delete(&self, _id: &str) -> Result<(), AppError> {
        unreachable!("not scripted")
    }
}

/// In-memory backend that records every call and can be told to fail.
#[derive(Default)]
struct RecordingGateway {
    items: Mutex<Vec<StockItem>>,
    calls: Mutex<Vec<&'static str>>,
    fail_with: Mutex<Option<AppError>>,
    next_id: AtomicUsize,
}

impl RecordingGateway {
    fn with_items(items: Vec<StockItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn fail_next(&self, err: AppError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    fn record(&self, call: &'static str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InventoryGateway for RecordingGateway {
    async fn list(&self) -> Result<Vec<StockItem>, AppError> {
        self.record("list")?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, draft: &StockDraft) -> Result<StockItem, AppError> {
        self.record("create")?;
        let id = format!("NEW{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = draft
            .clone()
            .into_item(id, "2024-01-01".into(), &StatusPolicy::default());
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, draft: &StockDraft) -> Result<Option<StockItem>, AppError> {
        self.record("update")?;
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::Http {
                status: 404,
                message: "not found".into(),
            })?;
        *slot = draft
            .clone()
            .into_item(id.to_string(), "2024-01-02".into(), &StatusPolicy::default());
        // Exercise the empty-body path.
        Ok(None)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.record("delete")?;
        self.items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn latest_load_wins_when_responses_arrive_out_of_order() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let gateway = Arc::new(DeferredGateway::new(vec![first_rx, second_rx]));
    let vm = Arc::new(view_model(gateway.clone()));

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    gateway.wait_for_calls(1).await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    gateway.wait_for_calls(2).await;
    assert_eq!(vm.phase().await, Phase::Loading);

    second_tx.send(Ok(vec![item("B", "Y", 50)])).unwrap();
    assert_eq!(second.await.unwrap().unwrap(), LoadOutcome::Applied);

    first_tx.send(Ok(vec![item("A", "X", 0)])).unwrap();
    assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);

    let items = vm.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "B");
    assert_eq!(vm.phase().await, Phase::Ready);
}

#[tokio::test]
async fn stale_failure_does_not_clobber_newer_success() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let gateway = Arc::new(DeferredGateway::new(vec![first_rx, second_rx]));
    let vm = Arc::new(view_model(gateway.clone()));

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    gateway.wait_for_calls(1).await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    gateway.wait_for_calls(2).await;

    second_tx.send(Ok(vec![item("B", "Y", 50)])).unwrap();
    second.await.unwrap().unwrap();
    first_tx
        .send(Err(AppError::Network("connection reset".into())))
        .unwrap();

    assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);
    assert_eq!(vm.phase().await, Phase::Ready);
    assert_eq!(vm.items().await.len(), 1);
}

#[tokio::test]
async fn invalid_create_issues_no_call() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![item("A", "X", 1)]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();

    let err = vm.create(draft("   ", "X")).await.unwrap_err();
    assert_eq!(err, AppError::validation("name", "is required"));

    let err = vm
        .create(StockDraft {
            price: Some(-1.0),
            ..draft("Kettle", "X")
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(gateway.calls(), vec!["list"]);
    let view = vm.view().await;
    assert_eq!(view.total, 1);
    assert_eq!(view.notice.as_deref(), Some("Invalid price: must be a non-negative amount"));
}

#[tokio::test]
async fn blank_id_is_rejected_locally() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![item("A", "X", 1)]));
    let vm = view_model(gateway.clone());

    assert!(vm.delete("").await.unwrap_err().is_validation());
    assert!(vm.update(" ", draft("Kettle", "X")).await.unwrap_err().is_validation());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn supplier_facet_is_required_when_configured() {
    let gateway = Arc::new(RecordingGateway::default());
    let vm = InventoryViewModel::new(
        gateway.clone(),
        StatusPolicy::default(),
        ValidationRules::default().with_facet(FacetField::Supplier),
    );

    let err = vm.create(draft("Kettle", "Kitchen")).await.unwrap_err();
    assert_eq!(err, AppError::validation("supplier", "is required"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn create_then_refetch_shows_server_record() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![item("A", "X", 1)]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();

    let created = vm.create(draft("Kettle", "Kitchen")).await.unwrap();
    assert_eq!(created.id, "NEW0");

    assert_eq!(gateway.calls(), vec!["list", "create", "list"]);
    let items = vm.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].status, Some(StockStatus::LowStock));
    assert_eq!(vm.view().await.facet_values, vec!["X", "Kitchen"]);
}

#[tokio::test]
async fn delete_leaves_remaining_records() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![
        item("A", "X", 1),
        item("B", "Y", 20),
    ]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();

    vm.delete("A").await.unwrap();

    let items = vm.items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "B");
    assert_eq!(gateway.calls(), vec!["list", "delete", "list"]);
}

#[tokio::test]
async fn update_with_empty_body_still_refetches() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![item("A", "X", 1)]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();

    let echoed = vm.update("A", draft("Renamed", "X")).await.unwrap();
    assert!(echoed.is_none());
    assert_eq!(vm.items().await[0].name, "Renamed");
}

#[tokio::test]
async fn failed_mutation_keeps_collection_and_sets_notice() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![
        item("A", "X", 1),
        item("B", "Y", 20),
    ]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();
    let before = vm.items().await;

    gateway.fail_next(AppError::Http {
        status: 500,
        message: "boom".into(),
    });
    let err = vm.update("A", draft("Renamed", "X")).await.unwrap_err();
    assert!(matches!(err, AppError::Http { status: 500, .. }));

    assert_eq!(vm.items().await, before);
    assert_eq!(vm.phase().await, Phase::Ready);
    assert_eq!(
        vm.view().await.notice.as_deref(),
        Some("The server rejected the request (500)")
    );
    // No refetch after a failed write.
    assert_eq!(gateway.calls(), vec!["list", "update"]);

    // The next successful write clears the notice.
    vm.delete("B").await.unwrap();
    assert_eq!(vm.view().await.notice, None);
}

#[tokio::test]
async fn failed_load_clears_and_recovers() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![item("A", "X", 1)]));
    let vm = view_model(gateway.clone());
    vm.load().await.unwrap();

    gateway.fail_next(AppError::Network("refused".into()));
    assert!(vm.load().await.is_err());
    assert!(vm.items().await.is_empty());
    assert_eq!(
        vm.phase().await,
        Phase::Error("Could not reach the inventory service".into())
    );

    assert_eq!(vm.load().await.unwrap(), LoadOutcome::Applied);
    assert_eq!(vm.items().await.len(), 1);
}

#[tokio::test]
async fn filter_edits_flow_into_the_view() {
    let gateway = Arc::new(RecordingGateway::with_items(vec![
        item("A1", "Electronics", 45),
        item("A2", "Furniture", 0),
        item("A3", "Electronics", 3),
    ]));
    let vm = view_model(gateway);
    vm.load().await.unwrap();

    vm.toggle_category("Electronics", true).await;
    vm.set_status_choice("low-stock").await.unwrap();
    let view = vm.view().await;
    assert_eq!(view.visible.len(), 1);
    assert_eq!(view.visible[0].id, "A3");
    assert_eq!(
        view.active_filters,
        vec![
            FilterTag::Category("Electronics".into()),
            FilterTag::Status(StockStatus::LowStock)
        ]
    );

    vm.remove_filter(&FilterTag::Status(StockStatus::LowStock)).await;
    assert_eq!(vm.view().await.visible.len(), 2);

    assert!(vm.set_status_choice("sold out").await.unwrap_err().is_validation());

    vm.apply_filter(&FilterTag::Search("a2".into())).await;
    vm.clear_filters().await;
    let view = vm.view().await;
    assert_eq!(view.visible.len(), 3);
    assert!(view.active_filters.is_empty());
    assert!(vm.query().await.is_empty());
}

#[tokio::test]
async fn signed_out_session_blocks_mutation_before_sending() {
    // Nothing listens on the discard port; a sent request would surface as a network error.
    let gateway = HttpGateway::new(GatewaySettings::new("http://127.0.0.1:9"))
        .unwrap()
        .with_session(Arc::new(TokenSession::new()));
    let vm = view_model(Arc::new(gateway));

    let err = vm.create(draft("Kettle", "Kitchen")).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)), "got {:?}", err);
    let err = vm.delete("INV001").await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)), "got {:?}", err);
}
