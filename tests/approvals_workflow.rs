//! Approval queue and the approve-then-refetch workflow.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{bearer, connect};
use hrms_client::api::dto::{ApprovalAction, ApprovalDecision, EntityId};
use hrms_client::slices::approvals;
use serde_json::{json, Value};

fn ticket(id: u32) -> Value {
    json!({
        "id": format!("T-{id}"),
        "title": format!("Leave request {id}"),
        "status": "pending",
        "requestedBy": "ann",
    })
}

fn queue(ids: impl IntoIterator<Item = u32>, total: u64) -> Value {
    let data: Vec<Value> = ids.into_iter().map(ticket).collect();
    json!({ "data": data, "meta": { "total": total } })
}

fn approve(id: &str) -> ApprovalAction {
    ApprovalAction {
        ticket_id: EntityId::new(id),
        action: ApprovalDecision::Approve,
        remark: Some("enjoy".to_string()),
    }
}

#[tokio::test]
async fn queue_stops_at_reported_total() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::value(queue(1..=10, 20))).await;
    backend.enqueue_response(MockResponse::value(queue(11..=20, 20))).await;
    let (api, store) = connect(&backend, bearer("t"));

    approvals::fetch_approvals(&store, &api).await.unwrap();
    approvals::load_more_approvals(&store, &api).await.unwrap();

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.approvals.tickets.items().len(), 20);
    // A full page, but the total is reached.
    assert!(!state.approvals.tickets.list().has_more());
    assert!(approvals::load_more_approvals(&store, &api)
        .await
        .unwrap()
        .is_none());
    assert_eq!(backend.captured_requests().await[0].path, "/business/ticket");
}

#[tokio::test]
async fn approve_then_refetch_reloads_the_queue() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::value(queue(1..=3, 3))).await;
    backend.enqueue_response(MockResponse::value(json!({"success": true}))).await;
    backend.enqueue_response(MockResponse::value(queue(2..=3, 2))).await;
    let (api, store) = connect(&backend, bearer("t"));

    approvals::fetch_approvals(&store, &api).await.unwrap();
    approvals::approve_then_refetch(&store, &api, &approve("T-1"))
        .await
        .unwrap()
        .expect("approved");

    let state = store.snapshot().await.unwrap();
    assert!(state.approvals.action_flags().success);
    let ids: Vec<String> = state
        .approvals
        .tickets
        .items()
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(ids, vec!["T-2".to_string(), "T-3".to_string()]);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].path, "/approval-system/approval-action");
    assert_eq!(
        requests[1].json(),
        json!({"ticketId": "T-1", "action": "approve", "remark": "enjoy"})
    );
    assert_eq!(requests[2].query.as_deref(), Some("page=1&limit=10"));
}

#[tokio::test]
async fn failed_action_skips_the_refetch() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::value(queue(1..=2, 2))).await;
    backend
        .enqueue_response(MockResponse::error(403, json!("Not an approver")))
        .await;
    let (api, store) = connect(&backend, bearer("t"));

    approvals::fetch_approvals(&store, &api).await.unwrap();
    let error = approvals::approve_then_refetch(&store, &api, &approve("T-1"))
        .await
        .unwrap()
        .expect_err("forbidden");
    assert_eq!(error.status_code, Some(403));

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.approvals.action_flags().failure_message, "Not an approver");
    assert_eq!(state.approvals.tickets.items().len(), 2);
    assert_eq!(backend.captured_requests().await.len(), 2);

    approvals::reset_approval_action(&store).await.unwrap();
    assert!(store.snapshot().await.unwrap().approvals.action.is_idle());
}

#[tokio::test]
async fn failed_refetch_keeps_the_action_success() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json("{}")).await;
    backend.enqueue_response(MockResponse::raw(500, "boom")).await;
    let (api, store) = connect(&backend, bearer("t"));

    approvals::approve_then_refetch(&store, &api, &approve("T-9"))
        .await
        .unwrap()
        .expect("approved");

    let state = store.snapshot().await.unwrap();
    assert!(state.approvals.action.is_success());
    assert!(state.approvals.tickets.fetch().is_failure());
}
