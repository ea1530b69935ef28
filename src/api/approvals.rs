//! Approval queue and approval actions.

use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::dto::{Ack, ApprovalAction, ApprovalTicket, Page, PageQuery};
use crate::api::error::ApiError;
use crate::config::AuthScope;

impl ApiClient {
    /// `GET /business/ticket?page&limit[&status]`
    pub async fn fetch_approval_tickets(
        &self,
        query: &PageQuery,
    ) -> Result<Page<ApprovalTicket>, ApiError> {
        self.get("/business/ticket", &query.to_pairs()).await
    }

    /// `POST /approval-system/approval-action`
    pub async fn submit_approval_action(&self, action: &ApprovalAction) -> Result<Ack, ApiError> {
        self.send(
            Method::POST,
            "/approval-system/approval-action",
            Some(action),
            AuthScope::Api,
        )
        .await
    }
}
