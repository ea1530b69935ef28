//! Reference data: buckets and designations.

use crate::api::client::ApiClient;
use crate::api::dto::{Bucket, Designation, Page, PageQuery};
use crate::api::error::ApiError;

impl ApiClient {
    /// `GET /bucket?page&limit`
    pub async fn fetch_buckets(&self, query: &PageQuery) -> Result<Page<Bucket>, ApiError> {
        self.get("/bucket", &query.to_pairs()).await
    }

    /// `GET /designation?page&limit`
    pub async fn fetch_designations(
        &self,
        query: &PageQuery,
    ) -> Result<Page<Designation>, ApiError> {
        self.get("/designation", &query.to_pairs()).await
    }
}
