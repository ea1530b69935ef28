//! `/users` endpoints.

use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::dto::{Ack, EntityId, ListBody, NewUser, Page, PageQuery, Role, User, UserUpdate};
use crate::api::error::ApiError;
use crate::config::AuthScope;

impl ApiClient {
    /// `GET /users?page&limit[&search]`
    pub async fn fetch_users(&self, query: &PageQuery) -> Result<Page<User>, ApiError> {
        self.get("/users", &query.to_pairs()).await
    }

    /// `POST /users`
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.send(Method::POST, "/users", Some(user), AuthScope::Api)
            .await
    }

    /// `PATCH /users/{id}`
    pub async fn update_user(&self, id: &EntityId, update: &UserUpdate) -> Result<User, ApiError> {
        self.send_to_item(Method::PATCH, "/users", id.as_str(), Some(update), AuthScope::Api)
            .await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, id: &EntityId) -> Result<Ack, ApiError> {
        self.send_to_item::<(), Ack>(Method::DELETE, "/users", id.as_str(), None, AuthScope::Api)
            .await
    }

    /// `GET /users/roles`
    pub async fn fetch_roles(&self) -> Result<Vec<Role>, ApiError> {
        let body: ListBody<Role> = self.get("/users/roles", &[]).await?;
        Ok(body.into_vec())
    }
}
