//! REST backend.
//!
//! Talks to the incident tracker API with a bearer token. The endpoint
//! shapes are a fixed contract owned by the backend:
//!
//! - `GET    /tickets`
//! - `POST   /tickets`
//! - `PUT    /tickets/close/{id}`          body `{"closeDate": "..."}`
//! - `PUT    /tickets/reopen/{id}`
//! - `DELETE /tickets/{module}/{id}`
//! - `PUT    /tickets/breach-reason/{id}`  body is a JSON string
//! - `GET    /tickets/stats?range=Daily|Weekly|Monthly`

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use tracing::debug;

use super::{ApiError, Backend};
use crate::data::{NewTicket, Range, StatsResponse, Ticket};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend implementation over the REST API.
#[derive(Debug)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    description: String,
}

impl RestBackend {
    /// Create a client for the given base URL (e.g. `http://host:8080/api`).
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::from)?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let description = format!("api: {}", base_url);
        Ok(Self { http, base_url, token, description })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map non-2xx responses into the error taxonomy.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: status.as_u16(), body });
        }
        Ok(response)
    }

    async fn get_ticket_response(&self, response: Response) -> Result<Ticket, ApiError> {
        Self::check(response).await?.json::<Ticket>().await.map_err(ApiError::from)
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn description(&self) -> &str {
        &self.description
    }

    async fn fetch_tickets(&mut self) -> Result<Vec<Ticket>, ApiError> {
        debug!("GET /tickets");
        let response = self.authorize(self.http.get(self.url("tickets"))).send().await?;
        Self::check(response).await?.json::<Vec<Ticket>>().await.map_err(ApiError::from)
    }

    async fn fetch_stats(&mut self, range: Range) -> Result<StatsResponse, ApiError> {
        debug!("GET /tickets/stats?range={}", range.as_str());
        let response = self
            .authorize(self.http.get(self.url("tickets/stats")).query(&[("range", range.as_str())]))
            .send()
            .await?;
        Self::check(response).await?.json::<StatsResponse>().await.map_err(ApiError::from)
    }

    async fn add_ticket(&mut self, new: NewTicket) -> Result<Ticket, ApiError> {
        debug!("POST /tickets ({})", new.ticket_id);
        let response =
            self.authorize(self.http.post(self.url("tickets")).json(&new)).send().await?;
        self.get_ticket_response(response).await
    }

    async fn close_ticket(
        &mut self,
        ticket_id: &str,
        close_date: NaiveDate,
    ) -> Result<Ticket, ApiError> {
        debug!("PUT /tickets/close/{}", ticket_id);
        let body = serde_json::json!({ "closeDate": close_date.to_string() });
        let response = self
            .authorize(self.http.put(self.url(&format!("tickets/close/{ticket_id}"))).json(&body))
            .send()
            .await?;
        self.get_ticket_response(response).await
    }

    async fn reopen_ticket(&mut self, ticket_id: &str) -> Result<Ticket, ApiError> {
        debug!("PUT /tickets/reopen/{}", ticket_id);
        let response = self
            .authorize(self.http.put(self.url(&format!("tickets/reopen/{ticket_id}"))))
            .send()
            .await?;
        self.get_ticket_response(response).await
    }

    async fn delete_ticket(&mut self, module: &str, ticket_id: &str) -> Result<(), ApiError> {
        debug!("DELETE /tickets/{}/{}", module, ticket_id);
        let response = self
            .authorize(self.http.delete(self.url(&format!("tickets/{module}/{ticket_id}"))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn set_breach_reason(
        &mut self,
        ticket_id: &str,
        reason: &str,
    ) -> Result<Ticket, ApiError> {
        debug!("PUT /tickets/breach-reason/{}", ticket_id);
        // The backend expects the reason as a bare JSON string body.
        let response = self
            .authorize(
                self.http.put(self.url(&format!("tickets/breach-reason/{ticket_id}"))).json(&reason),
            )
            .send()
            .await?;
        self.get_ticket_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = RestBackend::new("http://localhost:8080/api/", None).unwrap();
        assert_eq!(backend.url("tickets"), "http://localhost:8080/api/tickets");
        assert_eq!(
            backend.url("/tickets/close/1234"),
            "http://localhost:8080/api/tickets/close/1234"
        );
    }

    #[test]
    fn test_description() {
        let backend = RestBackend::new("http://localhost:8080/api", None).unwrap();
        assert_eq!(backend.description(), "api: http://localhost:8080/api");
    }
}
