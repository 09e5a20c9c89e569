//! Stateless HTTP request builder and response parser for the `/todo`
//! collection resource.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the I/O in between belongs to a transport.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SyncError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Envelope, ErrorBody, Item, NewItem, UpdateItem};

/// Synchronous, stateless client for the collection resource.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todo", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_item(&self, input: &NewItem) -> Result<HttpRequest, SyncError> {
        self.json_request(HttpMethod::Post, format!("{}/todo", self.base_url), input)
    }

    pub fn build_update_item(&self, id: &str, input: &UpdateItem) -> Result<HttpRequest, SyncError> {
        self.json_request(HttpMethod::Put, format!("{}/todo/{id}", self.base_url), input)
    }

    pub fn build_delete_item(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/todo/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode `{"data": [...]}` into the collection, in server order.
    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, SyncError> {
        check_status(&response)?;
        decode::<Envelope<Vec<Item>>>(&response.body).map(|envelope| envelope.data)
    }

    /// Only the status matters; the body of a successful write is not read.
    pub fn parse_add_item(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, SyncError> {
        check_status(&response)?;
        decode::<Envelope<Item>>(&response.body).map(|envelope| envelope.data)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response)
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        input: &T,
    ) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_string(input).map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    serde_json::from_str(body).map_err(|e| SyncError::Parse(e.to_string()))
}

/// Map non-2xx status codes to the matching `SyncError` variant, preferring
/// the server's `detail` message over the raw body.
fn check_status(response: &HttpResponse) -> Result<(), SyncError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(SyncError::NotFound);
    }
    let body = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|err| err.detail)
        .unwrap_or_else(|_| response.body.clone());
    Err(SyncError::Server {
        status: response.status,
        body,
    })
}
