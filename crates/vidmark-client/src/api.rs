//! HTTP driver for the marker API.
//!
//! [`ApiClient`] wraps the four marker operations; [`drive`] executes the
//! network effects emitted by the reducer, strictly sequentially and in
//! order, translating each outcome back into an [`Event`]. Bulk sequences
//! continue past individual failures — a failed item is logged and counted,
//! never a reason to abandon the rest.

use std::time::Duration;

use vidmark_types::{Marker, MarkerFields, NewMarker};

use crate::error::ClientError;
use crate::state::{Effect, Event};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the marker HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API at `base_url` (scheme + authority, with
    /// or without a trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// POST /markers
    pub async fn create(&self, marker: &NewMarker) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/markers", self.base_url))
            .json(marker)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// GET /markers
    pub async fn list(&self) -> Result<Vec<Marker>, ClientError> {
        let response = self
            .http
            .get(format!("{}/markers", self.base_url))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// PUT /markers/{id}
    pub async fn update(&self, id: &str, fields: &MarkerFields) -> Result<(), ClientError> {
        let response = self
            .http
            .put(format!("{}/markers/{id}", self.base_url))
            .json(fields)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// DELETE /markers/{id}
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/markers/{id}", self.base_url))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// The result of driving one batch of effects: outcome events to feed back
/// into the reducer, and the non-network effects left for the shell.
#[derive(Debug, Default)]
pub struct Driven {
    pub events: Vec<Event>,
    pub ui: Vec<Effect>,
}

/// Executes the network effects in `effects` one at a time, in order.
///
/// Outcomes become [`Event`]s in the same order. Effects the driver does not
/// own (rendering, form handling, confirmation, downloads) pass through in
/// `ui` for the shell.
pub async fn drive(api: &ApiClient, effects: Vec<Effect>) -> Driven {
    let mut driven = Driven::default();

    for effect in effects {
        match effect {
            Effect::FetchMarkers => match api.list().await {
                Ok(markers) => driven.events.push(Event::MarkersLoaded(markers)),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch markers");
                    driven.events.push(Event::LoadFailed(e.to_string()));
                }
            },

            Effect::CreateMarker(marker) => match api.create(&marker).await {
                Ok(()) => driven.events.push(Event::SaveSucceeded),
                Err(e) => {
                    tracing::warn!(error = %e, id = %marker.id, "failed to create marker");
                    driven.events.push(Event::SaveFailed(e.to_string()));
                }
            },

            Effect::UpdateMarker { id, fields } => match api.update(&id, &fields).await {
                Ok(()) => driven.events.push(Event::SaveSucceeded),
                Err(e) => {
                    tracing::warn!(error = %e, id = %id, "failed to update marker");
                    driven.events.push(Event::SaveFailed(e.to_string()));
                }
            },

            Effect::DeleteMarker(id) => match api.delete(&id).await {
                Ok(()) => driven.events.push(Event::DeleteSucceeded),
                Err(e) => {
                    tracing::warn!(error = %e, id = %id, "failed to delete marker");
                    driven.events.push(Event::DeleteFailed(e.to_string()));
                }
            },

            Effect::CreateMany(markers) => {
                let attempted = markers.len();
                let mut failed = 0;
                for marker in markers {
                    if let Err(e) = api.create(&marker).await {
                        failed += 1;
                        tracing::warn!(error = %e, id = %marker.id, "import item failed, continuing");
                    }
                }
                driven.events.push(Event::ImportFinished { attempted, failed });
            }

            Effect::DeleteMany(ids) => {
                let attempted = ids.len();
                let mut failed = 0;
                for id in ids {
                    if let Err(e) = api.delete(&id).await {
                        failed += 1;
                        tracing::warn!(error = %e, id = %id, "clear item failed, continuing");
                    }
                }
                driven.events.push(Event::ClearFinished { attempted, failed });
            }

            ui_effect => driven.ui.push(ui_effect),
        }
    }

    driven
}
