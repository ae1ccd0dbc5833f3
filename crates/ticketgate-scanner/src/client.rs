//! HTTP client for a running TicketGate node.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use ticketgate_core::wire::{
    ErrorResponse, RegistrationsResponse, StatusResponse, VerifyRequest, VerifyResponse,
};
use ticketgate_core::TicketCard;

use crate::error::ScannerError;

/// Raw answer from the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReply {
    pub status: u16,
    pub body: VerifyResponse,
}

/// Talks to one node's HTTP API.
#[derive(Debug, Clone)]
pub struct VerifierClient {
    endpoint: Url,
    http: Client,
}

impl VerifierClient {
    /// Create a client for the node at `endpoint`, e.g. `http://127.0.0.1:9101`.
    pub fn new(endpoint: &str) -> Result<Self, ScannerError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ScannerError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        Ok(Self {
            endpoint,
            http: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Append path segments to the endpoint, keeping any prefix it has.
    fn url(&self, segments: &[&str]) -> Result<Url, ScannerError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ScannerError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Post a reference id to `/api/verify`.
    ///
    /// Any HTTP status is returned as a reply; only transport failures are
    /// errors. A body that is not valid JSON becomes an empty response.
    pub async fn verify(&self, reference_id: &str) -> Result<VerifyReply, ScannerError> {
        let url = self.url(&["api", "verify"])?;
        let body = VerifyRequest {
            reference_id: reference_id.to_string(),
        };

        tracing::debug!(%url, reference_id, "posting verify request");
        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice::<VerifyResponse>(&bytes).unwrap_or_else(|e| {
            tracing::warn!(status, error = %e, "verify response was not valid JSON");
            VerifyResponse::default()
        });

        Ok(VerifyReply { status, body })
    }

    /// Fetch `/api/v1/status`.
    pub async fn status(&self) -> Result<StatusResponse, ScannerError> {
        self.get_json(&["api", "v1", "status"]).await
    }

    /// Fetch every registration the node holds.
    pub async fn registrations(&self) -> Result<RegistrationsResponse, ScannerError> {
        self.get_json(&["api", "v1", "registrations"]).await
    }

    /// Fetch the ticket card for one registration.
    pub async fn ticket(&self, reference_id: &str) -> Result<TicketCard, ScannerError> {
        self.get_json(&["api", "v1", "registrations", reference_id, "ticket"])
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ScannerError> {
        let url = self.url(segments)?;
        self.fetch(url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ScannerError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let error = match resp.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ScannerError::Http {
            status: status.as_u16(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            VerifierClient::new("not a url"),
            Err(ScannerError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_url_join() {
        let client = VerifierClient::new("http://127.0.0.1:9101").unwrap();
        assert_eq!(
            client.url(&["api", "verify"]).unwrap().as_str(),
            "http://127.0.0.1:9101/api/verify"
        );
    }

    #[test]
    fn test_url_keeps_endpoint_prefix() {
        for endpoint in [
            "http://gate.example.org/ticketgate",
            "http://gate.example.org/ticketgate/",
        ] {
            let client = VerifierClient::new(endpoint).unwrap();
            assert_eq!(
                client.url(&["api", "verify"]).unwrap().as_str(),
                "http://gate.example.org/ticketgate/api/verify",
                "endpoint: {endpoint}"
            );
            assert_eq!(
                client.url(&["api", "v1", "status"]).unwrap().as_str(),
                "http://gate.example.org/ticketgate/api/v1/status"
            );
        }
    }

    #[test]
    fn test_url_escapes_reference_id_segment() {
        let client = VerifierClient::new("http://127.0.0.1:9101").unwrap();
        let url = client
            .url(&["api", "v1", "registrations", "a/b c", "ticket"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9101/api/v1/registrations/a%2Fb%20c/ticket"
        );
    }

    #[tokio::test]
    async fn test_verify_unreachable_node() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = VerifierClient::new("http://127.0.0.1:9").unwrap();
        let result = client.verify("4234567890").await;
        assert!(matches!(result, Err(ScannerError::Transport(_))));
    }
}
