//! Thin reqwest wrapper shared by the service clients

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// reqwest client bound to one base URL
///
/// Every failure mode (transport error, non-2xx status, undecodable body)
/// comes back as an [`ApiError`] tagged with the service name.
#[derive(Debug, Clone)]
pub struct HttpClient {
    service: &'static str,
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(service: &'static str, base_url: &str, headers: HeaderMap) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            service: service.to_string(),
            message: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Transport {
                service: service.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            service,
            base_url,
            client,
        })
    }

    /// `GET {base}{path}?{query}` decoded as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(service = self.service, %url, params = query.len(), "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(service = self.service, status = status.as_u16(), "Request rejected");
            return Err(ApiError::Status {
                service: self.service.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| self.transport(e))?;
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::Decode {
                service: self.service.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn transport(&self, e: reqwest::Error) -> ApiError {
        ApiError::Transport {
            service: self.service.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FitpulseError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_invalid_base_url() {
        let result = HttpClient::new("test", "not a url", HeaderMap::new());
        assert!(matches!(
            result,
            Err(FitpulseError::Api(ApiError::InvalidUrl { .. }))
        ));
    }

    #[tokio::test]
    async fn test_get_json_success_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/things"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new("test", &format!("{}/", server.uri()), HeaderMap::new()).unwrap();
        let body: serde_json::Value = client.get_json("/things", &[("limit", "3")]).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new("test", &server.uri(), HeaderMap::new()).unwrap();
        let err = client.get_json::<serde_json::Value>("/x", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            FitpulseError::Api(ApiError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new("test", &server.uri(), HeaderMap::new()).unwrap();
        let err = client.get_json::<serde_json::Value>("/x", &[]).await.unwrap_err();
        assert!(matches!(err, FitpulseError::Api(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client =
            HttpClient::new("test", &format!("http://127.0.0.1:{}", port), HeaderMap::new()).unwrap();
        let err = client.get_json::<serde_json::Value>("/x", &[]).await.unwrap_err();
        assert!(matches!(err, FitpulseError::Api(ApiError::Transport { .. })));
    }
}
