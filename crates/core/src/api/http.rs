//! # HTTP Catalog Client
//!
//! reqwest-backed `CatalogApi` implementation. Sessions ride a cookie jar,
//! so `login` must succeed on the same client instance before the catalog
//! routes accept requests.
//!
//! Status translation: 401 -> `Unauthorized`, 5xx -> `Server`,
//! 304 -> `NotModified` (update only), other 4xx -> `Validation` carrying
//! the server's `{"message": ...}` body verbatim, transport failure ->
//! `Network`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{CatalogApi, UpdateOutcome};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{Game, GameDraft};

/// Error body shape used by the remote API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Login/register payload.
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Production catalog client.
pub struct HttpCatalogApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// Build a client with a cookie store and a 10s request timeout.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Open a session; later catalog calls reuse the cookie it sets.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    /// Create an account. The password/confirmation check is client-side,
    /// matching the registration form's behavior.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> ApiResult<()> {
        if password != confirm_password {
            return Err(ApiError::Validation {
                message: "passwords do not match".to_string(),
            });
        }
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    /// Close the session.
    pub async fn logout(&self) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_page(&self, offset: u64, limit: u64) -> ApiResult<Vec<Game>> {
        let response = self
            .client
            .get(self.url("/game/all"))
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }
        response.json::<Vec<Game>>().await.map_err(|err| {
            ApiError::Server {
                message: format!("malformed page response: {err}"),
            }
        })
    }

    async fn create(&self, draft: &GameDraft) -> ApiResult<()> {
        let response = self
            .client
            .post(self.url("/game/new"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn update(&self, id: &str, draft: &GameDraft) -> ApiResult<UpdateOutcome> {
        let response = self
            .client
            .patch(self.url(&format!("/game/update/{id}")))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        read_update_outcome(response).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/game/delete/{id}")))
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }

    async fn next_identifier(&self, category_code: &str) -> ApiResult<String> {
        let response = self
            .client
            .get(self.url(&format!("/game/next-id/{category_code}")))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(read_failure(response).await);
        }
        response.text().await.map_err(|err| ApiError::Server {
            message: format!("malformed identifier response: {err}"),
        })
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Network {
        message: err.to_string(),
    }
}

/// Interpret an update response; 304 is a successful no-op, not a failure.
async fn read_update_outcome(response: Response) -> ApiResult<UpdateOutcome> {
    if response.status() == StatusCode::NOT_MODIFIED {
        return Ok(UpdateOutcome::NotModified);
    }
    if !response.status().is_success() {
        return Err(read_failure(response).await);
    }
    Ok(UpdateOutcome::Updated)
}

async fn expect_success(response: Response) -> ApiResult<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(read_failure(response).await)
    }
}

/// Translate a non-success response into the error taxonomy.
async fn read_failure(response: Response) -> ApiError {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }
    if status.is_server_error() {
        return ApiError::Server {
            message: format!("http {status}"),
        };
    }

    // Other 4xx: the server explains itself in the body.
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("http {status}"),
    };
    ApiError::Validation { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> HttpCatalogApi {
        HttpCatalogApi::new(&ApiConfig::new("http://localhost:4000/")).unwrap()
    }

    #[test]
    fn test_url_join() {
        let api = api();
        assert_eq!(api.url("/game/all"), "http://localhost:4000/game/all");
        assert_eq!(
            api.url("/game/update/GAMEA0001"),
            "http://localhost:4000/game/update/GAMEA0001"
        );
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords_before_sending() {
        // Unroutable base URL: the check must fire before any request.
        let api = HttpCatalogApi::new(&ApiConfig::new("http://localhost:1")).unwrap();
        let err = api.register("user", "secret", "secert").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation {
                message: "passwords do not match".to_string()
            }
        );
    }

    #[test]
    fn test_error_body_parse() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"name is required"}"#).unwrap();
        assert_eq!(body.message, "name is required");
    }

    fn response(status: u16, body: &str) -> Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_401_maps_to_unauthorized() {
        let err = read_failure(response(401, "")).await;
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[tokio::test]
    async fn test_5xx_maps_to_server() {
        let err = read_failure(response(500, "")).await;
        assert_eq!(
            err,
            ApiError::Server {
                message: "http 500 Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_4xx_surfaces_server_message_verbatim() {
        let err = read_failure(response(400, r#"{"message":"name is required"}"#)).await;
        assert_eq!(
            err,
            ApiError::Validation {
                message: "name is required".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_4xx_without_usable_body_falls_back_to_status() {
        let err = read_failure(response(404, "not json")).await;
        assert_eq!(
            err,
            ApiError::Validation {
                message: "http 404 Not Found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_304_is_not_modified() {
        let outcome = read_update_outcome(response(304, "")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::NotModified);

        let outcome = read_update_outcome(response(200, "")).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Updated);
    }

    #[tokio::test]
    async fn test_update_failure_uses_the_same_mapping() {
        let err = read_update_outcome(response(401, "")).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }
}
