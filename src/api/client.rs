use crate::api::models::{
    CustomLineageData, ErrorBody, InvalidElementId, ItemData, LineageData, LineageStep,
    OptimizeLineageResponse, RecipesData, ShareLineagePayload, ShareLineageResponse,
    UnknownElement, UsesData,
};
use crate::api::request::{QueryParams, RequestOptions, build_url, merge_request_options};
use crate::api::response::{ApiResult, RawResponse};
use crate::error::{ApiError, TransportError};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://infinibrowser.wiki/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const USER_AGENT: &str = concat!("infinibrowser/", env!("CARGO_PKG_VERSION"));
const ACCEPTED_ENCODINGS: &str = "gzip, deflate, identity";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Applied to every request before the call's own options.
    pub base_request: Option<RequestOptions>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            base_request: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
            base_request: None,
        }
    }

    pub fn with_base_request(mut self, options: RequestOptions) -> Self {
        self.base_request = Some(options);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Partial configuration accepted by [`InfinibrowserClient::refine`].
#[derive(Debug, Clone, Default)]
pub struct RefineConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub base_request: Option<RequestOptions>,
}

#[derive(Debug, Clone)]
pub struct InfinibrowserClient {
    client: Client,
    config: ClientConfig,
}

impl InfinibrowserClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| ApiError::ClientInit {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Client against the public service with the default timeout.
    pub fn default_client() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Derive a new client with `partial` layered over this client's config.
    ///
    /// The connection pool is shared; `self` is left untouched.
    pub fn refine(&self, partial: RefineConfig) -> Self {
        let base_request = match (&self.config.base_request, &partial.base_request) {
            (None, None) => None,
            (current, next) => Some(merge_request_options([current.as_ref(), next.as_ref()])),
        };

        Self {
            client: self.client.clone(),
            config: ClientConfig {
                base_url: partial
                    .base_url
                    .unwrap_or_else(|| self.config.base_url.clone()),
                timeout_ms: partial.timeout_ms.unwrap_or(self.config.timeout_ms),
                base_request,
            },
        }
    }

    /// Look up a single element by id.
    pub async fn get_item(&self, id: &str) -> ApiResult<ItemData, UnknownElement> {
        self.get("/item", &QueryParams::new().push("id", Some(id)))
            .await
    }

    /// Recipes producing `id`, starting at `offset` (0 when `None`).
    pub async fn get_recipes(
        &self,
        id: &str,
        offset: Option<u32>,
    ) -> ApiResult<RecipesData, UnknownElement> {
        let params = QueryParams::new()
            .push("id", Some(id))
            .push("offset", Some(offset.unwrap_or(0)));
        self.get("/recipes", &params).await
    }

    /// Recipes that use `id` as an input, starting at `offset` (0 when `None`).
    pub async fn get_uses(
        &self,
        id: &str,
        offset: Option<u32>,
    ) -> ApiResult<UsesData, UnknownElement> {
        let params = QueryParams::new()
            .push("id", Some(id))
            .push("offset", Some(offset.unwrap_or(0)));
        self.get("/uses", &params).await
    }

    pub async fn get_lineage(&self, id: &str) -> ApiResult<LineageData, UnknownElement> {
        self.get("/recipe", &QueryParams::new().push("id", Some(id)))
            .await
    }

    pub async fn get_custom_lineage(
        &self,
        id: &str,
    ) -> ApiResult<CustomLineageData, InvalidElementId> {
        self.get("/recipe/custom", &QueryParams::new().push("id", Some(id)))
            .await
    }

    pub async fn optimize_lineage(
        &self,
        id: &str,
    ) -> ApiResult<OptimizeLineageResponse, ErrorBody> {
        self.post::<_, _, ()>(
            "/optimize-lineage",
            &QueryParams::new().push("id", Some(id)),
            None,
        )
        .await
    }

    /// Publish a lineage. The last step's result element names the share.
    ///
    /// Fails with [`ApiError::EmptyLineage`] before any request when `steps`
    /// is empty.
    pub async fn share_lineage(
        &self,
        steps: &[LineageStep],
    ) -> Result<ApiResult<ShareLineageResponse, ErrorBody>, ApiError> {
        let payload = ShareLineagePayload::from_steps(steps).ok_or(ApiError::EmptyLineage)?;

        Ok(self
            .post("/analytics/share", &QueryParams::new(), Some(&payload))
            .await)
    }

    /// GET `path` with JSON accepted.
    pub async fn get<T, E>(&self, path: &str, params: &QueryParams) -> ApiResult<T, E>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let url = build_url(&self.config.base_url, path, params);
        let options = RequestOptions::new()
            .method(Method::GET)
            .typed_header(ACCEPT, HeaderValue::from_static("application/json"));

        self.send(path, url, options).await
    }

    /// POST `payload` as JSON to `path`; `None` sends `{}`.
    pub async fn post<T, E, P>(
        &self,
        path: &str,
        params: &QueryParams,
        payload: Option<&P>,
    ) -> ApiResult<T, E>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = match payload {
            Some(payload) => match serde_json::to_string(payload) {
                Ok(body) => body,
                Err(source) => {
                    return ApiResult::Transport(TransportError::Syntax {
                        endpoint: path.to_string(),
                        source,
                    });
                }
            },
            None => "{}".to_string(),
        };

        let url = build_url(&self.config.base_url, path, params);
        let options = RequestOptions::new()
            .method(Method::POST)
            .typed_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body);

        self.send(path, url, options).await
    }

    async fn send<T, E>(
        &self,
        endpoint: &str,
        url: Result<Url, TransportError>,
        options: RequestOptions,
    ) -> ApiResult<T, E>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        let url = match url {
            Ok(url) => url,
            Err(error) => {
                log::warn!("Not sending request to {}: {}", endpoint, error);
                return ApiResult::Transport(error);
            }
        };

        let encoding = RequestOptions::new().typed_header(
            ACCEPT_ENCODING,
            HeaderValue::from_static(ACCEPTED_ENCODINGS),
        );
        let merged = merge_request_options([
            self.config.base_request.as_ref(),
            Some(&options),
            Some(&encoding),
        ]);

        let method = merged.method.unwrap_or(Method::GET);
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).headers(merged.headers);
        if let Some(body) = merged.body {
            request = request.body(body);
        }

        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let url = response.url().clone();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse {
                status,
                headers,
                url,
                body,
            })
        };

        // The deadline covers the body read as well as the headers.
        let timeout_ms = self.config.timeout_ms;
        let raw_response = match tokio::time::timeout(self.config.timeout(), exchange).await {
            Ok(Ok(raw_response)) => raw_response,
            Ok(Err(source)) if source.is_timeout() => {
                return timed_out(endpoint, timeout_ms);
            }
            Ok(Err(source)) => {
                log::warn!("Request to {} failed: {}", endpoint, source);
                return ApiResult::Transport(TransportError::Request {
                    endpoint: endpoint.to_string(),
                    source,
                });
            }
            Err(_) => return timed_out(endpoint, timeout_ms),
        };

        log::debug!("{} answered {}", endpoint, raw_response.status);
        decode(endpoint, raw_response)
    }
}

fn timed_out<T, E>(endpoint: &str, timeout_ms: u64) -> ApiResult<T, E> {
    log::warn!("Request to {} timed out after {}ms", endpoint, timeout_ms);
    ApiResult::Transport(TransportError::Timeout {
        timeout_ms,
        endpoint: endpoint.to_string(),
    })
}

fn decode<T, E>(endpoint: &str, raw_response: RawResponse) -> ApiResult<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let syntax_error = |source| {
        log::warn!("Response from {} is not valid JSON", endpoint);
        ApiResult::Transport(TransportError::Syntax {
            endpoint: endpoint.to_string(),
            source,
        })
    };

    if raw_response.status.is_success() {
        match serde_json::from_str::<T>(&raw_response.body) {
            Ok(data) => ApiResult::Success { data, raw_response },
            Err(source) => syntax_error(source),
        }
    } else {
        match serde_json::from_str::<E>(&raw_response.body) {
            Ok(data) => ApiResult::NotOk { data, raw_response },
            Err(source) => syntax_error(source),
        }
    }
}
