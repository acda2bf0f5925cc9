//! Pixazo FLUX.1 [schnell] image provider.

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use easel_core::error::{EaselError, EaselResult};
use easel_core::traits::{ImageConfig, ImageGenerator};
use easel_core::types::ImageReference;

const PIXAZO_API_URL: &str = "https://gateway.pixazo.ai/flux-1-schnell/v1/getData";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const MODEL_NAME: &str = "flux-1-schnell";

/// Pixazo image provider.
pub struct PixazoImageGenerator {
    client: Client,
    config: ImageConfig,
    api_key: SecretString,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    num_steps: u32,
    seed: u32,
    height: u32,
    width: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    output: Option<String>,
}

impl PixazoImageGenerator {
    /// Create a new Pixazo image provider.
    pub fn new(config: ImageConfig) -> EaselResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("PIXAZO_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                EaselError::Configuration("Pixazo API key not found. Set PIXAZO_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let endpoint = config
            .base_url
            .clone()
            .unwrap_or_else(|| PIXAZO_API_URL.to_string());
        url::Url::parse(&endpoint)
            .map_err(|e| EaselError::Configuration(format!("Invalid image URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| EaselError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key: SecretString::new(api_key),
            endpoint,
        })
    }

    fn next_seed(&self) -> u32 {
        rand::thread_rng().gen_range(0..self.config.seed_range.max(1))
    }
}

#[async_trait]
impl ImageGenerator for PixazoImageGenerator {
    async fn generate(&self, prompt: &str) -> EaselResult<ImageReference> {
        let request = GenerateRequest {
            prompt,
            num_steps: self.config.steps,
            seed: self.next_seed(),
            height: self.config.size,
            width: self.config.size,
        };

        debug!(seed = request.seed, steps = request.num_steps, "Requesting image");

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key.expose_secret().as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                EaselError::generation(format!("Pixazo API request failed: {}", e)).with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EaselError::generation_status(
                status.as_u16(),
                format!("Pixazo API error: {}", status.as_u16()),
            ));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            EaselError::generation_payload(format!("Failed to parse response: {}", e)).with_source(e)
        })?;

        body.output
            .filter(|output| !output.trim().is_empty())
            .map(ImageReference::new)
            .ok_or_else(|| EaselError::generation_payload("Pixazo response missing output"))
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        body: Value,
        seen: Arc<Mutex<Vec<(AxumHeaders, Value)>>>,
    }

    async fn stub_handler(
        State(state): State<StubState>,
        headers: AxumHeaders,
        Json(payload): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        state.seen.lock().unwrap().push((headers, payload));
        (state.status, Json(state.body.clone()))
    }

    async fn spawn_stub(status: StatusCode, body: Value) -> (String, StubState) {
        let state = StubState {
            status,
            body,
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/flux-1-schnell/v1/getData", post(stub_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/flux-1-schnell/v1/getData"), state)
    }

    fn generator_for(endpoint: String) -> PixazoImageGenerator {
        PixazoImageGenerator::new(ImageConfig {
            api_key: Some("pz-test".to_string()),
            base_url: Some(endpoint),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_output_and_sends_fixed_parameters() {
        let (url, stub) = spawn_stub(
            StatusCode::OK,
            json!({"output": "https://cdn.pixazo.test/abc.png"}),
        )
        .await;

        let image = generator_for(url)
            .generate("a reading nook with a window seat")
            .await
            .unwrap();
        assert_eq!(image.as_str(), "https://cdn.pixazo.test/abc.png");

        let seen = stub.seen.lock().unwrap();
        let (headers, payload) = &seen[0];
        assert_eq!(headers["ocp-apim-subscription-key"], "pz-test");
        assert_eq!(headers["cache-control"], "no-cache");
        assert_eq!(payload["prompt"], "a reading nook with a window seat");
        assert_eq!(payload["num_steps"], 4);
        assert_eq!(payload["height"], 512);
        assert_eq!(payload["width"], 512);
        assert!(payload["seed"].as_u64().unwrap() < 10_000);
    }

    #[tokio::test]
    async fn test_non_success_status_is_generation_error() {
        let (url, _stub) = spawn_stub(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;

        let err = generator_for(url).generate("a hallway").await.unwrap_err();
        assert!(matches!(err, EaselError::Generation { .. }));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.detail(), "Pixazo API error: 503");
    }

    #[tokio::test]
    async fn test_missing_output_is_generation_error() {
        let (url, _stub) = spawn_stub(StatusCode::OK, json!({"status": "queued"})).await;

        let err = generator_for(url).generate("a hallway").await.unwrap_err();
        assert!(matches!(err, EaselError::Generation { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_body_keeps_decode_source() {
        use std::error::Error as _;

        let (url, _stub) = spawn_stub(StatusCode::OK, json!("not an object")).await;

        let err = generator_for(url).generate("a hallway").await.unwrap_err();
        assert_eq!(err.code(), easel_core::error::ErrorCode::GenInvalidResponse);
        let source = err.source().expect("decode error is attached");
        assert!(source.downcast_ref::<reqwest::Error>().is_some());
    }

    #[test]
    fn test_seed_stays_in_range() {
        let generator = PixazoImageGenerator::new(ImageConfig {
            api_key: Some("pz-test".to_string()),
            seed_range: 3,
            ..Default::default()
        })
        .unwrap();
        assert!((0..100).all(|_| generator.next_seed() < 3));
    }
}
