use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use moka::future::Cache;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::errors::WorkoutError;
use super::raw::{RawWorkout, WorkoutPage};
use super::source::{is_plain_workout_id, WorkoutSource};
use crate::config::ApiConfig;
use crate::observability::api_metrics;

/// Upper bound on listing pages fetched, whatever `totalPages` claims
pub const MAX_LISTING_PAGES: u32 = 50;

/// Rate-limited, caching client for the studio REST backend
pub struct WorkoutClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    cache: Cache<String, Value>,
}

impl WorkoutClient {
    pub fn new(config: &ApiConfig) -> Result<Self, WorkoutError> {
        let per_second = NonZeroU32::new(config.rate_limit.requests_per_second.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.rate_limit.burst_capacity.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            rate_limiter,
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document, answering from cache when possible
    async fn get_json(&self, path: &str) -> Result<Value, WorkoutError> {
        let url = format!("{}{}", self.base_url, path);

        if let Some(cached) = self.cache.get(&url).await {
            debug!("Cache hit for {}", url);
            api_metrics().record_cache_hit();
            return Ok(cached);
        }
        api_metrics().record_cache_miss();

        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;

        debug!(url = %url, "Requesting studio API");
        api_metrics().record_request();

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.inspect_err(|_| {
            api_metrics().record_error();
        })?;

        let status = response.status();
        if !status.is_success() {
            api_metrics().record_error();
            let body = response.text().await.unwrap_or_default();
            let message = extract_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            warn!(status = status.as_u16(), url = %url, "Studio API request failed");
            return Err(WorkoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let data = unwrap_envelope(body)?;
        self.cache.insert(url, data.clone()).await;
        Ok(data)
    }

    pub async fn workout_page(&self, page: u32) -> Result<WorkoutPage, WorkoutError> {
        let data = self.get_json(&format!("/workouts?page={page}")).await?;
        parse_workout_page(data)
    }

    /// Drop cached responses (after an admin edits a workout, for example)
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
        info!("Workout client cache cleared");
    }
}

#[async_trait::async_trait]
impl WorkoutSource for WorkoutClient {
    async fn fetch_workout(&self, id: &str) -> Result<RawWorkout, WorkoutError> {
        if !is_plain_workout_id(id) {
            warn!(id = %id, "Refusing to request workout with unsafe id");
            return Err(WorkoutError::NotFound(id.to_string()));
        }
        let data = self
            .get_json(&format!("/workouts/{id}"))
            .await
            .map_err(|err| match err {
                WorkoutError::Api { status: 404, .. } => WorkoutError::NotFound(id.to_string()),
                other => other,
            })?;
        let data = match data {
            Value::Object(mut map) if map.contains_key("workout") => map
                .remove("workout")
                .unwrap_or(Value::Null),
            other => other,
        };
        Ok(serde_json::from_value(data)?)
    }

    async fn list_workouts(&self) -> Result<Vec<RawWorkout>, WorkoutError> {
        let first = self.workout_page(1).await?;
        let mut workouts = first.workouts;
        let last_page = first.total_pages.min(MAX_LISTING_PAGES);
        if last_page < first.total_pages {
            warn!(
                total_pages = first.total_pages,
                fetched = last_page,
                "Workout listing truncated"
            );
        }
        for page in 2..=last_page {
            workouts.extend(self.workout_page(page).await?.workouts);
        }
        Ok(workouts)
    }
}

/// Strip the `{ success, data, message }` wrapper the backend puts around payloads
pub fn unwrap_envelope(body: Value) -> Result<Value, WorkoutError> {
    match body {
        Value::Object(mut map) if map.contains_key("success") => {
            if map.get("success") == Some(&Value::Bool(false)) {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("request was not successful")
                    .to_string();
                return Err(WorkoutError::Rejected(message));
            }
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Accepts a bare array, `{ workouts, totalPages, ... }`, or the same nested under `data`
pub fn parse_workout_page(data: Value) -> Result<WorkoutPage, WorkoutError> {
    match data {
        Value::Array(_) => {
            let workouts: Vec<RawWorkout> = serde_json::from_value(data)?;
            Ok(WorkoutPage {
                total: workouts.len() as u64,
                workouts,
                total_pages: 1,
                current_page: 1,
            })
        }
        Value::Object(mut map) => {
            if let Some(nested) = map.remove("data") {
                if !map.contains_key("workouts") {
                    return parse_workout_page(nested);
                }
            }
            let workouts: Vec<RawWorkout> = match map.remove("workouts") {
                Some(list @ Value::Array(_)) => serde_json::from_value(list)?,
                _ => {
                    return Err(WorkoutError::UnexpectedShape(
                        "listing has no workouts array".to_string(),
                    ))
                }
            };
            let number = |key: &str| map.get(key).and_then(Value::as_u64);
            let page_number =
                |key: &str| number(key).map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX).max(1));
            Ok(WorkoutPage {
                total: number("total").unwrap_or(workouts.len() as u64),
                total_pages: page_number("totalPages"),
                current_page: page_number("currentPage"),
                workouts,
            })
        }
        _ => Err(WorkoutError::UnexpectedShape(
            "listing is neither an array nor an object".to_string(),
        )),
    }
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
