// HTTP plumbing: relay submissions, username lookups and timers
use game::{Sleeper, Transport, TransportError};
use js_sys::Promise;
use protocol::{SubmitRequest, SubmitResponse, UsernameLookup, lookup_url};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Posts score submissions to the relay with `fetch`.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    url: String,
}

impl FetchTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Transport for FetchTransport {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, TransportError> {
        let body = request.encode()?;
        let text = fetch_text(&self.url, "POST", Some(&body)).await?;
        // Error statuses still carry a JSON body with the reason.
        Ok(SubmitResponse::decode(text.as_bytes())?)
    }
}

/// Sleeps on `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutSleeper;

impl Sleeper for TimeoutSleeper {
    async fn sleep(&self, ms: u32) {
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Ask the identity service for the username reserved by `wallet`.
pub async fn lookup_username(base: &str, wallet: &str) -> Result<Option<String>, TransportError> {
    let text = fetch_text(&lookup_url(base, wallet), "GET", None).await?;
    let lookup = UsernameLookup::decode(text.as_bytes())?;
    Ok(lookup.username().map(str::to_string))
}

async fn fetch_text(url: &str, method: &str, body: Option<&str>) -> Result<String, TransportError> {
    let window = web_sys::window().ok_or_else(|| TransportError::Network("No window".into()))?;

    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &init).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(text.as_string().unwrap_or_default())
}

/// Message of a thrown JS value, `Network error` when it has none.
fn js_error(value: JsValue) -> TransportError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Network error".to_string());
    TransportError::Network(message)
}
