use crate::error::{Result, SvgError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// Where the SVG text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SvgSource {
    /// Document text held in memory.
    Inline(String),
    /// An `http(s)://` URL, a `file://` URL or a filesystem path.
    Uri(String),
}

/// Shared "still interested" flag. The owner cancels it on teardown; a fetch
/// that completes afterwards drops its result.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

fn is_http(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Reads the document text behind `locator`, blocking until it arrives.
pub fn fetch_svg_text(locator: &str) -> Result<String> {
    if is_http(locator) {
        return fetch_http(locator);
    }
    let path = locator.strip_prefix("file://").unwrap_or(locator);
    let bytes = std::fs::read(Path::new(path))?;
    String::from_utf8(bytes).map_err(|err| SvgError::fetch(locator, err))
}

#[cfg(feature = "fetch")]
fn fetch_http(locator: &str) -> Result<String> {
    let response = ureq::get(locator)
        .call()
        .map_err(|err| SvgError::fetch(locator, err))?;
    response
        .into_string()
        .map_err(|err| SvgError::fetch(locator, err))
}

#[cfg(not(feature = "fetch"))]
fn fetch_http(locator: &str) -> Result<String> {
    Err(SvgError::fetch(locator, "built without the `fetch` feature"))
}

/// Fetches `locator` on a background thread. `on_loaded` runs only when the
/// fetch succeeds and `liveness` is still set at completion; failures are
/// logged and leave the caller's state alone.
///
/// The check here is advisory. A caller that can cancel concurrently must
/// re-check `liveness` inside `on_loaded` under the same lock it cancels with.
pub fn spawn_fetch<F>(locator: String, liveness: Liveness, on_loaded: F) -> JoinHandle<()>
where
    F: FnOnce(String) + Send + 'static,
{
    std::thread::spawn(move || {
        let result = fetch_svg_text(&locator);
        if !liveness.is_alive() {
            tracing::debug!(locator = %locator, "discarding fetch result after cancellation");
            return;
        }
        match result {
            Ok(text) => on_loaded(text),
            Err(err) => tracing::error!(locator = %locator, error = %err, "svg fetch failed"),
        }
    })
}
