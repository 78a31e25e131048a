use crate::config::RenderOptions;
use crate::mapper::render_document;
use crate::primitive::View;
use crate::source::{Liveness, SvgSource, spawn_fetch};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

/// Holds the current SVG text and options and renders them on demand.
///
/// Rendering never fails outward: errors are logged and yield `None`. A fetch
/// started by an older source, or finishing after the renderer is dropped,
/// is discarded.
#[derive(Debug)]
pub struct SvgRenderer {
    options: RenderOptions,
    source: Option<SvgSource>,
    document: Arc<Mutex<Option<String>>>,
    liveness: Liveness,
}

impl SvgRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            source: None,
            document: Arc::new(Mutex::new(None)),
            liveness: Liveness::new(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Current document text, if any has been set or fetched.
    pub fn document_text(&self) -> Option<String> {
        lock(&self.document).clone()
    }

    /// Switches to `source`. Inline text replaces the held document at once;
    /// a locator starts a background fetch whose handle is returned.
    pub fn set_source(&mut self, source: SvgSource) -> Option<JoinHandle<()>> {
        {
            // Cancel under the document lock so an in-flight loader either
            // finished writing or will see the cancellation.
            let mut document = lock(&self.document);
            self.liveness.cancel();
            if let SvgSource::Inline(text) = &source {
                *document = Some(text.clone());
            }
        }
        self.liveness = Liveness::new();
        let handle = match &source {
            SvgSource::Inline(_) => None,
            SvgSource::Uri(locator) => Some(spawn_fetch(
                locator.clone(),
                self.liveness.clone(),
                self.loader(),
            )),
        };
        self.source = Some(source);
        handle
    }

    /// Callback that stores fetched text if the current liveness token is
    /// still set when the document lock is taken.
    fn loader(&self) -> impl FnOnce(String) + Send + 'static {
        let document = Arc::clone(&self.document);
        let liveness = self.liveness.clone();
        move |text| {
            let mut slot = lock(&document);
            if liveness.is_alive() {
                *slot = Some(text);
            } else {
                tracing::debug!("discarding svg text from a replaced source");
            }
        }
    }

    /// Applies new inputs. A locator is re-fetched only when it differs from
    /// the current one, and inline text is replaced only when it changed.
    pub fn update(
        &mut self,
        source: Option<SvgSource>,
        options: RenderOptions,
    ) -> Option<JoinHandle<()>> {
        self.options = options;
        let source = source?;
        if self.source.as_ref() == Some(&source) {
            return None;
        }
        self.set_source(source)
    }

    /// Maps the held document. `None` when there is nothing to show or the
    /// document could not be mapped.
    pub fn render(&self) -> Option<View> {
        let text = self.document_text()?;
        match render_document(&text, &self.options) {
            Ok(view) => Some(view),
            Err(err) => {
                tracing::error!(error = %err, "failed to render svg");
                None
            }
        }
    }
}

impl Drop for SvgRenderer {
    fn drop(&mut self) {
        let _document = lock(&self.document);
        self.liveness.cancel();
    }
}

fn lock(document: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    document
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
