//! Scripted in-memory driver for unit tests.
//!
//! Elements are keyed by the rendered target string and carry a visibility
//! schedule, so tests can script "appears after N probes" flakiness and then
//! assert exactly which targets were probed, clicked, or filled.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{Driver, DriverError, LoadState, Target};

/// Scripted state for one element key.
#[derive(Clone, Debug)]
pub struct StubElement {
    pub visible: bool,
    pub enabled: bool,
    pub text: Option<String>,
    pub value: Option<String>,
    pub attributes: HashMap<String, String>,
    /// Number of nodes `count` reports for this key.
    pub matches: usize,
    /// Becomes visible starting with this probe (1-based); 0 uses `visible`.
    pub appears_on_probe: u32,
}

impl StubElement {
    pub fn visible() -> Self {
        Self {
            visible: true,
            enabled: true,
            text: None,
            value: None,
            attributes: HashMap::new(),
            matches: 1,
            appears_on_probe: 0,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::visible()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_matches(mut self, matches: usize) -> Self {
        self.matches = matches;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Hidden until the given 1-based visibility probe, visible from then on.
    pub fn appearing_on_probe(mut self, probe: u32) -> Self {
        self.visible = false;
        self.appears_on_probe = probe;
        self
    }
}

#[derive(Default)]
struct StubState {
    url: String,
    history: Vec<String>,
    elements: HashMap<String, StubElement>,
    probes_seen: HashMap<String, u32>,
    probe_log: Vec<String>,
    click_log: Vec<String>,
    fill_log: Vec<(String, String)>,
    failing_urls: Vec<String>,
    failing_clicks: Vec<String>,
    click_navigations: HashMap<String, String>,
}

/// Scripted [`Driver`] implementation.
#[derive(Default)]
pub struct StubDriver {
    state: Mutex<StubState>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an element under the rendered target key.
    pub fn insert(&self, target: &Target, element: StubElement) {
        self.lock().elements.insert(target.to_string(), element);
    }

    /// Make `navigate` to this URL fail.
    pub fn fail_navigation(&self, url: impl Into<String>) {
        self.lock().failing_urls.push(url.into());
    }

    /// Make `click` on this target fail.
    pub fn fail_click(&self, target: &Target) {
        self.lock().failing_clicks.push(target.to_string());
    }

    /// Clicking the target moves the driver to the given URL.
    pub fn navigate_on_click(&self, target: &Target, url: impl Into<String>) {
        self.lock()
            .click_navigations
            .insert(target.to_string(), url.into());
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.lock().url = url.into();
    }

    /// How many visibility probes a target has received.
    pub fn probes(&self, target: &Target) -> u32 {
        self.lock()
            .probes_seen
            .get(&target.to_string())
            .copied()
            .unwrap_or(0)
    }

    pub fn probe_log(&self) -> Vec<String> {
        self.lock().probe_log.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.lock().click_log.clone()
    }

    pub fn fills(&self) -> Vec<(String, String)> {
        self.lock().fill_log.clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().expect("stub driver state poisoned")
    }
}

#[async_trait]
impl Driver for StubDriver {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut state = self.lock();
        if state.failing_urls.iter().any(|u| u == url) {
            return Err(DriverError::Navigation(format!("scripted failure: {url}")));
        }
        debug!(url, "stub navigate");
        state.history.push(url.to_string());
        state.url = url.to_string();
        Ok(())
    }

    async fn go_back(&self) -> Result<(), DriverError> {
        let mut state = self.lock();
        state.history.pop();
        state.url = state.history.last().cloned().unwrap_or_default();
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.lock().url.clone())
    }

    async fn count(&self, target: &Target) -> Result<usize, DriverError> {
        Ok(self
            .lock()
            .elements
            .get(&target.to_string())
            .map(|e| e.matches)
            .unwrap_or(0))
    }

    async fn is_visible(&self, target: &Target, _timeout: Duration) -> Result<bool, DriverError> {
        let key = target.to_string();
        let mut state = self.lock();
        let seen = state.probes_seen.entry(key.clone()).or_insert(0);
        *seen += 1;
        let seen = *seen;
        state.probe_log.push(key.clone());
        Ok(match state.elements.get(&key) {
            Some(element) if element.appears_on_probe > 0 => seen >= element.appears_on_probe,
            Some(element) => element.visible,
            None => false,
        })
    }

    async fn is_enabled(&self, target: &Target, _timeout: Duration) -> Result<bool, DriverError> {
        Ok(self
            .lock()
            .elements
            .get(&target.to_string())
            .map(|e| e.enabled)
            .unwrap_or(false))
    }

    async fn click(&self, target: &Target) -> Result<(), DriverError> {
        let key = target.to_string();
        let mut state = self.lock();
        if state.failing_clicks.iter().any(|k| k == &key) {
            return Err(DriverError::Backend(format!("scripted click failure: {key}")));
        }
        state.click_log.push(key.clone());
        if let Some(url) = state.click_navigations.get(&key).cloned() {
            state.history.push(url.clone());
            state.url = url;
        }
        Ok(())
    }

    async fn fill(&self, target: &Target, text: &str) -> Result<(), DriverError> {
        let key = target.to_string();
        let mut state = self.lock();
        state.fill_log.push((key.clone(), text.to_string()));
        if let Some(element) = state.elements.get_mut(&key) {
            element.value = Some(text.to_string());
        }
        Ok(())
    }

    async fn text_content(&self, target: &Target) -> Result<Option<String>, DriverError> {
        Ok(self
            .lock()
            .elements
            .get(&target.to_string())
            .and_then(|e| e.text.clone()))
    }

    async fn input_value(&self, target: &Target) -> Result<Option<String>, DriverError> {
        Ok(self
            .lock()
            .elements
            .get(&target.to_string())
            .and_then(|e| e.value.clone()))
    }

    async fn attribute(
        &self,
        target: &Target,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(self
            .lock()
            .elements
            .get(&target.to_string())
            .and_then(|e| e.attributes.get(name).cloned()))
    }

    async fn wait_for_load(
        &self,
        _state: LoadState,
        _timeout: Duration,
    ) -> Result<(), DriverError> {
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        // PNG signature followed by an empty payload; enough for attach tests.
        Ok(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
    }
}
