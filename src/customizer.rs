use std::sync::Arc;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    client::StyleService,
    models::{GeneratedStyle, StyleResult},
    view::ViewModel,
};

pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "Professional corporate style with blue and gray colors",
    "Creative startup pitch deck with vibrant colors",
    "Academic presentation with traditional serif fonts",
    "Modern tech company with dark backgrounds",
    "Minimalist design with lots of white space",
];

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a style description";
pub const ADOPTION_NOTICE: &str = "Custom style will be applied to your presentation!";

/// Called with every style the user should adopt.
pub type StyleCallback = Arc<dyn Fn(&StyleResult) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Generated(StyleResult),
    /// The attempt failed; carries the message now shown in the error banner.
    Failed(String),
    EmptyPrompt,
    /// Another request is still in flight.
    Busy,
    /// The request was cancelled or superseded before it settled.
    Abandoned,
    Unmounted,
}

#[derive(Debug)]
struct State {
    prompt: String,
    style: Option<GeneratedStyle>,
    request: RequestState,
    // state to return to if the in-flight request is abandoned
    previous: Option<RequestState>,
    generation: u64,
    mounted: bool,
}

impl State {
    fn abandon(&mut self) {
        self.generation += 1;
        self.request = self.previous.take().unwrap_or(RequestState::Idle);
    }
}

/// Holds the prompt, the last generated style and the request status, and
/// talks to a [`StyleService`] on submit.
pub struct StyleCustomizer {
    service: Arc<dyn StyleService>,
    on_style: Option<StyleCallback>,
    state: Mutex<State>,
}

// Restores the pre-submit state if a submit future is dropped before it settles.
struct InFlight<'a> {
    state: &'a Mutex<State>,
    generation: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled { return; }
        let mut st = self.state.lock();
        if st.generation == self.generation && st.request == RequestState::Loading {
            warn!("Style request dropped before it settled; clearing loading state");
            st.abandon();
        }
    }
}

impl StyleCustomizer {
    pub fn new(service: Arc<dyn StyleService>) -> Self {
        Self {
            service,
            on_style: None,
            state: Mutex::new(State {
                prompt: String::new(),
                style: None,
                request: RequestState::Idle,
                previous: None,
                generation: 0,
                mounted: true,
            }),
        }
    }

    pub fn with_callback(mut self, callback: impl Fn(&StyleResult) + Send + Sync + 'static) -> Self {
        self.on_style = Some(Arc::new(callback));
        self
    }

    pub fn set_prompt(&self, text: impl Into<String>) {
        self.state.lock().prompt = text.into();
    }

    /// Replace the prompt with example `index` (0-based). Never submits.
    pub fn pick_example(&self, index: usize) -> Option<&'static str> {
        let example = EXAMPLE_PROMPTS.get(index).copied()?;
        self.set_prompt(example);
        Some(example)
    }

    pub fn prompt(&self) -> String { self.state.lock().prompt.clone() }

    pub fn request_state(&self) -> RequestState { self.state.lock().request.clone() }

    pub fn style(&self) -> Option<StyleResult> {
        self.state.lock().style.as_ref().map(|g| g.style.clone())
    }

    pub fn generated_style(&self) -> Option<GeneratedStyle> { self.state.lock().style.clone() }

    pub fn is_loading(&self) -> bool { self.state.lock().request == RequestState::Loading }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        let st = self.state.lock();
        st.mounted && !st.prompt.trim().is_empty() && st.request != RequestState::Loading
    }

    /// Send the current prompt to the style service and record the result.
    pub async fn submit(&self) -> SubmitOutcome {
        let (prompt, generation) = {
            let mut st = self.state.lock();
            if !st.mounted {
                return SubmitOutcome::Unmounted;
            }
            // checked first so nothing can overwrite Loading while a request runs
            if st.request == RequestState::Loading {
                warn!("Ignoring submit while a style request is in flight");
                return SubmitOutcome::Busy;
            }
            if st.prompt.trim().is_empty() {
                st.request = RequestState::Error(EMPTY_PROMPT_MESSAGE.to_string());
                return SubmitOutcome::EmptyPrompt;
            }
            st.generation += 1;
            st.previous = Some(std::mem::replace(&mut st.request, RequestState::Loading));
            (st.prompt.clone(), st.generation)
        };

        let mut guard = InFlight { state: &self.state, generation, settled: false };
        let result = self.service.generate_style(&prompt).await;
        guard.settled = true;

        let style = {
            let mut st = self.state.lock();
            if !st.mounted {
                info!("Discarding style response that arrived after unmount");
                return SubmitOutcome::Unmounted;
            }
            if st.generation != generation {
                info!("Discarding style response from an abandoned request");
                return SubmitOutcome::Abandoned;
            }
            st.previous = None;
            match result {
                Ok(style) => {
                    st.style = Some(GeneratedStyle { style: style.clone(), generated_at: Utc::now() });
                    st.request = RequestState::Success;
                    style
                }
                Err(e) => {
                    let msg = e.user_message();
                    st.request = RequestState::Error(msg.clone());
                    return SubmitOutcome::Failed(msg);
                }
            }
        };

        info!("🎨 Generated theme '{}'", style.theme_name);
        self.notify(&style);
        SubmitOutcome::Generated(style)
    }

    /// Abandon the in-flight request, if any. Its response is ignored when it lands.
    pub fn cancel(&self) -> bool {
        let mut st = self.state.lock();
        if st.request != RequestState::Loading {
            return false;
        }
        info!("Cancelling in-flight style request");
        st.abandon();
        true
    }

    /// Hand the current style to the callback again. Returns the notice to
    /// show, or `None` when there is nothing to adopt.
    pub fn confirm_adoption(&self) -> Option<&'static str> {
        let style = self.style()?;
        info!("✅ Adopting theme '{}'", style.theme_name);
        self.notify(&style);
        Some(ADOPTION_NOTICE)
    }

    /// Detach from the surrounding workflow. Responses still in flight are
    /// dropped and further submits do nothing.
    pub fn unmount(&self) {
        let mut st = self.state.lock();
        st.mounted = false;
        if st.request == RequestState::Loading {
            st.abandon();
        }
    }

    pub fn view(&self) -> ViewModel {
        let st = self.state.lock();
        let loading = st.request == RequestState::Loading;
        ViewModel {
            examples: EXAMPLE_PROMPTS,
            prompt: st.prompt.clone(),
            loading,
            submit_enabled: st.mounted && !loading && !st.prompt.trim().is_empty(),
            error: match &st.request {
                RequestState::Error(msg) => Some(msg.clone()),
                _ => None,
            },
            style: st.style.as_ref().map(|g| g.style.clone()),
        }
    }

    fn notify(&self, style: &StyleResult) {
        if let Some(callback) = &self.on_style {
            callback(style);
        }
    }
}
