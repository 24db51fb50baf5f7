//! Global Application State
//!
//! Toast messages shared by every page.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    });
}

pub fn use_global_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
