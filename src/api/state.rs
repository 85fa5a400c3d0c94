use crate::capabilities::CapabilityReport;
use crate::desktop::types::Platform;
use crate::desktop::AutomationDispatcher;

/// Shared application state
pub struct AppState {
    /// Platform resolved once at startup; read-only afterwards.
    pub platform: Platform,

    /// Startup capability probe, consulted for diagnostics only.
    pub capabilities: CapabilityReport,

    /// Process-long automation dispatcher.
    pub dispatcher: AutomationDispatcher,
}

impl AppState {
    pub fn new() -> Self {
        let platform = Platform::current();
        tracing::info!("Resolved platform: {}", platform.as_str());

        let capabilities = CapabilityReport::probe(platform);
        capabilities.log_missing();

        Self {
            platform,
            capabilities,
            dispatcher: AutomationDispatcher::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
