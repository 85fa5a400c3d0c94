//! Startup capability probing.
//!
//! The report is diagnostics only: operations are always attempted and fail
//! gracefully when a capability is actually missing at call time.

use std::collections::BTreeMap;
use std::process::Command;

use serde::Serialize;

use crate::desktop::types::Platform;

pub const INPUT: &str = "input-simulation";
pub const SCREEN_CAPTURE: &str = "screen-capture";
pub const WINDOW_BACKEND: &str = "window-backend";

/// Presence of each external capability, probed once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    present: BTreeMap<&'static str, bool>,
}

impl CapabilityReport {
    /// Probe every capability the automation core can use.
    pub fn probe(platform: Platform) -> Self {
        let mut present = BTreeMap::new();
        present.insert(INPUT, probe_input());
        present.insert(SCREEN_CAPTURE, probe_screen_capture());
        present.insert(WINDOW_BACKEND, probe_window_backend(platform));
        Self { present }
    }

    /// Build a report from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (&'static str, bool)>) -> Self {
        Self {
            present: entries.into_iter().collect(),
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.present.get(name).copied().unwrap_or(false)
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.present
            .iter()
            .filter(|(_, present)| !**present)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Log missing capabilities as a single warning. Never fatal.
    pub fn log_missing(&self) {
        let missing = self.missing();
        if missing.is_empty() {
            tracing::info!("All automation capabilities present");
        } else {
            tracing::warn!("Missing automation capabilities: {}", missing.join(", "));
        }
    }
}

fn probe_input() -> bool {
    enigo::Enigo::new(&enigo::Settings::default()).is_ok()
}

fn probe_screen_capture() -> bool {
    xcap::Monitor::all().map(|m| !m.is_empty()).unwrap_or(false)
}

fn probe_window_backend(platform: Platform) -> bool {
    match platform {
        Platform::Windows => true,
        Platform::Macos => tool_present("osascript", &["-e", "1"]),
        Platform::Linux => tool_present("wmctrl", &["-h"]),
        Platform::Unknown => false,
    }
}

/// The tool counts as present when it can be spawned at all; exit status is
/// irrelevant here.
fn tool_present(tool: &str, args: &[&str]) -> bool {
    Command::new(tool).args(args).output().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_absent_capabilities() {
        let report =
            CapabilityReport::from_entries([(INPUT, true), (SCREEN_CAPTURE, false), (WINDOW_BACKEND, false)]);
        assert_eq!(report.missing(), vec![SCREEN_CAPTURE, WINDOW_BACKEND]);
        assert!(report.is_present(INPUT));
        assert!(!report.is_present(SCREEN_CAPTURE));
    }

    #[test]
    fn test_unknown_capability_reads_as_absent() {
        let report = CapabilityReport::from_entries([(INPUT, true)]);
        assert!(!report.is_present("teleportation"));
    }

    #[test]
    fn test_full_report_has_nothing_missing() {
        let report = CapabilityReport::from_entries([(INPUT, true), (SCREEN_CAPTURE, true)]);
        assert!(report.missing().is_empty());
    }
}
