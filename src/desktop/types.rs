use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Operating system family, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
    Unknown,
}

impl Platform {
    /// Resolve the platform the process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Macos => "macos",
            Platform::Linux => "linux",
            Platform::Unknown => "unknown",
        }
    }
}

/// Platform-opaque window identifier.
///
/// Each backend produces and consumes only its own variant; handles are never
/// compared across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WindowHandle {
    /// Win32 window handle value.
    Hwnd(u64),
    /// Window-manager window ID as printed by `wmctrl -l`, e.g. "0x04a00007".
    XId(String),
    /// Owning process name, the scripting-bridge focus target on macOS.
    Process(String),
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowHandle::Hwnd(value) => write!(f, "{}", value),
            WindowHandle::XId(id) => f.write_str(id),
            WindowHandle::Process(name) => f.write_str(name),
        }
    }
}

/// A single open window as reported by the platform backend.
///
/// Produced fresh on every enumeration call; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowInfo {
    pub title: String,
    pub identifier: WindowHandle,
    /// Platform-specific fields: pid, desktop index, host, owning app.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, String>,
}

impl WindowInfo {
    pub fn new(title: impl Into<String>, identifier: WindowHandle) -> Self {
        Self {
            title: title.into(),
            identifier,
            extra: HashMap::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<String>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Uniform result of every automation operation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Attach a structured payload, replacing any existing one.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_result_constructors() {
        let ok = ActionResult::ok("done");
        assert!(ok.success);
        assert_eq!(ok.message, "done");
        assert!(ok.payload.is_none());

        let err = ActionResult::error("broken");
        assert!(!err.success);
        assert_eq!(err.message, "broken");
    }

    #[test]
    fn test_action_result_payload() {
        let result = ActionResult::ok("done").with_payload(json!({ "x": 1 }));
        assert_eq!(result.payload, Some(json!({ "x": 1 })));
    }

    #[test]
    fn test_window_handle_display() {
        assert_eq!(WindowHandle::Hwnd(66226).to_string(), "66226");
        assert_eq!(
            WindowHandle::XId("0x04a00007".to_string()).to_string(),
            "0x04a00007"
        );
        assert_eq!(
            WindowHandle::Process("Finder".to_string()).to_string(),
            "Finder"
        );
    }

    #[test]
    fn test_window_info_serializes_without_empty_extra() {
        let info = WindowInfo::new("Editor", WindowHandle::Hwnd(42));
        let value = serde_json::to_value(&info).expect("serialize");
        assert_eq!(value, json!({ "title": "Editor", "identifier": 42 }));
    }

    #[test]
    fn test_platform_current_is_stable() {
        assert_eq!(Platform::current(), Platform::current());
    }
}
