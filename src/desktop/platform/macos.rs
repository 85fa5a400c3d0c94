#![cfg(target_os = "macos")]

//! macOS window backend driving the System Events scripting bridge.

use std::process::Command;

use anyhow::Result;
use async_trait::async_trait;

use super::WindowBackend;
use crate::desktop::errors::AutomationError;
use crate::desktop::types::{WindowHandle, WindowInfo};

/// One `app \t pid \t title` line per window of every visible process.
const LIST_WINDOWS_SCRIPT: &str = r#"
tell application "System Events"
    set out to ""
    repeat with proc in (processes whose visible is true)
        set procName to name of proc
        set procId to unix id of proc
        try
            repeat with win in windows of proc
                set out to out & procName & tab & procId & tab & (name of win) & linefeed
            end repeat
        end try
    end repeat
    return out
end tell
"#;

/// Backend over `osascript`. System Events focuses processes, not individual
/// windows, so the handle form of an identifier is an exact process name.
pub struct ScriptingBridgeBackend;

impl ScriptingBridgeBackend {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

fn run_osascript(script: &str) -> Result<String> {
    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .map_err(|e| AutomationError::BackendUnavailable(format!("osascript: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutomationError::Operation(format!("osascript: {}", stderr.trim())).into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Escape a string for interpolation into a double-quoted AppleScript
/// literal.
fn applescript_quote(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parse the tab-separated lines the list script emits.
fn parse_window_list(output: &str) -> Vec<WindowInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let app = parts.next()?;
            let pid = parts.next()?;
            let title = parts.next()?;
            if app.is_empty() {
                return None;
            }
            Some(
                WindowInfo::new(title, WindowHandle::Process(app.to_string()))
                    .with_extra("app", app)
                    .with_extra("pid", pid),
            )
        })
        .collect()
}

#[async_trait]
impl WindowBackend for ScriptingBridgeBackend {
    async fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let output = tokio::task::spawn_blocking(|| run_osascript(LIST_WINDOWS_SCRIPT))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))??;
        Ok(parse_window_list(&output))
    }

    async fn focus_by_handle(&self, identifier: &str) -> Result<()> {
        let script = format!(
            r#"tell application "System Events" to set frontmost of process "{}" to true"#,
            applescript_quote(identifier)
        );
        tokio::task::spawn_blocking(move || run_osascript(&script).map(|_| ()))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }

    async fn focus_by_title(&self, title: &str) -> Result<()> {
        let script = format!(
            r#"tell application "System Events" to set frontmost of (first process whose name contains "{}") to true"#,
            applescript_quote(title)
        );
        tokio::task::spawn_blocking(move || run_osascript(&script).map(|_| ()))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_list() {
        let output = "Finder\t321\tDownloads\nSafari\t654\tApple Start Page\n";
        let windows = parse_window_list(output);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].title, "Downloads");
        assert_eq!(
            windows[0].identifier,
            WindowHandle::Process("Finder".to_string())
        );
        assert_eq!(windows[0].extra.get("pid").map(String::as_str), Some("321"));
        assert_eq!(windows[1].extra.get("app").map(String::as_str), Some("Safari"));
    }

    #[test]
    fn test_parse_window_list_keeps_untitled_entries() {
        // Title filtering belongs to the manager, not the parser.
        let windows = parse_window_list("Preview\t111\t\n");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title, "");
    }

    #[test]
    fn test_parse_window_list_skips_short_lines() {
        assert!(parse_window_list("no-tabs-here\n\n").is_empty());
    }

    #[test]
    fn test_applescript_quote() {
        assert_eq!(applescript_quote(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_quote(r"back\slash"), r"back\\slash");
    }
}
