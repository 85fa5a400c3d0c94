#![cfg(target_os = "linux")]

//! Linux window backend driving the `wmctrl` window-manager CLI.

use std::process::Command;

use anyhow::Result;
use async_trait::async_trait;

use super::WindowBackend;
use crate::desktop::errors::AutomationError;
use crate::desktop::types::{WindowHandle, WindowInfo};

/// Backend over `wmctrl`, which works against any EWMH-compliant window
/// manager.
pub struct WmctrlBackend;

impl WmctrlBackend {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

fn run_wmctrl(args: &[&str]) -> Result<String> {
    let output = Command::new("wmctrl")
        .args(args)
        .output()
        .map_err(|e| AutomationError::BackendUnavailable(format!("wmctrl: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutomationError::Operation(format!(
            "wmctrl {}: {}",
            args.join(" "),
            stderr.trim()
        ))
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split one leading whitespace-delimited token off a line.
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(idx) => Some((&s[..idx], s[idx..].trim_start())),
        None => Some((s, "")),
    }
}

/// Parse one `wmctrl -l -p` line: id, desktop, pid, host, then the title.
fn parse_window_line(line: &str) -> Option<WindowInfo> {
    let (id, rest) = split_token(line)?;
    let (desktop, rest) = split_token(rest)?;
    let (pid, rest) = split_token(rest)?;
    let (host, title) = split_token(rest)?;

    Some(
        WindowInfo::new(title, WindowHandle::XId(id.to_string()))
            .with_extra("desktop", desktop)
            .with_extra("pid", pid)
            .with_extra("host", host),
    )
}

fn parse_window_list(output: &str) -> Vec<WindowInfo> {
    output.lines().filter_map(parse_window_line).collect()
}

#[async_trait]
impl WindowBackend for WmctrlBackend {
    async fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        let output = tokio::task::spawn_blocking(|| run_wmctrl(&["-l", "-p"]))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))??;
        Ok(parse_window_list(&output))
    }

    async fn focus_by_handle(&self, identifier: &str) -> Result<()> {
        let id = identifier.to_string();
        tokio::task::spawn_blocking(move || run_wmctrl(&["-i", "-a", id.as_str()]).map(|_| ()))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }

    async fn focus_by_title(&self, title: &str) -> Result<()> {
        let title = title.to_string();
        tokio::task::spawn_blocking(move || run_wmctrl(&["-a", title.as_str()]).map(|_| ()))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_line() {
        let line = "0x04a00007  0 1234   workstation Mozilla Firefox - Inbox";
        let info = parse_window_line(line).expect("line should parse");
        assert_eq!(info.title, "Mozilla Firefox - Inbox");
        assert_eq!(info.identifier, WindowHandle::XId("0x04a00007".to_string()));
        assert_eq!(info.extra.get("desktop").map(String::as_str), Some("0"));
        assert_eq!(info.extra.get("pid").map(String::as_str), Some("1234"));
        assert_eq!(
            info.extra.get("host").map(String::as_str),
            Some("workstation")
        );
    }

    #[test]
    fn test_parse_sticky_desktop_and_empty_title() {
        let line = "0x04e00003 -1 5678 workstation ";
        let info = parse_window_line(line).expect("line should parse");
        assert_eq!(info.title, "");
        assert_eq!(info.extra.get("desktop").map(String::as_str), Some("-1"));
    }

    #[test]
    fn test_parse_window_list_skips_malformed_lines() {
        let output = "0x04a00007 0 1234 host Editor\ngarbage\n\n0x04b00001 1 99 host Terminal\n";
        let windows = parse_window_list(output);
        // "garbage" yields a lone token line that cannot produce four fields.
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].title, "Editor");
        assert_eq!(windows[1].title, "Terminal");
    }
}
