//! Desktop automation core.
//!
//! - `InputController` — input events and screen-image queries over one
//!   external input-simulation backend
//! - `WindowManager` — platform-polymorphic window enumeration and focus
//! - `AutomationDispatcher` — validated command routing and the uniform
//!   result contract
//!
//! ## Window backends
//!
//! - **Windows**: Win32 windowing API
//! - **macOS**: System Events scripting bridge (`osascript`)
//! - **Linux**: `wmctrl` (any EWMH-compliant window manager)

pub mod dispatcher;
pub mod errors;
pub mod input;
mod keys;
pub mod locate;
pub mod manager;
pub mod platform;
pub mod screenshot;
pub mod types;

// Re-export main types
pub use dispatcher::AutomationDispatcher;
pub use errors::AutomationError;
pub use input::{EnigoBackend, InputBackend, InputController};
pub use manager::WindowManager;
pub use platform::{create_backend, WindowBackend};
pub use screenshot::ScreenCapture;
pub use types::{ActionResult, Platform, WindowHandle, WindowInfo};
