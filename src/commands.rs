//! Async side effects.
//!
//! Views return commands from `update()`; the App spawns each one on the
//! tokio runtime and reports its completion back into the event loop.

mod clipboard;

use async_trait::async_trait;
pub use clipboard::CopyToClipboardCmd;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;

#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name, used in logs and failure messages.
    fn name(&self) -> String;

    /// Run the command to completion.
    ///
    /// # Errors
    /// An error here is an app-level failure and is shown in the error
    /// dialog. Failures the view knows how to present are sent as messages
    /// instead.
    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()>;
}
