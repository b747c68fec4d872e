use arboard::Clipboard;
use async_trait::async_trait;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::app::AppMessage;
use crate::commands::Command;
use crate::ui::ToastType;

/// Put text on the system clipboard and confirm with a toast.
///
/// `description` names what is copied ("name of Luke Skywalker") and is
/// reused in the command name and the toast.
pub struct CopyToClipboardCmd {
    text: String,
    description: String,
}

impl CopyToClipboardCmd {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
impl Command for CopyToClipboardCmd {
    fn name(&self) -> String {
        format!("Copying {}", self.description)
    }

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let Self { text, description } = *self;

        // arboard talks to the display server synchronously.
        tokio::task::spawn_blocking(move || -> Result<()> {
            Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(text))
                .wrap_err("Clipboard is not available")
        })
        .await??;
        debug!("Copied {} to clipboard", description);

        app_tx.send(AppMessage::ShowToast {
            message: format!("Copied {description}"),
            toast_type: ToastType::Success,
        })?;
        Ok(())
    }
}
