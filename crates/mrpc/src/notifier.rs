//! Notifications on the terminal.
//!
//! Toasts are printed to stderr and need no interaction. Modals are printed
//! and, when a user is at the terminal, wait for Enter before returning.

use async_trait::async_trait;
use mrpc_core::models::{Notification, Presentation};
use mrpc_core::Notifier;

use crate::render;

/// [`Notifier`] writing to stderr.
pub struct TerminalNotifier {
    /// Whether modals wait for the user
    interactive: bool,
}

impl TerminalNotifier {
    /// Create a notifier; modals block only when stdin and stderr are terminals.
    pub fn new() -> Self {
        Self { interactive: atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr) }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(&self, notification: Notification) {
        let line = render::notification_line(&notification);

        match notification.presentation {
            Presentation::Toast { .. } => eprintln!("{line}"),
            Presentation::Modal { confirm_label } => {
                eprintln!("{line}");
                if !self.interactive {
                    return;
                }

                eprintln!("  [{confirm_label}] Press Enter to continue");
                let dismissed = tokio::task::spawn_blocking(|| {
                    let mut input = String::new();
                    std::io::stdin().read_line(&mut input).map(|_| ())
                })
                .await;

                match dismissed {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::debug!(error = %e, "Could not read modal dismissal"),
                    Err(e) => tracing::debug!(error = %e, "Modal dismissal task failed"),
                }
            }
        }
    }
}
