use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::config::ClientConfig;
use crate::events::{ClientEvent, EventBus};

// Let the result animation land before interrupting.
const PROMPT_DELAY: Duration = Duration::from_millis(1500);

/// Offer shown to an anonymous voter after their vote was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPrompt {
    pub register_url: String,
    pub login_url: String,
}

/// Waits for a vote the server flagged with `show_register_cta` and prompts
/// the host at most once per page session.
#[derive(Debug)]
pub struct GuestCta {
    handle: JoinHandle<()>,
}

impl GuestCta {
    pub fn spawn(
        bus: &EventBus,
        config: &ClientConfig,
        prompts: mpsc::Sender<RegisterPrompt>,
    ) -> Self {
        let mut rx = bus.subscribe();
        let prompt = RegisterPrompt {
            register_url: config.register_url.clone(),
            login_url: config.login_url.clone(),
        };
        let handle = tokio::spawn(async move {
            while let Ok(event) = rx.recv().await {
                if let ClientEvent::VoteSuccess {
                    show_register_cta: true,
                    ..
                } = event
                {
                    sleep(PROMPT_DELAY).await;
                    let _ = prompts.send(prompt.clone()).await;
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for GuestCta {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
