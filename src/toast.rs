use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// The transient notification surface the page provides. The engine only
/// decides *what* to say and with which severity; rendering, stacking and
/// auto-dismiss stay with the host.
pub trait ToastSink: Send + Sync {
    fn toast(&self, message: &str, kind: ToastKind);
}

/// Headless sink that routes toasts to the log, for hosts without a
/// notification surface and for tests that only care about side effects.
#[derive(Debug, Default)]
pub struct TracingToasts;

impl ToastSink for TracingToasts {
    fn toast(&self, message: &str, kind: ToastKind) {
        match kind {
            ToastKind::Success => info!("toast: {message}"),
            ToastKind::Error => warn!("toast: {message}"),
        }
    }
}
