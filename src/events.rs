use futures::Stream;
use tokio::sync::broadcast;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

use crate::poll::{OptionId, OptionResult, PostId};

/// Signals that cross component boundaries. Voting emits, everything else
/// subscribes; no component calls another directly.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A vote round-trip finished successfully, with the payload the server
    /// returned for it.
    VoteSuccess {
        option_ids: Vec<OptionId>,
        results: Vec<OptionResult>,
        show_register_cta: bool,
    },
    CommentPosted { post_id: PostId },
    PostCreated { post_id: PostId },
}

pub type EventSender = broadcast::Sender<ClientEvent>;

/// Broadcast channel shared by the whole app. Cloning is cheap; every clone
/// publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: EventSender,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(100).0,
        }
    }

    /// Fire-and-forget publish. An event with no subscribers is dropped.
    pub fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.tx.subscribe()
    }

    /// The subscription as a stream, for consumers that compose combinators
    /// instead of running a recv loop.
    pub fn stream(&self) -> impl Stream<Item = ClientEvent> + Send + use<> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|event| event.ok())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
