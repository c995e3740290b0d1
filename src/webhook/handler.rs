//! Routing of verified events to application handlers

use crate::webhook::event::{CallEvent, EventKind};
use std::collections::HashMap;

/// Handler for verified call events
#[async_trait::async_trait]
pub trait CallEventHandler: Send + Sync {
    /// Handle one verified event
    async fn handle(
        &self,
        event: &CallEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait::async_trait]
impl<F, Fut> CallEventHandler for F
where
    F: Fn(CallEvent) -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<(), Box<dyn std::error::Error + Send + Sync>>>
        + Send,
{
    async fn handle(
        &self,
        event: &CallEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self(event.clone()).await
    }
}

/// Router dispatching events to handlers registered per kind
///
/// Events with no matching handler fall through to the default handler, or
/// are ignored when none is set.
pub struct EventRouter {
    handlers: HashMap<EventKind, Box<dyn CallEventHandler>>,
    default_handler: Option<Box<dyn CallEventHandler>>,
}

impl EventRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            default_handler: None,
        }
    }

    /// Register a handler for an event kind
    pub fn on<H: CallEventHandler + 'static>(mut self, kind: EventKind, handler: H) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Set the handler for kinds without a dedicated one
    pub fn default_handler<H: CallEventHandler + 'static>(mut self, handler: H) -> Self {
        self.default_handler = Some(Box::new(handler));
        self
    }

    /// Route one verified event
    pub async fn route(
        &self,
        event: &CallEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(handler) = self.handlers.get(&event.kind()) {
            handler.handle(event).await
        } else if let Some(handler) = &self.default_handler {
            handler.handle(event).await
        } else {
            Ok(())
        }
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}
