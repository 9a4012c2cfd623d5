//! Session lifecycle notifications.
//!
//! Fire-and-forget publish of named events consumed by UI layers. Delivery
//! across subscribers is the sink implementation's concern; the session layer
//! only guarantees the relative order of the events it publishes.

/// Named session lifecycle events. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The stored bearer credential was found expired or undecodable.
    CredentialExpired,
    /// A login completed and a credential was stored.
    SessionStarted,
    /// The session ended, by sign-out or by expiry.
    SessionEnded,
}

/// Publish/subscribe boundary for session events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: SessionEvent);
}

/// Sink that discards every event. The default when the host does not care
/// about lifecycle notifications.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: SessionEvent) {}
}
