use serio::{IoSink, IoStream};

/// A thread context.
///
/// Owns the ordered, reliable channel to the peer. Every message sent through the channel is
/// flushed before the send completes.
pub trait Context: Send {
    /// The type of I/O channel used by the thread.
    type Io: IoSink + IoStream + Send + Unpin + 'static;

    /// Returns a mutable reference to the thread's I/O channel.
    fn io_mut(&mut self) -> &mut Self::Io;
}
