use serio::{IoSink, IoStream};

use crate::context::Context;

/// A single-threaded executor.
pub struct STExecutor<Io> {
    io: Io,
}

impl<Io> STExecutor<Io> {
    /// Creates a new single-threaded executor.
    pub fn new(io: Io) -> Self {
        Self { io }
    }
}

impl<Io> std::fmt::Debug for STExecutor<Io> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("STExecutor").finish_non_exhaustive()
    }
}

impl<Io> Context for STExecutor<Io>
where
    Io: IoSink + IoStream + Send + Unpin + 'static,
{
    type Io = Io;

    fn io_mut(&mut self) -> &mut Self::Io {
        &mut self.io
    }
}
