/// Errors that can occur while handing frames to the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An I/O error occurred on the underlying transport.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport refused a frame (backpressure).
    #[error("transport rejected frame {index}")]
    Rejected { index: usize },

    /// The transport has been closed.
    #[error("transport closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, TransportError>;
