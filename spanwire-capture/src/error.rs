use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to open capture on '{interface}': {source}")]
    Open {
        interface: String,
        #[source]
        source: pcap::Error,
    },

    #[error("Failed to read captured frame: {0}")]
    Read(#[source] pcap::Error),

    #[error("Capture source exhausted")]
    Exhausted,
}
