//! Network reachability collaborator.
//!
//! The engine never probes the network itself; the embedding application
//! implements this against its platform's reachability API. The status
//! is consulted only to classify a failed store call as a connectivity
//! error rather than a store error.

pub trait NetworkStatus: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Default status for environments without a reachability source.
pub struct AlwaysOnline;

impl NetworkStatus for AlwaysOnline {
    fn is_connected(&self) -> bool {
        true
    }
}
