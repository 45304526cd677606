use serde::{Deserialize, Serialize};

/// Adapter-level timeout configuration, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterTimeout {
    /// Connection timeout (default: 10.0).
    pub connect: f64,
    /// Whole-request timeout (default: 120.0).
    pub request: f64,
    /// Per-chunk read timeout on the streaming path (default: 30.0).
    pub stream_read: f64,
}

impl Default for AdapterTimeout {
    fn default() -> Self {
        Self {
            connect: 10.0,
            request: 120.0,
            stream_read: 30.0,
        }
    }
}
