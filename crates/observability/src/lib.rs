//! Process-wide logging setup.

pub mod tracing;

/// Install JSON logging filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}
