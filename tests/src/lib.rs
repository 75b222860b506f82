//! # Counting Bloom Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── counting_flow.rs    # CountingBloomFilter lifecycle end to end
//!     ├── presence_flow.rs    # build_filter / test_membership
//!     └── properties.rs       # proptest invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cbf-tests
//! cargo test -p cbf-tests integration::properties
//! ```

#![allow(dead_code)]


/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
