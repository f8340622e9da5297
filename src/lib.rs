//! # Tweet Sift
//!
//! Reduces a personal tweet archive to the posts worth keeping.
//!
//! ## What Gets Removed
//! - **Retweets** and manual `RT`/`MT` reposts
//! - **Announcements** starting with `** `
//! - **Replies** to other accounts
//! - **Tagged** posts carrying an excluded tag
//! - **Corrections** - a near-identical repost replaces the draft it fixes
//!
//! ## Architecture
//! - `core` - The filtering engine
//! - `events` - Progress reporting for the CLI
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SiftError};

/// Initialize tracing for the binary
///
/// `RUST_LOG` takes precedence; otherwise `default_level` is used.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
