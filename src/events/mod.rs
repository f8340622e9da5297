//! # Events Module
//!
//! Progress reporting from the core to whatever drives it.
//!
//! ## Design
//! The core emits events through a channel; the CLI subscribes to show
//! a spinner. Sending never blocks the pipeline on an absent listener.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Ingest(IngestEvent::Progress { records_read }) = event {
//!             println!("Read {records_read} posts");
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
