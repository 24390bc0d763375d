#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises the diagnostics vocabulary of the dirmirror
//! workspace. Library crates emit events through the `trace_*!` macros, which
//! route to fixed `dirmirror::<subsystem>` targets on top of the [`tracing`]
//! facade. Nothing in the library installs a subscriber; embedding
//! applications call [`init_tracing`] (or build their own registry) and tests
//! compose a [`CaptureLayer`] to observe what happened.
//!
//! # Design
//!
//! - [`Subsystem`] enumerates the categories: traversal, deletion, copy,
//!   comparison, pruning, and policy skips.
//! - The macros re-export `tracing` through this crate so dependants do not
//!   need their own `tracing` dependency.
//! - [`CaptureLayer`] records events per subsystem in memory.
//!
//! # Examples
//!
//! ```
//! use logging::{CaptureLayer, Subsystem};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let capture = CaptureLayer::new();
//! let subscriber = tracing_subscriber::registry().with(capture.clone());
//! tracing::subscriber::with_default(subscriber, || {
//!     logging::trace_compare!("digesting {}", "a.txt");
//! });
//! assert_eq!(capture.count(Subsystem::Compare), 1);
//! ```

mod subsystem;
mod tracing_bridge;
mod tracing_macros;

pub use subsystem::Subsystem;
pub use tracing_bridge::{CaptureLayer, CapturedEvent, DEFAULT_FILTER, env_filter, init_tracing};

#[doc(hidden)]
pub use tracing;
