//! Profiling support via Tracy.
//!
//! Instrumentation is compiled in only with the `profiling` Cargo feature:
//!
//! ```bash
//! cargo run -p nebula-app --features profiling
//! ```
//!
//! The compile pipeline opens a span per stage and the render path opens one
//! per node, so a connected Tracy client shows where a frame spends its time.
//!
//! ```ignore
//! use nebula_graph::{frame_mark, profile_scope};
//!
//! loop {
//!     {
//!         profile_scope!("record_frame");
//!         // ... execute the render path ...
//!     }
//!     frame_mark!();
//! }
//! ```
//!
//! Without the feature the macros expand to nothing.

#[cfg(feature = "profiling")]
pub use tracy_client::{self, frame_mark as tracy_frame_mark, span};

/// End the current frame in the Tracy timeline.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! frame_mark {
    () => {
        $crate::profiling::tracy_frame_mark()
    };
}

/// End the current frame. No-op build.
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! frame_mark {
    () => {};
}

/// Open a named span that closes at the end of the enclosing block.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _graph_span = $crate::profiling::span!($name);
    };
}

/// Named span. No-op build.
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Open a span named after the enclosing function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _graph_span = $crate::profiling::span!();
    };
}

/// Function span. No-op build.
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}

/// Start the Tracy client. Does nothing without the `profiling` feature.
pub fn start_profiler() {
    #[cfg(feature = "profiling")]
    {
        tracy_client::Client::start();
        log::info!("Tracy profiler client started");
    }
}
