//! Logging shims for the geometry engine.
//!
//! With the `tracing` feature the engine reports edge creation, rim-search
//! fallbacks and pointer state changes through `tracing`. Without it the
//! macros below swallow their arguments and compile to nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use crate::{debug, trace, warn};

#[cfg(test)]
mod tests {
    use super::{debug, trace, warn};

    #[test]
    fn shims_accept_tracing_field_syntax() {
        let id = 3;
        let at = (1.0, 2.0);
        debug!(%id, ?at, "node added");
        trace!(t = 0.25, "rim crossing");
        warn!(control = ?at, "fallback");
        // Without the feature the macros drop their arguments
        let _ = (id, at);
    }
}
