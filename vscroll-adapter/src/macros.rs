// Trace events under the `vscroll_adapter` target. Without the `tracing` feature the
// arguments are never evaluated and the macros expand to an empty block.

macro_rules! vtrace {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "vscroll_adapter", $($tt)*);
    }};
}

macro_rules! vdebug {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "vscroll_adapter", $($tt)*);
    }};
}

macro_rules! vwarn {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "vscroll_adapter", $($tt)*);
    }};
}
