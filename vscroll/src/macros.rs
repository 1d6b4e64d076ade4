// Trace events under the `vscroll` target. Without the `tracing` feature the
// arguments are never evaluated and the macros expand to an empty block.

macro_rules! vtrace {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "vscroll", $($tt)*);
    }};
}

macro_rules! vdebug {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "vscroll", $($tt)*);
    }};
}

macro_rules! vwarn {
    ($($tt:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "vscroll", $($tt)*);
    }};
}
