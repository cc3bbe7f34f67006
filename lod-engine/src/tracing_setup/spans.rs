//! Span definitions per engine operation.

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($text_len:expr) => {
        tracing::info_span!("lod.ingest", text_len = $text_len)
    };
}

/// Create a retrieve span.
#[macro_export]
macro_rules! retrieve_span {
    ($level:expr, $top_k:expr) => {
        tracing::info_span!("lod.retrieve", level = %$level, top_k = $top_k)
    };
}

/// Create a prefetch span.
#[macro_export]
macro_rules! prefetch_span {
    ($job:expr) => {
        tracing::debug_span!("lod.prefetch", job = $job)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "lod.ingest";
    pub const RETRIEVE: &str = "lod.retrieve";
    pub const PREFETCH: &str = "lod.prefetch";
}
