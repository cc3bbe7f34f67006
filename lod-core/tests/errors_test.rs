use lod_core::errors::*;
use lod_core::Granularity;

#[test]
fn ingest_failed_carries_reason() {
    let err = LodError::IngestFailed {
        reason: "model offline".into(),
    };
    assert!(err.to_string().contains("model offline"));
}

#[test]
fn config_error_converts_to_lod_error() {
    let err: LodError = ConfigError::ZeroCapacity {
        field: "max_entries".into(),
    }
    .into();
    assert!(matches!(err, LodError::Config(_)));
    assert!(err.to_string().contains("max_entries"));
}

#[test]
fn store_error_converts_to_lod_error() {
    let err: LodError = StoreError::OverCapacityUnrecoverable { max_entries: 0 }.into();
    assert!(matches!(err, LodError::Store(_)));
}

#[test]
fn embedding_error_converts_to_lod_error() {
    let err: LodError = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 128,
    }
    .into();
    let msg = err.to_string();
    assert!(msg.contains("384"));
    assert!(msg.contains("128"));
}

#[test]
fn render_error_names_level() {
    let err = RenderError::RenderFailed {
        granularity: Granularity::Section,
        reason: "no font".into(),
    };
    assert!(err.to_string().contains("section"));
}
