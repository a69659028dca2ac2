use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QijiError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        QijiError::incompatible("x")
            .to_string()
            .contains("incompatible scene:")
    );
    assert!(QijiError::render("x").to_string().contains("render error:"));
    assert!(QijiError::not_found("x").to_string().contains("not found:"));
    assert!(
        QijiError::save_failed("x")
            .to_string()
            .contains("save failed:")
    );
    assert!(
        QijiError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QijiError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn not_found_and_save_failed_are_distinguishable() {
    let a = QijiError::not_found("abc123");
    let b = QijiError::save_failed("disk full");
    assert!(matches!(a, QijiError::NotFound(_)));
    assert!(matches!(b, QijiError::SaveFailed(_)));
}
