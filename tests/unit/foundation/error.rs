use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PublishError::resource_unavailable("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        PublishError::geometry_missing("x")
            .to_string()
            .contains("geometry missing:")
    );
    assert!(
        PublishError::identity_violation("x")
            .to_string()
            .contains("identity violation:")
    );
    assert!(
        PublishError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PublishError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_reports_path_and_source() {
    let err = PublishError::io("out/images", std::io::Error::other("denied"));
    let msg = err.to_string();
    assert!(msg.contains("out/images"));
    assert!(msg.contains("denied"));
    assert!(!err.is_recoverable());
}

#[test]
fn only_resource_level_kinds_are_recoverable() {
    assert!(PublishError::resource_unavailable("no exporter").is_recoverable());
    assert!(PublishError::geometry_missing("no boundary").is_recoverable());
    assert!(!PublishError::identity_violation("dup").is_recoverable());
    assert!(!PublishError::validation("bad").is_recoverable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PublishError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
