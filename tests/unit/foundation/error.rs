use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlendError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(BlendError::bounds("x").to_string().contains("bounds error:"));
    assert!(
        BlendError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(BlendError::format("x").to_string().contains("format error:"));
}

#[test]
fn only_configuration_is_fatal() {
    assert!(BlendError::configuration("no device").is_fatal());
    assert!(!BlendError::bounds("x").is_fatal());
    assert!(!BlendError::resource("x").is_fatal());
    assert!(!BlendError::format("x").is_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlendError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_fatal());
}
