use docegest_license::LicenseError;

#[test]
fn error_display_is_nonempty() {
    let errors = vec![
        LicenseError::InvalidFormat,
        LicenseError::InvalidEncoding("bad base64".to_string()),
        LicenseError::InvalidSignature,
        LicenseError::CorruptPayload("bad gzip".to_string()),
        LicenseError::MalformedExpiration("soon".to_string()),
        LicenseError::Expired("2020-01-01T00:00:00Z".to_string()),
        LicenseError::KeyLoad("bad pem".to_string()),
        LicenseError::Persistence("disk full".to_string()),
        LicenseError::InvalidInput("empty".to_string()),
    ];

    for err in &errors {
        assert!(!format!("{err}").is_empty());
        assert!(!format!("{err:?}").is_empty());
    }
}

#[test]
fn only_key_load_and_persistence_are_internal() {
    // Internal errors route to support; everything else means "bad token".
    assert!(LicenseError::KeyLoad("x".to_string()).is_internal());
    assert!(LicenseError::Persistence("x".to_string()).is_internal());

    assert!(!LicenseError::InvalidFormat.is_internal());
    assert!(!LicenseError::InvalidEncoding("x".to_string()).is_internal());
    assert!(!LicenseError::InvalidSignature.is_internal());
    assert!(!LicenseError::CorruptPayload("x".to_string()).is_internal());
    assert!(!LicenseError::MalformedExpiration("x".to_string()).is_internal());
    assert!(!LicenseError::Expired("x".to_string()).is_internal());
    assert!(!LicenseError::InvalidInput("x".to_string()).is_internal());
}
