use d2c_lib::{D2cError, ErrorCategory};

#[test]
fn config_error_display_includes_message() {
    let err = D2cError::Config("missing threshold".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing threshold");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: D2cError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn invalid_tree_helper_names_node_and_reason() {
    let err = D2cError::invalid_tree("4:17", "width is not finite");

    assert_eq!(format!("{}", err), "Invalid node 4:17: width is not finite");
    assert_eq!(err.to_payload().category, ErrorCategory::Input);
}

#[test]
fn pipeline_helper_uses_message() {
    let err = D2cError::pipeline("no hero-fade suggestion for node 1");

    assert_eq!(
        format!("{}", err),
        "Pipeline error: no hero-fade suggestion for node 1"
    );
    assert_eq!(err.to_payload().category, ErrorCategory::Pipeline);
}

#[test]
fn no_cached_run_display() {
    assert_eq!(
        format!("{}", D2cError::NoCachedRun),
        "No cached run to regenerate from"
    );
}
