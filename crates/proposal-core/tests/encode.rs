use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use proposal_core::encode::{encode_data_url, is_embedded};

#[test]
fn encodes_with_mime_prefix_and_round_trips() {
    let url = encode_data_url(b"\x01\x02\x03", "image/png");
    let payload = url
        .strip_prefix("data:image/png;base64,")
        .expect("data url prefix");
    assert_eq!(STANDARD.decode(payload).unwrap(), vec![1, 2, 3]);
}

#[test]
fn empty_payload_keeps_prefix() {
    assert_eq!(encode_data_url(b"", "image/gif"), "data:image/gif;base64,");
}

#[test]
fn payload_is_padded_and_unwrapped() {
    let url = encode_data_url(&[0xff; 100], "image/jpeg");
    assert!(url.ends_with("=="));
    assert!(!url.contains('\n'));
}

#[test]
fn mime_is_passed_through_unvalidated() {
    assert_eq!(encode_data_url(b"a", ""), "data:;base64,YQ==");
}

#[test]
fn embedded_marker_is_case_insensitive() {
    assert!(is_embedded("data:image/png;base64,AAAA"));
    assert!(is_embedded("DATA:image/png;base64,AAAA"));
    assert!(!is_embedded("logo.png"));
    assert!(!is_embedded("dat"));
}
