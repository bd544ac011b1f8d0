use uabin::{
    CancelResponse, CodecError, DateTime, DiagnosticInfo, ExtensionObject, ResponseHeader,
    StatusCode,
    conformance::{CodecTestCase, ConformanceError, check_codec_case, run_codec_test},
    decode_exact, encode_to_vec,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn response_header() -> ResponseHeader {
    ResponseHeader {
        timestamp: DateTime::from_ymd_hms(2018, 8, 10, 23, 0, 0).expect("valid date"),
        request_handle: 1,
        service_result: StatusCode::GOOD,
        service_diagnostics: Some(Box::new(DiagnosticInfo::default())),
        string_table: Some(vec![]),
        additional_header: Some(Box::new(ExtensionObject::null())),
    }
}

fn cancel_response() -> CancelResponse {
    CancelResponse {
        response_header: Some(Box::new(response_header())),
        cancel_count: 1,
    }
}

fn cancel_response_bytes() -> Vec<u8> {
    vec![
        // Timestamp
        0x00, 0x98, 0x67, 0xdd, 0xfd, 0x30, 0xd4, 0x01,
        // RequestHandle
        0x01, 0x00, 0x00, 0x00,
        // ServiceResult
        0x00, 0x00, 0x00, 0x00,
        // ServiceDiagnostics
        0x00,
        // StringTable
        0x00, 0x00, 0x00, 0x00,
        // AdditionalHeader
        0x00, 0x00, 0x00,
        // CancelCount
        0x01, 0x00, 0x00, 0x00,
    ]
}

// ── tests ────────────────────────────────────────────────────────────────────

#[test]
fn cancel_response_round_trips_byte_exact() {
    run_codec_test(&[CodecTestCase::new(
        "normal",
        cancel_response(),
        cancel_response_bytes(),
    )]);
}

#[test]
fn timestamp_is_ticks_since_1601() {
    let ts = response_header().timestamp;
    assert_eq!(ts.ticks(), 0x01d4_30fd_dd67_9800);
    assert_eq!(ts.to_string(), "2018-08-10T23:00:00Z");
}

#[test]
fn absent_sub_structures_encode_like_their_zero_values() {
    let mut value = cancel_response();
    if let Some(header) = value.response_header.as_mut() {
        header.service_diagnostics = None;
        header.additional_header = None;
    }
    assert_eq!(
        encode_to_vec(&value).expect("encode"),
        cancel_response_bytes()
    );
}

#[test]
fn null_string_table_is_distinct_from_empty() {
    let mut value = cancel_response();
    if let Some(header) = value.response_header.as_mut() {
        header.string_table = None;
    }
    let bytes = encode_to_vec(&value).expect("encode");
    assert_eq!(&bytes[17..21], &[0xff, 0xff, 0xff, 0xff]);
    assert_ne!(bytes, cancel_response_bytes());

    let case = CodecTestCase::new("null string table", value, bytes);
    check_codec_case(&case).expect("null array round trips");
}

#[test]
fn reports_byte_mismatch() {
    let mut bytes = cancel_response_bytes();
    let last = bytes.len() - 4;
    bytes[last] = 0x02;
    let case = CodecTestCase::new("wrong count", cancel_response(), bytes);

    let err = check_codec_case(&case).expect_err("bytes differ");
    assert!(matches!(err, ConformanceError::BytesMismatch { case: "wrong count", .. }));
    assert!(err.to_string().contains("01 00 00 00"));
}

#[test]
fn decode_rejects_trailing_bytes() {
    let mut bytes = cancel_response_bytes();
    bytes.push(0xaa);
    let decoded = decode_exact::<CancelResponse>(&bytes);
    assert!(matches!(decoded, Err(CodecError::TrailingBytes(1))));
}

#[test]
fn truncated_input_names_the_failing_field() {
    let bytes = cancel_response_bytes();
    let err = decode_exact::<CancelResponse>(&bytes[..bytes.len() - 2])
        .expect_err("truncated");
    assert_eq!(err.field_path(), vec!["CancelResponse", "CancelCount"]);
    assert!(matches!(
        err.root_cause(),
        CodecError::UnexpectedEof { needed: 4, remaining: 2 }
    ));
}
