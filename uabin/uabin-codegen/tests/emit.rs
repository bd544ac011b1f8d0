
use test_helpers::*;
use uabin_codegen::{
    GENERATED_MARKER, HierarchyRoots, Type, emit_enums, emit_extension_objects, enums,
    extension_objects,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const PRELUDE: &str = "crate::gen_prelude";

fn objects_source(dict: &uabin_codegen::TypeDictionary) -> String {
    let objects = extension_objects(dict, &HierarchyRoots::default()).unwrap();
    emit_extension_objects(&objects, PRELUDE).unwrap()
}

fn enums_source(dict: &uabin_codegen::TypeDictionary) -> String {
    let types: Vec<Type> = enums(dict).unwrap();
    emit_enums(&types, PRELUDE).unwrap()
}

/// The text of the first item that starts with `start`, up to its closing brace line.
fn item<'a>(source: &'a str, start: &str) -> &'a str {
    let begin = source.find(start).unwrap_or_else(|| panic!("missing `{start}`"));
    let rest = &source[begin..];
    let end = rest.find("\n}\n").map_or(rest.len(), |i| i + 3);
    &rest[..end]
}

fn position(source: &str, needle: &str) -> usize {
    source.find(needle).unwrap_or_else(|| panic!("missing `{needle}`"))
}

// ── tests ────────────────────────────────────────────────────────────────────

#[test]
fn every_file_starts_with_the_marker_and_prelude() {
    let dict = service_dictionary();
    for source in [enums_source(&dict), objects_source(&dict)] {
        let mut lines = source.lines();
        assert_eq!(lines.next(), Some(GENERATED_MARKER));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("#[allow(unused_imports)]"));
        assert_eq!(lines.next(), Some("use crate::gen_prelude::*;"));
    }
}

#[test]
fn enums_are_newtypes_with_named_constants() {
    let source = enums_source(&service_dictionary());

    assert!(source.contains("pub struct MessageSecurityMode(pub u32);"));
    assert!(source.contains("    pub const SIGN_AND_ENCRYPT: Self = Self(3);"));
    assert!(source.contains("        (\"SignAndEncrypt\", Self::SIGN_AND_ENCRYPT),"));
    assert!(source.contains("            \"Invalid\" => Ok(Self::INVALID),"));
    assert!(source.contains("Err(UnknownEnumName::new(\"MessageSecurityMode\", name))"));
    assert!(source.contains("impl BinaryEncode for MessageSecurityMode {"));
    assert!(source.contains("        u32::decode(buf).map(Self)"));
}

#[test]
fn narrow_enums_use_their_declared_width() {
    let dict = dictionary(vec![enumeration("Small", 8, &[("One", 1)])], vec![]);
    let source = enums_source(&dict);
    assert!(source.contains("pub struct Small(pub u8);"));
    assert!(source.contains("        u8::decode(buf).map(Self)"));
}

#[test]
fn struct_fields_follow_declaration_order() {
    let source = objects_source(&service_dictionary());
    let header = item(&source, "pub struct ResponseHeader {");
    assert_eq!(
        header,
        "\
pub struct ResponseHeader {
    pub timestamp: DateTime,
    pub request_handle: u32,
    pub service_result: StatusCode,
    pub service_diagnostics: Option<Box<DiagnosticInfo>>,
    pub string_table: Option<Vec<String>>,
    pub additional_header: Option<Box<ExtensionObject>>,
}
"
    );

    let encode = item(&source, "impl BinaryEncode for ResponseHeader {");
    let idx = |n: &str| position(encode, n);
    assert!(idx("self.timestamp") < idx("self.request_handle"));
    assert!(idx("self.service_diagnostics") < idx("self.string_table"));
    assert!(idx("self.string_table") < idx("self.additional_header"));
    assert!(encode.contains(".map_err(|e| e.in_field(\"ResponseHeader\", \"StringTable\"))?;"));

    let decode = item(&source, "impl BinaryDecode for ResponseHeader {");
    assert!(position(decode, "timestamp:") < position(decode, "additional_header:"));
}

#[test]
fn derivation_is_recorded_in_the_doc_line() {
    let dict = dictionary(
        vec![],
        vec![
            ext_object("EnumValueType", vec![field("Value", "opc:Int64")]),
            structure("EnumField", Some("tns:EnumValueType"), vec![field("Name", "opc:String")]),
        ],
    );
    let source = objects_source(&dict);
    assert!(source.contains("/// `EnumField` extension object, derived from `EnumValueType`."));
    assert!(source.contains("/// `EnumValueType` extension object, derived from `ExtensionObject`."));
}

#[test]
fn keyword_fields_use_raw_identifiers() {
    let dict = dictionary(vec![], vec![ext_object("Typed", vec![field("Type", "opc:Byte")])]);
    let source = objects_source(&dict);
    assert!(source.contains("    pub r#type: u8,"));
    assert!(source.contains("        self.r#type\n"));
    assert!(source.contains("            r#type: BinaryDecode::decode(buf)"));
}

#[test]
fn empty_structures_ignore_the_buffer() {
    let dict = dictionary(vec![], vec![ext_object("Nothing", vec![])]);
    let source = objects_source(&dict);
    assert!(source.contains("pub struct Nothing {}"));
    assert!(source.contains("fn encode(&self, _buf: &mut ::bytes::BytesMut)"));
    assert!(source.contains("fn decode(_buf: &mut ::bytes::Bytes)"));
}

#[test]
fn encoding_ids_point_into_the_id_module() {
    let source = objects_source(&service_dictionary());
    let body = item(&source, "impl ExtensionObjectBody for CancelResponse {");
    assert!(body.contains("        \"CancelResponse\""));
    assert!(body.contains("        id::CANCEL_RESPONSE_ENCODING_DEFAULT_BINARY"));
}

#[test]
fn requests_and_responses_get_capability_impls() {
    let source = objects_source(&service_dictionary());

    assert!(source.contains("pub trait Request: ExtensionObjectBody {"));
    assert!(source.contains("pub trait Response: ExtensionObjectBody {"));

    let request = item(&source, "impl Request for CancelRequest {");
    assert!(request.contains("fn header(&self) -> Option<&RequestHeader> {"));
    assert!(request.contains("        self.request_header.as_deref()"));
    assert!(request.contains("        self.request_header = Some(Box::new(header));"));
    let body = item(&source, "impl ExtensionObjectBody for CancelRequest {");
    assert!(body.contains("fn as_request(&self) -> Option<&dyn Request> {"));
    assert!(!body.contains("as_response"));

    assert!(source.contains("impl Response for CancelResponse {"));
    assert!(source.contains("impl Response for ServiceFault {"));
    assert!(!source.contains("impl Request for RequestHeader"));
    assert!(!source.contains("impl Response for ResponseHeader"));
    let header_body = item(&source, "impl ExtensionObjectBody for RequestHeader {");
    assert!(!header_body.contains("as_request"));
}
