
use test_helpers::*;
use uabin_codegen::{
    GENERATED_MARKER, GenerateError, HierarchyRoots, IdEntry, IdTable, Type,
    emit_register_extension_objects, emit_register_services, emit_ids, extension_objects,
    validate_identifiers,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn service_objects() -> Vec<Type> {
    extension_objects(&service_dictionary(), &HierarchyRoots::default()).unwrap()
}

fn invalid_line(text: &str) -> usize {
    match IdTable::from_csv(text).unwrap_err() {
        GenerateError::InvalidIdTable { line, .. } => line,
        other => panic!("unexpected error: {other}"),
    }
}

fn register_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter(|l| l.trim_start().starts_with("registry.register"))
        .map(str::trim)
        .collect()
}

// ── id table ─────────────────────────────────────────────────────────────────

#[test]
fn parses_rows_and_skips_comments() {
    let table = IdTable::from_csv(
        "# Name,Id,Kind\n\
         \n\
         Boolean,1,DataType\n\
         \x20 RootFolder , 84 , Object \n",
    )
    .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("Boolean"), Some(1));
    assert_eq!(table.get("RootFolder"), Some(84));
    assert_eq!(table.get("Missing"), None);
    assert_eq!(
        table.entries()[1],
        IdEntry {
            name: "RootFolder".to_string(),
            id: 84,
            kind: "Object".to_string(),
        }
    );
}

#[test]
fn malformed_rows_report_their_line() {
    assert_eq!(invalid_line("A,1,DataType\nB,2\n"), 2);
    assert_eq!(invalid_line("# header\n\nA,x,DataType\n"), 3);
    assert_eq!(invalid_line("A,-1,DataType"), 1);
    assert_eq!(invalid_line(",1,DataType"), 1);
    assert_eq!(invalid_line("A,1,DataType\nA,2,Object\n"), 2);
}

#[test]
fn emits_one_constant_per_entry() {
    let source = emit_ids(&service_ids()).unwrap();
    let mut lines = source.lines();
    assert_eq!(lines.next(), Some(GENERATED_MARKER));
    assert!(!source.contains("use "));
    assert!(source.contains(
        "/// `CancelResponse_Encoding_DefaultBinary` (Object).\n\
         pub const CANCEL_RESPONSE_ENCODING_DEFAULT_BINARY: u32 = 482;\n"
    ));
    assert_eq!(source.matches("pub const ").count(), 5);
}

#[test]
fn colliding_constant_names_are_rejected() {
    let table = IdTable::from_csv("NodeId,17,DataType\nNode_Id,18,DataType\n").unwrap();
    assert!(matches!(
        emit_ids(&table).unwrap_err(),
        GenerateError::IdentifierCollision { ref ident, .. } if ident == "NODE_ID"
    ));
}

// ── registry builder ─────────────────────────────────────────────────────────

#[test]
fn every_registered_type_needs_a_unique_identifier() {
    let objects = service_objects();
    validate_identifiers(&objects, &service_ids()).unwrap();

    let partial = IdTable::from_csv("RequestHeader_Encoding_DefaultBinary,391,Object\n").unwrap();
    assert!(matches!(
        validate_identifiers(&objects, &partial).unwrap_err(),
        GenerateError::MissingIdentifier { ref name } if name == "ResponseHeader_Encoding_DefaultBinary"
    ));

    let shared = IdTable::from_csv(
        "RequestHeader_Encoding_DefaultBinary,391,Object\n\
         ResponseHeader_Encoding_DefaultBinary,394,Object\n\
         ServiceFault_Encoding_DefaultBinary,397,Object\n\
         CancelRequest_Encoding_DefaultBinary,479,Object\n\
         CancelResponse_Encoding_DefaultBinary,479,Object\n",
    )
    .unwrap();
    assert!(matches!(
        validate_identifiers(&objects, &shared).unwrap_err(),
        GenerateError::DuplicateIdentifier { id: 479, ref first, ref second }
            if first == "CancelRequest" && second == "CancelResponse"
    ));
}

#[test]
fn extension_object_initializer_registers_every_type() {
    let source = emit_register_extension_objects(&service_objects(), "crate::gen_prelude").unwrap();
    assert!(source.starts_with(GENERATED_MARKER));
    assert!(source.contains(
        "pub fn register_extension_objects(registry: &mut TypeRegistry) -> Result<(), RegistryError> {"
    ));
    assert_eq!(
        register_lines(&source),
        [
            "registry.register::<RequestHeader>(id::REQUEST_HEADER_ENCODING_DEFAULT_BINARY, \"RequestHeader\")?;",
            "registry.register::<ResponseHeader>(id::RESPONSE_HEADER_ENCODING_DEFAULT_BINARY, \"ResponseHeader\")?;",
            "registry.register::<ServiceFault>(id::SERVICE_FAULT_ENCODING_DEFAULT_BINARY, \"ServiceFault\")?;",
            "registry.register::<CancelRequest>(id::CANCEL_REQUEST_ENCODING_DEFAULT_BINARY, \"CancelRequest\")?;",
            "registry.register::<CancelResponse>(id::CANCEL_RESPONSE_ENCODING_DEFAULT_BINARY, \"CancelResponse\")?;",
        ]
    );
}

#[test]
fn service_initializer_skips_non_messages() {
    let source = emit_register_services(&service_objects(), "my::prelude").unwrap();
    assert!(source.contains("use my::prelude::*;"));
    assert!(source.contains("pub fn register_services(registry: &mut TypeRegistry)"));
    let lines = register_lines(&source);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("registry.register::<ServiceFault>"));
    assert!(lines[1].starts_with("registry.register::<CancelRequest>"));
    assert!(lines[2].starts_with("registry.register::<CancelResponse>"));
}
