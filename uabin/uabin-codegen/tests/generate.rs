
use std::{fs, path::PathBuf};

use test_helpers::*;
use uabin_codegen::{
    GENERATED_MARKER, GenerateError, GenerateOptions, GeneratedFiles, IdTable, TypeDictionary,
    generate,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn bundled_schema() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../uabin/schema")
}

fn bundled() -> (TypeDictionary, IdTable) {
    let dir = bundled_schema();
    let dict = fs::read_to_string(dir.join("Opc.Ua.Types.json")).expect("read dictionary");
    let ids = fs::read_to_string(dir.join("NodeIds.csv")).expect("read identifier table");
    (
        TypeDictionary::from_json(&dict).expect("parse dictionary"),
        IdTable::from_csv(&ids).expect("parse identifier table"),
    )
}

fn file_names(files: &GeneratedFiles) -> Vec<&'static str> {
    files.files().into_iter().map(|(name, _)| name).collect()
}

// ── tests ────────────────────────────────────────────────────────────────────

#[test]
fn produces_every_file_in_a_stable_order() {
    let files = generate(
        &service_dictionary(),
        Some(&service_ids()),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(
        file_names(&files),
        [
            "enums_gen.rs",
            "extobjs_gen.rs",
            "register_extobjs_gen.rs",
            "service_gen.rs",
            "id_gen.rs",
        ]
    );
    for (name, contents) in files.files() {
        assert!(contents.starts_with(GENERATED_MARKER), "{name}");
    }
}

#[test]
fn without_an_identifier_table_no_ids_are_emitted() {
    let files = generate(&service_dictionary(), None, &GenerateOptions::default()).unwrap();
    assert!(files.ids.is_none());
    assert_eq!(files.files().len(), 4);
    assert!(!file_names(&files).contains(&GeneratedFiles::IDS_FILE));
}

#[test]
fn missing_identifiers_fail_the_run() {
    let ids = IdTable::from_csv("CancelRequest_Encoding_DefaultBinary,479,Object\n").unwrap();
    let err = generate(&service_dictionary(), Some(&ids), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, GenerateError::MissingIdentifier { .. }));
}

#[test]
fn prelude_path_is_configurable() {
    let options = GenerateOptions {
        prelude: "uabin::gen_prelude".to_string(),
        ..Default::default()
    };
    let files = generate(&service_dictionary(), None, &options).unwrap();
    assert!(files.extension_objects.contains("use uabin::gen_prelude::*;"));
    assert!(files.register_services.contains("use uabin::gen_prelude::*;"));
}

#[test]
fn writes_files_into_a_fresh_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("nested").join("gen");

    let files = generate(
        &service_dictionary(),
        Some(&service_ids()),
        &GenerateOptions::default(),
    )
    .unwrap();
    files.write_to(&out).unwrap();

    for (name, contents) in files.files() {
        assert_eq!(fs::read_to_string(out.join(name)).unwrap(), contents);
    }
}

#[test]
fn write_errors_name_the_path() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, "").unwrap();

    let files = generate(&service_dictionary(), None, &GenerateOptions::default()).unwrap();
    let err = files.write_to(blocker.join("gen")).unwrap_err();
    assert!(matches!(err, GenerateError::Write { ref path, .. } if path.ends_with("gen")));
}

#[test]
fn malformed_dictionary_json_is_rejected() {
    let err = TypeDictionary::from_json("{\"structs\": [{\"fields\": []}]}").unwrap_err();
    assert!(matches!(err, GenerateError::Dictionary(_)));
    assert!(err.to_string().starts_with("failed to read type dictionary"));
}

#[test]
fn bundled_dictionary_generates_cleanly() {
    let (dict, ids) = bundled();
    let files = generate(&dict, Some(&ids), &GenerateOptions::default()).unwrap();

    assert_eq!(files.register_extension_objects.matches("registry.register::<").count(), 22);
    assert_eq!(files.register_services.matches("registry.register::<").count(), 5);
    assert!(files.extension_objects.contains("pub struct CancelResponse {"));
    assert!(files.extension_objects.contains("pub attribute_id: AttributeId,"));
    assert!(files.enums.contains("pub struct NodeClass(pub u32);"));
    let ids = files.ids.expect("identifier constants");
    assert!(ids.contains("pub const CANCEL_RESPONSE_ENCODING_DEFAULT_BINARY: u32 = 482;"));
}
