// Generates the message types, enums, identifier constants and registry
// initializers from the bundled dictionary into OUT_DIR.

use std::{env, error::Error, fs, path::PathBuf};

use uabin_codegen::{GenerateOptions, IdTable, TypeDictionary, generate};

const DICTIONARY: &str = "schema/Opc.Ua.Types.json";
const NODE_IDS: &str = "schema/NodeIds.csv";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={DICTIONARY}");
    println!("cargo:rerun-if-changed={NODE_IDS}");

    let dict = TypeDictionary::from_json(&fs::read_to_string(DICTIONARY)?)?;
    let ids = IdTable::from_csv(&fs::read_to_string(NODE_IDS)?)?;

    let files = generate(&dict, Some(&ids), &GenerateOptions::default())?;
    files.write_to(PathBuf::from(env::var("OUT_DIR")?))?;
    Ok(())
}
