//! Conversion of dictionary names into Rust identifiers.

/// Split an UpperCamelCase (optionally `_`-separated) name into lowercase words.
///
/// Runs of capitals are treated as one acronym word, so `EUInformation`
/// splits into `eu` and `information`.
fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn snake_case(name: &str) -> String {
    words(name).join("_")
}

pub fn screaming_snake_case(name: &str) -> String {
    snake_case(name).to_ascii_uppercase()
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Identifiers that cannot be written as raw identifiers.
const RESERVED: &[&str] = &["self", "super", "crate", "Self", "_"];

/// Rust field identifier for a schema field name.
pub fn field_ident(name: &str) -> String {
    let ident = snake_case(name);
    let ident = if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else {
        ident
    };
    if RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

/// Rust constant identifier for an enum member or identifier-table entry.
pub fn const_ident(name: &str) -> String {
    let ident = screaming_snake_case(name);
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V{ident}")
    } else {
        ident
    }
}

/// Name of the identifier-table entry holding the binary encoding id of `type_name`.
pub fn encoding_id_name(type_name: &str) -> String {
    format!("{type_name}_Encoding_DefaultBinary")
}
