//! Definition Emitter: renders resolved [`Type`]s as Rust source.
//!
//! Each generated file starts with [`write_header`] and pulls everything it
//! needs from a prelude module of the runtime crate (see
//! [`GenerateOptions::prelude`](crate::GenerateOptions::prelude)). Emitted
//! structures list their fields, and encode/decode them, in declaration order:
//! that order is the wire format.

use std::fmt::{Result, Write as _};

use crate::{
    model::{EnumRepr, Kind, Type},
    names::{const_ident, encoding_id_name},
};

pub const GENERATED_MARKER: &str = "// Code generated by uabin-gen. DO NOT EDIT.";

/// Write the banner and prelude import shared by every generated file.
pub fn write_header(out: &mut String, prelude: Option<&str>) -> Result {
    writeln!(out, "{GENERATED_MARKER}")?;
    if let Some(prelude) = prelude {
        writeln!(out)?;
        writeln!(out, "#[allow(unused_imports)]")?;
        writeln!(out, "use {prelude}::*;")?;
    }
    Ok(())
}

pub fn format_types(out: &mut String, types: &[Type]) -> Result {
    for t in types {
        format_type(out, t)?;
    }
    Ok(())
}

pub fn format_type(out: &mut String, t: &Type) -> Result {
    match t.kind {
        Kind::Enum => format_enum(out, t),
        Kind::ExtensionObject => format_ext_object(out, t),
    }
}

/// Render the complete enums file.
pub fn emit_enums(enums: &[Type], prelude: &str) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_header(&mut out, Some(prelude))?;
    format_types(&mut out, enums)?;
    Ok(out)
}

/// Render the complete extension objects file, including the request and
/// response capabilities.
pub fn emit_extension_objects(
    objects: &[Type],
    prelude: &str,
) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_header(&mut out, Some(prelude))?;
    out.push_str(REQUEST_RESPONSE_TRAITS);
    format_types(&mut out, objects)?;
    Ok(out)
}

const REQUEST_RESPONSE_TRAITS: &str = r#"
/// Capability shared by every service request: access to its `RequestHeader`.
pub trait Request: ExtensionObjectBody {
    fn header(&self) -> Option<&RequestHeader>;
    fn set_header(&mut self, header: RequestHeader);
}

/// Capability shared by every service response: access to its `ResponseHeader`.
pub trait Response: ExtensionObjectBody {
    fn header(&self) -> Option<&ResponseHeader>;
    fn set_header(&mut self, header: ResponseHeader);
}
"#;

fn format_enum(out: &mut String, t: &Type) -> Result {
    // Enumerations are 32 bits on the wire unless the dictionary says otherwise.
    let repr = t.repr.unwrap_or(EnumRepr::U32);
    let name = &t.name;
    let int = repr.rust_type();

    writeln!(out)?;
    writeln!(out, "/// `{name}` enumeration.")?;
    writeln!(
        out,
        "#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]"
    )?;
    writeln!(out, "pub struct {name}(pub {int});")?;
    writeln!(out)?;
    writeln!(out, "impl {name} {{")?;
    for v in &t.values {
        writeln!(out, "    pub const {}: Self = Self({});", v.name, v.value)?;
    }
    if !t.values.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "    /// Members in declaration order.")?;
    writeln!(out, "    pub const VALUES: &'static [(&'static str, Self)] = &[")?;
    for v in &t.values {
        writeln!(out, "        (\"{}\", Self::{}),", v.short_name, v.name)?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;
    writeln!(out, "    /// Look up a member by its dictionary name.")?;
    writeln!(
        out,
        "    pub fn from_name(name: &str) -> Result<Self, UnknownEnumName> {{"
    )?;
    writeln!(out, "        match name {{")?;
    for v in &t.values {
        writeln!(out, "            \"{}\" => Ok(Self::{}),", v.short_name, v.name)?;
    }
    writeln!(
        out,
        "            _ => Err(UnknownEnumName::new(\"{name}\", name)),"
    )?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// Dictionary name of this value, if it is a declared member.")?;
    writeln!(out, "    pub fn name(self) -> Option<&'static str> {{")?;
    writeln!(
        out,
        "        Self::VALUES.iter().find(|(_, v)| *v == self).map(|(n, _)| *n)"
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl BinaryEncode for {name} {{")?;
    writeln!(
        out,
        "    fn encode(&self, buf: &mut ::bytes::BytesMut) -> Result<(), CodecError> {{"
    )?;
    writeln!(out, "        self.0.encode(buf)")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl BinaryDecode for {name} {{")?;
    writeln!(
        out,
        "    fn decode(buf: &mut ::bytes::Bytes) -> Result<Self, CodecError> {{"
    )?;
    writeln!(out, "        {int}::decode(buf).map(Self)")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn format_ext_object(out: &mut String, t: &Type) -> Result {
    let name = &t.name;
    let buf = if t.fields.is_empty() { "_buf" } else { "buf" };

    writeln!(out)?;
    match &t.base {
        Some(base) => writeln!(out, "/// `{name}` extension object, derived from `{base}`.")?,
        None => writeln!(out, "/// `{name}` extension object.")?,
    }
    writeln!(out, "#[derive(Debug, Clone, Default, PartialEq)]")?;
    if t.fields.is_empty() {
        writeln!(out, "pub struct {name} {{}}")?;
    } else {
        writeln!(out, "pub struct {name} {{")?;
        for f in &t.fields {
            writeln!(out, "    pub {}: {},", f.ident, f.ty)?;
        }
        writeln!(out, "}}")?;
    }

    writeln!(out)?;
    writeln!(out, "impl BinaryEncode for {name} {{")?;
    writeln!(
        out,
        "    fn encode(&self, {buf}: &mut ::bytes::BytesMut) -> Result<(), CodecError> {{"
    )?;
    for f in &t.fields {
        writeln!(out, "        self.{}", f.ident)?;
        writeln!(out, "            .encode(buf)")?;
        writeln!(
            out,
            "            .map_err(|e| e.in_field(\"{name}\", \"{}\"))?;",
            f.name
        )?;
    }
    writeln!(out, "        Ok(())")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    writeln!(out)?;
    writeln!(out, "impl BinaryDecode for {name} {{")?;
    writeln!(
        out,
        "    fn decode({buf}: &mut ::bytes::Bytes) -> Result<Self, CodecError> {{"
    )?;
    writeln!(out, "        Ok(Self {{")?;
    for f in &t.fields {
        writeln!(out, "            {}: BinaryDecode::decode(buf)", f.ident)?;
        writeln!(
            out,
            "                .map_err(|e| e.in_field(\"{name}\", \"{}\"))?,",
            f.name
        )?;
    }
    writeln!(out, "        }})")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    writeln!(out)?;
    writeln!(out, "impl ExtensionObjectBody for {name} {{")?;
    writeln!(out, "    fn type_name(&self) -> &'static str {{")?;
    writeln!(out, "        \"{name}\"")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn encoding_id(&self) -> u32 {{")?;
    writeln!(out, "        id::{}", const_ident(&encoding_id_name(name)))?;
    writeln!(out, "    }}")?;
    if t.is_request() {
        format_capability_accessors(out, "request", "Request")?;
    }
    if t.is_response() {
        format_capability_accessors(out, "response", "Response")?;
    }
    writeln!(out, "}}")?;

    if let Some(first) = t.fields.first() {
        let capability = if t.is_request() {
            Some(("Request", "RequestHeader"))
        } else if t.is_response() {
            Some(("Response", "ResponseHeader"))
        } else {
            None
        };
        if let Some((capability, header)) = capability {
            writeln!(out)?;
            writeln!(out, "impl {capability} for {name} {{")?;
            writeln!(out, "    fn header(&self) -> Option<&{header}> {{")?;
            writeln!(out, "        self.{}.as_deref()", first.ident)?;
            writeln!(out, "    }}")?;
            writeln!(out)?;
            writeln!(out, "    fn set_header(&mut self, header: {header}) {{")?;
            writeln!(out, "        self.{} = Some(Box::new(header));", first.ident)?;
            writeln!(out, "    }}")?;
            writeln!(out, "}}")?;
        }
    }
    Ok(())
}

fn format_capability_accessors(out: &mut String, method: &str, capability: &str) -> Result {
    writeln!(out)?;
    writeln!(
        out,
        "    fn as_{method}(&self) -> Option<&dyn {capability}> {{"
    )?;
    writeln!(out, "        Some(self)")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "    fn as_{method}_mut(&mut self) -> Option<&mut dyn {capability}> {{"
    )?;
    writeln!(out, "        Some(self)")?;
    writeln!(out, "    }}")?;
    Ok(())
}
