use uabin::{
    Argument, AttributeId, ChannelSecurityToken, DateTime, EnumDefinition, EnumField,
    ExtensionObjectBody, LocalizedText, NodeId, QualifiedName, ReadValueId,
    RedundantServerDataType, ServerState, StructureDefinition, StructureField, StructureType,
    conformance::{CodecTestCase, run_codec_test},
    decode_exact, encode_to_vec, id,
};

#[test]
fn fields_encode_in_declaration_order() {
    let value = ReadValueId {
        node_id: Some(Box::new(NodeId::numeric(0, 85))),
        attribute_id: AttributeId::VALUE,
        index_range: "1:2".to_string(),
        data_encoding: Some(Box::new(QualifiedName::new(0, "Default Binary"))),
    };
    let mut expected = vec![
        0x00, 0x55, // NodeId
        0x0d, 0x00, 0x00, 0x00, // AttributeId
        0x03, 0x00, 0x00, 0x00, b'1', b':', b'2', // IndexRange
        0x00, 0x00, 0x0e, 0x00, 0x00, 0x00, // DataEncoding
    ];
    expected.extend(b"Default Binary");
    run_codec_test(&[CodecTestCase::new("read value id", value, expected)]);
}

#[test]
fn primitive_only_structures_are_byte_exact() {
    run_codec_test(&[
        CodecTestCase::new(
            "security token",
            ChannelSecurityToken {
                channel_id: 1,
                token_id: 2,
                created_at: DateTime(0x01d4_30fd_dd67_9800),
                revised_lifetime: 600_000,
            },
            vec![
                0x01, 0x00, 0x00, 0x00, // ChannelId
                0x02, 0x00, 0x00, 0x00, // TokenId
                0x00, 0x98, 0x67, 0xdd, 0xfd, 0x30, 0xd4, 0x01, // CreatedAt
                0xc0, 0x27, 0x09, 0x00, // RevisedLifetime
            ],
        ),
    ]);
    run_codec_test(&[CodecTestCase::new(
        "redundant server",
        RedundantServerDataType {
            server_id: "s".to_string(),
            service_level: 200,
            server_state: ServerState::RUNNING,
        },
        vec![0x01, 0x00, 0x00, 0x00, b's', 0xc8, 0x00, 0x00, 0x00, 0x00],
    )]);
}

#[test]
fn length_fields_are_folded_into_arrays() {
    // Exhaustive literal: no `no_of_array_dimensions` field exists.
    let argument = Argument {
        name: "Speed".to_string(),
        data_type: Some(Box::new(NodeId::numeric(0, 11))),
        value_rank: 1,
        array_dimensions: Some(vec![4]),
        description: Some(Box::new(LocalizedText::text("rpm"))),
    };
    let bytes = encode_to_vec(&argument).unwrap();
    // name(9) + data type(2) + value rank(4), then one-element dimensions array.
    assert_eq!(&bytes[15..23], &[0x01, 0, 0, 0, 0x04, 0, 0, 0]);
    assert_eq!(decode_exact::<Argument>(&bytes).unwrap(), argument);
}

#[test]
fn definitions_nest_recursively() {
    let definition = EnumDefinition {
        fields: Some(vec![Some(Box::new(EnumField {
            value: 3,
            display_name: Some(Box::new(LocalizedText::text("Three"))),
            description: Some(Box::new(LocalizedText::default())),
            name: "Three".to_string(),
        }))]),
    };
    let bytes = encode_to_vec(&definition).unwrap();
    let decoded: EnumDefinition = decode_exact(&bytes).unwrap();
    assert_eq!(decoded, definition);
    assert_eq!(definition.type_name(), "EnumDefinition");
    assert_eq!(definition.encoding_id(), id::ENUM_DEFINITION_ENCODING_DEFAULT_BINARY);

    let structure = StructureDefinition {
        structure_type: StructureType::UNION,
        fields: Some(vec![Some(Box::new(StructureField {
            name: "A".to_string(),
            value_rank: -1,
            ..Default::default()
        }))]),
        ..Default::default()
    };
    let bytes = encode_to_vec(&structure).unwrap();
    let reencoded = encode_to_vec(&decode_exact::<StructureDefinition>(&bytes).unwrap()).unwrap();
    assert_eq!(reencoded, bytes);
}
