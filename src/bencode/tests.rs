use bytes::Bytes;
use proptest::prelude::*;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-5e").unwrap(), Value::Integer(-5));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(decode(b"i12345e").unwrap(), Value::Integer(12345));
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    for input in [
        &b"i-0e"[..],
        b"i01e",
        b"ie",
        b"i-e",
        b"i-01e",
        b"i1x2e",
        b"i9223372036854775808e",
    ] {
        assert!(
            matches!(decode(input), Err(BencodeError::InvalidInteger { .. })),
            "{:?} should be an invalid integer",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_decode_integer_truncated() {
    assert_eq!(
        decode(b"i42"),
        Err(BencodeError::UnexpectedEnd { offset: 3 })
    );
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Bytes::new()));
    assert_eq!(
        decode(b"3:\xff\x00\xfe").unwrap(),
        Value::Bytes(Bytes::from_static(b"\xff\x00\xfe"))
    );
}

#[test]
fn test_decode_bytes_length_past_end() {
    assert_eq!(
        decode(b"10:short"),
        Err(BencodeError::UnexpectedEnd { offset: 8 })
    );
    assert!(matches!(
        decode(b"99999999999999999999999:x"),
        Err(BencodeError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_decode_bytes_bad_length() {
    assert!(matches!(
        decode(b"04:spam"),
        Err(BencodeError::MalformedInput { offset: 0, .. })
    ));
    assert!(matches!(
        decode(b"4spam"),
        Err(BencodeError::MalformedInput { offset: 1, .. })
    ));
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    let list = result.as_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], Value::Bytes(Bytes::from_static(b"spam")));
    assert_eq!(list[1], Value::Integer(42));
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = result.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(result.get(b"cow").and_then(Value::as_str), Some("moo"));
}

#[test]
fn test_decode_dict_keeps_source_order() {
    let result = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
    let keys: Vec<&[u8]> = result.as_dict().unwrap().keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec![&b"spam"[..], b"cow"]);
}

#[test]
fn test_decode_dict_duplicate_key() {
    assert_eq!(
        decode(b"d1:ai1e1:ai2ee"),
        Err(BencodeError::DuplicateKey {
            offset: 7,
            key: "a".into()
        })
    );
}

#[test]
fn test_decode_dict_non_string_key() {
    assert_eq!(
        decode(b"di1ei2ee"),
        Err(BencodeError::InvalidDictionaryKey { offset: 1 })
    );
    assert_eq!(
        decode(b"dl1:aei1ee"),
        Err(BencodeError::InvalidDictionaryKey { offset: 1 })
    );
}

#[test]
fn test_decode_non_utf8_keys() {
    let result = decode(b"d1:\xffi1e1:\x01i2ee").unwrap();
    assert_eq!(result.get(b"\xff").and_then(Value::as_integer), Some(1));
    assert_eq!(encode(&result), b"d1:\x01i2e1:\xffi1ee");
}

#[test]
fn test_truncated_containers() {
    for input in [&b"l"[..], b"li1e", b"d", b"d1:a", b"d1:ai1e", b""] {
        assert!(
            matches!(decode(input), Err(BencodeError::UnexpectedEnd { .. })),
            "{:?} should be truncated",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_unexpected_byte() {
    assert!(matches!(
        decode(b"x"),
        Err(BencodeError::MalformedInput { offset: 0, .. })
    ));
    assert!(matches!(
        decode(b"lxe"),
        Err(BencodeError::MalformedInput { offset: 1, .. })
    ));
}

#[test]
fn test_nesting_limit() {
    let mut deep = vec![b'l'; 100];
    deep.extend(vec![b'e'; 100]);
    assert!(matches!(
        decode(&deep),
        Err(BencodeError::NestingTooDeep { .. })
    ));

    let mut shallow = vec![b'l'; 10];
    shallow.extend(vec![b'e'; 10]);
    assert!(decode(&shallow).is_ok());
}

fn nested_lists(depth: usize) -> Vec<u8> {
    let mut data = vec![b'l'; depth];
    data.extend(vec![b'e'; depth]);
    data
}

#[test]
fn test_nesting_limit_boundary() {
    assert!(decode(&nested_lists(64)).is_ok());
    assert_eq!(
        decode(&nested_lists(65)),
        Err(BencodeError::NestingTooDeep { offset: 64 })
    );
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::MalformedInput { offset: 4, .. })
    ));
}

#[test]
fn test_decode_prefix_reports_consumed() {
    let (value, used) = decode_prefix(b"d1:ai1eegarbage").unwrap();
    assert_eq!(used, 8);
    assert_eq!(value.get(b"a").and_then(Value::as_integer), Some(1));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"spam"))), b"4:spam");
    assert_eq!(encode(&Value::Bytes(Bytes::new())), b"0:");
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![
        Value::Bytes(Bytes::from_static(b"spam")),
        Value::Integer(42),
    ]);
    assert_eq!(encode(&list), b"l4:spami42ee");
}

#[test]
fn test_encode_dict_sorts_keys() {
    let value = Value::dict([
        ("zebra", Value::Integer(1)),
        ("apple", Value::Integer(2)),
        ("mango", Value::Integer(3)),
    ]);
    assert_eq!(encode(&value), b"d5:applei2e5:mangoi3e5:zebrai1ee");
}

#[test]
fn test_encode_into_appends() {
    let mut buf = b"prefix".to_vec();
    encode_into(&Value::Integer(7), &mut buf);
    assert_eq!(buf, b"prefixi7e");
}

#[test]
fn test_roundtrip_canonical() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_reencode_differs_for_unsorted_input() {
    let original = b"d4:name4:test6:lengthi1ee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded);
    assert_ne!(encoded, original);
    assert_eq!(decode(&encoded).unwrap(), decoded);
}

#[test]
fn test_spans_of_nested_values() {
    let data = b"d4:infod6:lengthi10e4:name5:a.txte4:listli1e3:twoee";
    let decoded = decode_spanned(data).unwrap();
    assert_eq!(decoded.span(), ByteSpan::new(0, data.len()));
    assert_eq!(decoded.consumed(), data.len());

    let info = decoded.get(b"info").unwrap();
    assert_eq!(info.raw(), b"d6:lengthi10e4:name5:a.txte");
    assert_eq!(info.get(b"name").unwrap().raw(), b"5:a.txt");

    let list = decoded.get(b"list").unwrap();
    assert_eq!(list.index(1).unwrap().raw(), b"3:two");
    assert!(list.index(2).is_none());
    assert!(list.get(b"x").is_none());
}

#[test]
fn test_spans_ignore_trailing_bytes() {
    let data = b"d1:ai1ee\n";
    let decoded = decode_spanned(data).unwrap();
    assert_eq!(decoded.consumed(), 8);
    assert_eq!(decoded.input().len(), 9);
    assert_eq!(decoded.span().slice(data), Some(&b"d1:ai1ee"[..]));
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::Bytes(Bytes::from_static(b"\xff"));
    assert_eq!(value.as_str(), None);
    assert_eq!(value.as_str_lossy().as_deref(), Some("\u{fffd}"));

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
}

#[test]
fn test_dict_equality_ignores_order() {
    let a = Value::dict([("a", Value::Integer(1)), ("b", Value::Integer(2))]);
    let b = Value::dict([("b", Value::Integer(2)), ("a", Value::Integer(1))]);
    assert_eq!(a, b);
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(|b| Value::Bytes(Bytes::from(b))),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            proptest::collection::vec((proptest::collection::vec(any::<u8>(), 0..8), inner), 0..6)
                .prop_map(|entries| {
                    Value::Dict(
                        entries
                            .into_iter()
                            .map(|(k, v)| (Bytes::from(k), v))
                            .collect(),
                    )
                }),
        ]
    })
}

fn assert_spans_replay(node: Spanned<'_, '_>) {
    assert_eq!(&decode(node.raw()).unwrap(), node.value());
    match node.value() {
        Value::List(items) => {
            for idx in 0..items.len() {
                assert_spans_replay(node.index(idx).unwrap());
            }
        }
        Value::Dict(dict) => {
            for key in dict.keys() {
                assert_spans_replay(node.get(key).unwrap());
            }
        }
        Value::Integer(_) | Value::Bytes(_) => {}
    }
}

proptest! {
    #[test]
    fn encode_then_decode_is_identity(value in arb_value()) {
        prop_assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn every_span_decodes_to_its_value(value in arb_value()) {
        let bytes = encode(&value);
        let decoded = decode_spanned(&bytes).unwrap();
        assert_spans_replay(decoded.root());
    }
}
