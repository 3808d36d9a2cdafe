use bencode_core::{decode, encode, to_json_string, Value};

/// Assert that decode → encode reproduces canonical input byte for byte.
fn assert_roundtrip(input: &[u8]) {
    let value = decode(input).expect("decode failed");
    let encoded = encode(&value).expect("encode failed");
    assert_eq!(
        encoded,
        input,
        "Roundtrip failed:\n  input:  {}\n  output: {}",
        String::from_utf8_lossy(input),
        String::from_utf8_lossy(&encoded)
    );
}

fn sample_torrent() -> Vec<u8> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.torrent");
    std::fs::read(path).expect("sample.torrent fixture must exist")
}

// ============================================================================
// Canonical roundtrips
// ============================================================================

#[test]
fn roundtrip_scalars() {
    assert_roundtrip(b"i0e");
    assert_roundtrip(b"i-42e");
    assert_roundtrip(b"i9223372036854775807e");
    assert_roundtrip(b"0:");
    assert_roundtrip(b"5:hello");
}

#[test]
fn roundtrip_raw_bytes() {
    assert_roundtrip(b"4:\x00\xff\x80\x7f");
    assert_roundtrip(b"3:\xed\xa0\x80");
}

#[test]
fn roundtrip_containers() {
    assert_roundtrip(b"le");
    assert_roundtrip(b"de");
    assert_roundtrip(b"l0:e");
    assert_roundtrip(b"li1e5:helloli1ei2ei3eed1:ai1e1:bi2eee");
    assert_roundtrip(b"d3:bar4:spam3:fooi42ee");
}

#[test]
fn roundtrip_non_utf8_keys() {
    assert_roundtrip(b"d1:ai1e2:\xff\xfei2ee");
}

#[test]
fn unsorted_input_reencodes_canonically() {
    let value = decode(b"d3:fooi42e3:bar4:spame").unwrap();
    assert_eq!(encode(&value).unwrap(), b"d3:bar4:spam3:fooi42ee");
}

// ============================================================================
// Torrent fixture
// ============================================================================

#[test]
fn torrent_decodes_metadata() {
    let torrent = decode(&sample_torrent()).unwrap();

    assert_eq!(
        torrent.get(b"announce").and_then(Value::as_str),
        Some("https://tracker.example.org/announce")
    );
    assert_eq!(
        torrent.get(b"creation date").and_then(Value::as_integer),
        Some(1_700_000_000)
    );

    let tiers = torrent.get(b"announce-list").and_then(Value::as_list).unwrap();
    assert_eq!(tiers.len(), 2);
    assert_eq!(
        tiers[1].as_list().unwrap()[0].as_str(),
        Some("udp://backup.example.org:6969")
    );

    let info = torrent.get(b"info").unwrap();
    assert_eq!(
        info.get(b"piece length").and_then(Value::as_integer),
        Some(262_144)
    );
    assert_eq!(info.get(b"name").and_then(Value::as_str), Some("sample.iso"));
}

#[test]
fn torrent_pieces_stay_raw() {
    let torrent = decode(&sample_torrent()).unwrap();
    let pieces = torrent.get(b"info").and_then(|i| i.get(b"pieces")).unwrap();

    assert!(!pieces.is_text());
    let bytes = pieces.as_bytes().unwrap();
    assert_eq!(bytes.len(), 40);
    assert_eq!(&bytes[..4], &[0x1cu8, 0xd0, 0x42, 0x8d]);
    assert_eq!(&bytes[36..], &[0x1eu8, 0x19, 0xeb, 0x04]);
}

#[test]
fn torrent_roundtrips_byte_for_byte() {
    let raw = sample_torrent();
    assert_roundtrip(&raw);

    // The info dictionary re-encodes to the exact bytes it occupied in the file,
    // which is what an info-hash is computed over.
    let info = decode(&raw).unwrap().get(b"info").cloned().unwrap();
    let info_bytes = encode(&info).unwrap();
    let needle = b"4:infod";
    let start = raw
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("info key present")
        + 6;
    assert_eq!(&raw[start..start + info_bytes.len()], info_bytes.as_slice());
}

#[test]
fn torrent_renders_as_json() {
    let torrent = decode(&sample_torrent()).unwrap();
    let json = to_json_string(&torrent, false).unwrap();
    assert!(json.contains(r#""announce":"https://tracker.example.org/announce""#));
    assert!(json.contains(r#""piece length":262144"#));
    assert!(json.contains(r#""pieces":[28,208,66,141,"#));
}
