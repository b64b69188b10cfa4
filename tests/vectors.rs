//! Stream and encode vectors written as hex, the way they appear on a line
//! analyzer.

use slip_framing::{
    decode, encode, Encoding, Error, PacketBuffer, Packets, ReadError, SplitError,
};

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).unwrap()
}

fn scan(encoding: Encoding, input: &[u8]) -> Result<Vec<Vec<u8>>, ReadError> {
    Packets::new(encoding, input).collect()
}

#[test]
fn standard_stream() {
    let input = unhex("010203C0 04DBDCC0 DBDD05C0");

    let packets = scan(Encoding::STANDARD, &input).unwrap();
    assert_eq!(
        vec![unhex("010203"), unhex("04C0"), unhex("DB05")],
        packets
    );
}

#[test]
fn alternate_stream() {
    let input = unhex("AB010203BC AB04CDACCDBDBC ABCDCE05BC");

    let packets = scan(Encoding::ALTERNATE, &input).unwrap();
    assert_eq!(
        vec![unhex("010203"), unhex("04ABBC"), unhex("CD05")],
        packets
    );
}

#[test]
fn alternate_stream_invalid_control_char() {
    let input = unhex("AB04CDABCDBDBC");

    let err = scan(Encoding::ALTERNATE, &input).unwrap_err();
    assert!(matches!(
        err,
        ReadError::Split(SplitError::InvalidControlChar {
            index: 3,
            byte: 0xAB,
            consumed: 7
        })
    ));

    let mut buffer = PacketBuffer::new(Encoding::ALTERNATE);
    let results = buffer.push(&input);
    assert_eq!(1, results.len());
    assert!(results[0].is_err());
}

#[test]
fn standard_encode() {
    let input = unhex("010203 C0   DC DB   DD");
    let expected = unhex("010203 DBDC DC DBDD DD C0");

    assert_eq!(expected, Encoding::STANDARD.encode(&input));
}

#[test]
fn fixed_encode() {
    assert_eq!(unhex("ABBC"), encode(&[]));
    assert_eq!(
        unhex("AB 0601EF CDCE 02 CDAC CDBD 00 BC"),
        encode(&unhex("0601EFCD02ABBC00"))
    );
}

#[test]
fn fixed_decode_errors() {
    assert_eq!(Err(Error::FrameTooShort { len: 0, min: 2 }), decode(&[]));
    assert_eq!(
        Err(Error::MissingStart { found: 0x01 }),
        decode(&unhex("0102BC"))
    );
    assert_eq!(
        Err(Error::MissingEnd { found: 0x02 }),
        decode(&unhex("AB0102"))
    );
    assert_eq!(
        Err(Error::TruncatedEscape { index: 2 }),
        decode(&unhex("AB01CDBC"))
    );
    assert_eq!(
        Err(Error::InvalidEscapedChar {
            index: 3,
            byte: 0x01
        }),
        decode(&unhex("AB04CD01BC"))
    );
}

#[test]
fn custom_encoding_round_trip() {
    let enc = Encoding::with_start(0x7E, 0x5E, 0x7F, 0x5F, 0x7D, 0x5D).unwrap();
    let payload = unhex("7E 00 7F 7D 5E 5F 5D FF");

    let packet = enc.encode(&payload);
    assert_eq!(unhex("7E 7D5E 00 7D5F 7D5D 5E 5F 5D FF 7F"), packet);
    assert_eq!(payload, enc.decode(&packet).unwrap());
}
