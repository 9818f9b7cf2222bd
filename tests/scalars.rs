#![cfg(all(feature = "derive", feature = "std"))]

use std::fmt::Display;

use bytewalk::{
    avec::{Decode, Decoder},
    error::Error,
};
use csv::ReaderBuilder;

#[derive(Default, Decode)]
struct Big<T>(#[decode(endian = "big")] T);

#[derive(Default, Decode)]
struct Little<T>(T);

#[test]
fn decode_scalar_table() {
    const PATH: &str = "fixtures/scalars.csv";

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(PATH)
        .unwrap();

    for record in reader.records() {
        let record = record.unwrap();
        let (ty, endian, hex, expected) = (&record[0], &record[1], &record[2], &record[3]);
        let bytes = from_hex(hex);

        let found = match ty {
            "u8" => check::<u8>(endian, &bytes),
            "u16" => check::<u16>(endian, &bytes),
            "u32" => check::<u32>(endian, &bytes),
            "u64" => check::<u64>(endian, &bytes),
            "usize" => check::<usize>(endian, &bytes),
            "i8" => check::<i8>(endian, &bytes),
            "i16" => check::<i16>(endian, &bytes),
            "i32" => check::<i32>(endian, &bytes),
            "i64" => check::<i64>(endian, &bytes),
            "f32" => check::<f32>(endian, &bytes),
            "f64" => check::<f64>(endian, &bytes),
            "bool" => check::<bool>(endian, &bytes),
            _ => panic!("unknown type {ty}"),
        };

        assert_eq!(found, expected, "{ty} {endian} {hex}");
    }
}

/// Decode a scalar, checking it consumes exactly its width.
fn check<T: Decode + Default + Display>(endian: &str, bytes: &[u8]) -> String {
    let value = if endian == "big" {
        decode_exact::<Big<T>>(bytes).0
    } else {
        decode_exact::<Little<T>>(bytes).0
    };

    let mut short = Little::<T>::default();
    let err = bytewalk::avec::decode_slice(&bytes[1..], &mut short).unwrap_err();
    assert!(matches!(err, Error::ShortRead { offset: 0, requested } if requested == bytes.len()));

    value.to_string()
}

fn decode_exact<T: Decode + Default>(bytes: &[u8]) -> T {
    let mut value = T::default();
    let mut decoder = Decoder::new(bytes);
    decoder.decode(&mut value).unwrap();
    assert_eq!(decoder.offset(), bytes.len());
    value
}

fn from_hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}
