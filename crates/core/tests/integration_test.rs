//! Integration tests for the full huffcode pipeline.
//!
//! These tests verify end-to-end behavior: text -> frequency map -> table ->
//! (persist) -> encode -> artifact file -> decode, with verification that
//! output matches input.

use huffcode_core::{
    artifact::EncodedArtifact,
    decode::{decode, decode_file},
    encode::{encode, encode_file},
    error::{DecodeError, Error},
    store::{load_or_build, load_table, save_table},
    Baseline, CodeTable, FrequencyMap, DEFAULT_BASELINE,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate text with a skewed symbol distribution.
///
/// Mixes runs of a single symbol, English-like letters, and arbitrary
/// printable ASCII so that code lengths vary widely.
fn generate_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(len);

    while text.len() < len {
        match rng.gen_range(0..10) {
            0..=2 => {
                let symbol = rng.gen_range(b'a'..=b'z') as char;
                let run = rng.gen_range(1..20);
                text.extend(std::iter::repeat(symbol).take(run));
            }
            3..=6 => {
                let alphabet = b"etaoinshrdlu .,\n";
                let idx = rng.gen_range(0..alphabet.len());
                text.push(alphabet[idx] as char);
            }
            _ => text.push(rng.gen_range(0x20u8..0x7f) as char),
        }
    }

    text.truncate(len);
    text
}

fn assert_prefix_free(table: &CodeTable) {
    let mut codes: Vec<&str> = table.iter().map(|(_, c)| c).collect();
    codes.sort_unstable();
    for pair in codes.windows(2) {
        assert!(!pair[1].starts_with(pair[0]), "{} prefixes {}", pair[0], pair[1]);
    }
}

/// Round-trip many random texts through a table built from each.
#[test]
fn test_round_trip_random_texts() {
    for seed in 0..50 {
        let text = generate_text(seed, 1 + seed as usize * 37);
        let frequencies = FrequencyMap::from_text(&text).with_baseline(&Baseline::Default);
        let table = CodeTable::from_frequencies(&frequencies).unwrap();

        let artifact = encode(&text, &table).unwrap();
        let bytes = artifact.to_bytes();
        let parsed = EncodedArtifact::parse(&bytes).unwrap();

        assert_eq!(decode(&parsed, &table).unwrap(), text, "seed {seed}");
    }
}

/// A baseline table encodes text it was never built from.
#[test]
fn test_baseline_table_covers_unseen_text() {
    let table = CodeTable::from_frequencies(
        &FrequencyMap::from_text("only a few letters").with_baseline(&Baseline::Default),
    )
    .unwrap();

    for &symbol in DEFAULT_BASELINE.iter() {
        assert!(table.contains(symbol), "{symbol:?} missing");
    }

    let other = generate_text(7, 2000);
    let artifact = encode(&other, &table).unwrap();
    assert_eq!(decode(&artifact, &table).unwrap(), other);
}

#[test]
fn test_tables_are_prefix_free() {
    for seed in 100..120 {
        let text = generate_text(seed, 500);
        let table = CodeTable::from_frequencies(&FrequencyMap::from_text(&text)).unwrap();
        assert_prefix_free(&table);
    }
}

#[test]
fn test_tables_are_deterministic() {
    let text = generate_text(42, 4000);
    let frequencies = FrequencyMap::from_text(&text).with_baseline(&Baseline::Default);

    let first = CodeTable::from_frequencies(&frequencies).unwrap();
    let second = CodeTable::from_frequencies(&frequencies.clone()).unwrap();
    assert_eq!(first, second);

    // Serialized form is stable too
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_padding_accounts_for_every_byte() {
    for seed in 200..230 {
        let text = generate_text(seed, seed as usize % 97);
        let table = CodeTable::from_frequencies(
            &FrequencyMap::from_text(&text).with_baseline(&Baseline::Default),
        )
        .unwrap();

        let bits: usize = text.chars().map(|c| table.code(c).unwrap().len()).sum();
        let artifact = encode(&text, &table).unwrap();

        assert!((1..=8).contains(&artifact.padding));
        assert_eq!(artifact.payload.len(), (bits + artifact.padding as usize).div_ceil(8));
        assert_eq!(artifact.bit_len().unwrap(), bits);
    }
}

/// Full file pipeline: build and persist a table, encode, decode.
#[test]
fn test_file_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let table_path = dir.path().join("table.json");
    let packed = dir.path().join("input.bin");

    let text = generate_text(9, 5000);
    std::fs::write(&input, &text).unwrap();

    let frequencies = FrequencyMap::from_path(&input).unwrap().with_baseline(&Baseline::Default);
    let table = CodeTable::from_frequencies(&frequencies).unwrap();
    save_table(&table_path, &table).unwrap();

    let loaded = load_table(&table_path).unwrap();
    assert_eq!(loaded, table);

    let artifact = encode_file(&input, &loaded, &packed).unwrap();
    assert!(artifact.byte_len() < text.len());
    assert_eq!(std::fs::metadata(&packed).unwrap().len(), artifact.byte_len() as u64);

    assert_eq!(decode_file(&packed, &loaded).unwrap(), text);
}

/// First encode creates the table; later encodes reuse it.
#[test]
fn test_table_reused_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("shared.json");

    let first = generate_text(1, 800);
    let table = load_or_build(&table_path, &first, &Baseline::Default).unwrap();
    assert!(table_path.exists());

    let second = generate_text(2, 800);
    let reused = load_or_build(&table_path, &second, &Baseline::Default).unwrap();
    assert_eq!(reused, table);

    let artifact = encode(&second, &reused).unwrap();
    assert_eq!(decode(&artifact, &table).unwrap(), second);
}

#[test]
fn test_wrong_table_is_reported() {
    let table = CodeTable::from_codes([('a', "0"), ('b', "10"), ('c', "11")]).unwrap();
    let artifact = encode("cab", &table).unwrap();

    let missing_c = CodeTable::from_codes([('a', "0"), ('b', "10")]).unwrap();
    assert!(matches!(
        decode(&artifact, &missing_c),
        Err(Error::Decode(DecodeError::DeadEnd { position: 1 }))
    ));
}

#[test]
fn test_non_ascii_text() {
    let text = "naïve café ünïcödé ✓ ✓ ✓ 日本語";
    let table = CodeTable::from_frequencies(
        &FrequencyMap::from_text(text).with_baseline(&Baseline::Default),
    )
    .unwrap();

    let artifact = encode(text, &table).unwrap();
    assert_eq!(decode(&artifact, &table).unwrap(), text);
}

#[test]
fn test_unseen_symbol_without_baseline_fails_encode() {
    let table = CodeTable::from_frequencies(&FrequencyMap::from_text("abc")).unwrap();
    assert!(matches!(
        encode("abcd", &table),
        Err(Error::MissingSymbol { symbol: 'd', position: 3 })
    ));
}
