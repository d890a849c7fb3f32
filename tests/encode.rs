use kmer_bloom_index::encode::*;
use kmer_bloom_index::Error;

#[test]
fn test_encode_revcomp_canonical() {
    let s = b"AC";
    assert_eq!(reverse_complement(s), b"GT");
    assert_eq!(canonicalize(s), b"AC");
    assert_eq!(canonicalize(b"GT"), b"AC");
    // A*1 + C*4 + 1
    assert_eq!(encode(b"AC"), 5);
    assert_eq!(canonical_code(b"GT"), 5);
}

#[test]
fn test_all_a_is_code_one() {
    assert_eq!(canonical_code(b"AA"), 1);
    assert_eq!(canonical_code(b"TT"), 1);
    assert_eq!(canonical_code(&[b'A'; MAX_K]), 1);
    assert_eq!(canonical_code(&[b'T'; MAX_K]), 1);
}

#[test]
fn test_palindromes_unchanged() {
    assert_eq!(canonicalize(b"CG"), b"CG");
    assert_eq!(canonicalize(b"ACGT"), b"ACGT");
    assert_eq!(encode(b"CG"), 10);
    assert_eq!(encode(b"ACGT"), 229);
}

#[test]
fn test_max_code_fits_for_k31() {
    let top = [b'G'; MAX_K];
    // GGG..G canonicalizes to CCC..C
    assert_eq!(canonicalize(&top), vec![b'C'; MAX_K]);
    let all_t_lsb = encode(&[b'T'; MAX_K]);
    assert_eq!(all_t_lsb, 1u64 << 62);
}

#[test]
fn test_encoding_is_a_bijection_on_canonical_kmers() {
    use std::collections::{BTreeSet, HashSet};
    for k in 1..=6usize {
        let total = 4usize.pow(k as u32);
        let mut canon = BTreeSet::new();
        for n in 0..total {
            let kmer: Vec<u8> = (0..k).map(|i| b"ACGT"[(n >> (2 * i)) & 3]).collect();
            let c = canonicalize(&kmer);
            assert_eq!(c, canonicalize(&reverse_complement(&kmer)));
            canon.insert(c);
        }
        let mut codes = HashSet::new();
        for c in &canon {
            let code = encode(c);
            assert!(code >= 1 && code <= total as u64, "k={k} code={code}");
            assert!(codes.insert(code), "duplicate code for k={k}");
        }
    }
}

#[test]
fn test_roll_drops_first_appends_last() {
    let mut window = *b"ACGT";
    let code = roll(&mut window, b'A');
    assert_eq!(&window, b"CGTA");
    assert_eq!(code, canonical_code(b"CGTA"));
    assert_eq!(code, canonical_code(b"TACG"));
}

#[test]
fn test_kmer_window_sequence() {
    let mut w = KmerWindow::new(4);
    let mut seen: Vec<String> = Vec::new();
    let mut codes = Vec::new();
    for &b in b"ACGTACGT" {
        if let Some(code) = w.push(b).unwrap() {
            seen.push(String::from_utf8(w.as_bytes().to_vec()).unwrap());
            codes.push(code);
        }
    }
    assert_eq!(seen, ["ACGT", "CGTA", "GTAC", "TACG", "ACGT"]);
    assert_eq!(codes, [229, 58, 79, 58, 229]);

    let mut distinct: Vec<&str> = Vec::new();
    for s in &seen {
        if !distinct.contains(&s.as_str()) {
            distinct.push(s);
        }
    }
    assert_eq!(distinct, ["ACGT", "CGTA", "GTAC", "TACG"]);
}

#[test]
fn test_kmer_window_rejects_invalid_symbol() {
    let mut w = KmerWindow::new(3);
    assert!(w.push(b'A').unwrap().is_none());
    match w.push(b'x') {
        Err(Error::InvalidSymbol { symbol, offset }) => {
            assert_eq!(symbol, b'x');
            assert_eq!(offset, 1);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_validate_kmer() {
    assert!(validate_kmer(b"ACG", 3).is_ok());
    assert!(matches!(
        validate_kmer(b"ACGT", 3),
        Err(Error::InvalidLength {
            expected: 3,
            found: 4
        })
    ));
    assert!(matches!(
        validate_kmer(b"ANG", 3),
        Err(Error::InvalidSymbol {
            symbol: b'N',
            offset: 1
        })
    ));
}
