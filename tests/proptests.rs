use kmer_bloom_index::encode::{self, RollingEncoder, map_base, roll};
use kmer_bloom_index::hash::derive;
use kmer_bloom_index::*;
use proptest::prelude::*;

fn kmer_strategy(k: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), k)
}

proptest! {
    #[test]
    fn prop_revcomp_equivalence(kmer in kmer_strategy(1..=31)) {
        let rc = reverse_complement(&kmer);
        prop_assert_eq!(canonical_code(&kmer), canonical_code(&rc));
    }

    #[test]
    fn prop_code_in_range(kmer in kmer_strategy(1..=31)) {
        let code = canonical_code(&kmer);
        let k = kmer.len() as u32;
        prop_assert!(code >= 1);
        prop_assert!(code <= 4u64.pow(k));
    }

    #[test]
    fn prop_canonical_is_min(kmer in kmer_strategy(1..=31)) {
        let rc = reverse_complement(&kmer);
        let expect = if kmer <= rc { kmer.clone() } else { rc };
        prop_assert_eq!(encode::canonicalize(&kmer), expect);
    }

    // The O(1) rolling encoder must agree with canonicalize-then-encode on every window.
    #[test]
    fn prop_rolling_matches_scratch(
        k in 1usize..=31,
        seq in prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..200)
    ) {
        let mut enc = RollingEncoder::new(k);
        let mut rolled = Vec::new();
        for &b in &seq {
            if let Some(code) = enc.push_digit(map_base(b).unwrap()) {
                rolled.push(code);
            }
        }
        let scratch: Vec<u64> = seq.windows(k).map(canonical_code).collect();
        prop_assert_eq!(&rolled, &scratch);

        if seq.len() >= k {
            let mut window = seq[..k].to_vec();
            let mut via_roll = vec![canonical_code(&window)];
            for &b in &seq[k..] {
                via_roll.push(roll(&mut window, b));
            }
            prop_assert_eq!(&via_roll, &scratch);
        }
    }

    #[test]
    fn prop_derive_deterministic(
        seed in any::<u64>(),
        count in 1usize..=64,
        modulus in 1u64..=(1u64 << 34)
    ) {
        let a = derive(seed, count, modulus);
        let b = derive(seed, count, modulus);
        prop_assert_eq!(a.len(), count);
        prop_assert!(a.iter().all(|&h| h < modulus));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_no_false_negatives(
        prior in prop::collection::vec(kmer_strategy(11..=11), 0..50),
        kmer in kmer_strategy(11..=11),
        bits in 1u64..4096,
        nf in 1usize..=8
    ) {
        let mut filter = BloomFilter::new(bits, nf).unwrap();
        for p in &prior {
            filter.insert(canonical_code(p));
        }
        filter.insert(canonical_code(&kmer));
        prop_assert!(filter.query(canonical_code(&kmer)));
        prop_assert!(filter.query(canonical_code(&reverse_complement(&kmer))));
    }

    #[test]
    fn prop_insert_idempotent(code in 1u64.., bits in 1u64..10_000, nf in 1usize..=16) {
        let mut once = BloomFilter::new(bits, nf).unwrap();
        once.insert(code);
        let mut twice = once.clone();
        twice.insert(code);
        prop_assert_eq!(once, twice);
    }
}
