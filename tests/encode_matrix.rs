/*  ************************************************************

    qrgrid: QR Code symbol generation in pure Rust

    Copyright (C) 2025 the qrgrid authors

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.

    ************************************************************ */

//  ************************************************************
//! Whole-symbol tests: reference scenarios and the structural
//! invariants every encoded symbol must satisfy
//  ************************************************************

use qrgrid::{encode, encode_with, tables, EncodeError, ErrorCorrectionLevel, Mode, QrSymbol};

use ErrorCorrectionLevel::{H, L, M, Q};


//  ************************************************************
//  Reference scenarios
//  ************************************************************

#[test]
fn scenario_hello_world_q() {
    let qr = encode("HELLO WORLD", Q).unwrap();
    assert_eq!(qr.version(), 1);
    assert_eq!(qr.mode(), Mode::AlphaNumeric);
    assert_eq!(qr.error_correction_level(), Q);
    assert_eq!(qr.size(), 21);
    assert!(qr.mask() <= 7);
}

#[test]
fn scenario_numeric_m() {
    let qr = encode("01234567", M).unwrap();
    assert_eq!(qr.version(), 1);
    assert_eq!(qr.mode(), Mode::Numeric);
    assert_eq!(qr.size(), 21);
}

#[test]
fn scenario_empty_payload_l() {
    let qr = encode("", L).unwrap();
    assert_eq!(qr.version(), 1);
    assert_eq!(qr.size(), 21);
}

#[test]
fn scenario_control_bytes_h() {
    let payload = String::from_utf8((0x00..=0x10u8).collect()).unwrap();
    assert_eq!(payload.len(), 17);
    let qr = encode(&payload, H).unwrap();
    assert_eq!(qr.mode(), Mode::EightBit);
    // 17 bytes at level H need version 3 (capacities run 7, 14, 24)
    assert_eq!(qr.version(), 3);
    assert_eq!(qr.size(), 29);
}

#[test]
fn scenario_78_byte_text_l() {
    let payload = "the quick brown fox jumps over the lazy dog. ".repeat(2);
    let payload = &payload[..78];
    assert_eq!(payload.len(), 78);
    let qr = encode(payload, L).unwrap();
    assert_eq!(qr.mode(), Mode::EightBit);
    assert_eq!(qr.version(), 4);
    assert_eq!(qr.size(), 33);
}

#[test]
fn scenario_thousand_digits_l() {
    let payload: String = "0123456789".repeat(100);
    let qr = encode(&payload, L).unwrap();
    assert_eq!(qr.mode(), Mode::Numeric);
    assert_eq!(
        Some(qr.version()),
        tables::version_for_length(1000, Mode::Numeric, L)
    );
    assert_eq!(qr.version(), 13);
}


//  ************************************************************
//  Failure modes
//  ************************************************************

#[test]
fn oversized_payload_is_rejected() {
    let payload = "x".repeat(1274);
    assert_eq!(
        encode(&payload, H).unwrap_err(),
        EncodeError::PayloadTooLarge { len: 1274, ec: H }
    );
    assert!(encode(&"x".repeat(1273), H).is_ok());
}

#[test]
fn forced_alphanumeric_rejects_foreign_bytes() {
    assert_eq!(
        encode_with("Hello", Q, None, Some(Mode::AlphaNumeric), None).unwrap_err(),
        EncodeError::InvalidChar { byte: b'e', mode: Mode::AlphaNumeric }
    );
}

#[test]
fn forced_kanji_is_unsupported() {
    assert_eq!(
        encode_with("12345", L, None, Some(Mode::Kanji), None).unwrap_err(),
        EncodeError::UnsupportedMode { mode: Mode::Kanji }
    );
}

#[test]
fn forced_version_must_hold_the_payload() {
    assert_eq!(
        encode_with(&"x".repeat(20), L, Some(1), None, None).unwrap_err(),
        EncodeError::PayloadTooLarge { len: 20, ec: L }
    );
    let qr = encode_with("x", L, Some(10), None, None).unwrap();
    assert_eq!(qr.version(), 10);
    assert_eq!(qr.size(), 57);
}

#[test]
fn forced_mode_overrides_detection() {
    let qr = encode_with("123", L, None, Some(Mode::EightBit), None).unwrap();
    assert_eq!(qr.mode(), Mode::EightBit);
}


//  ************************************************************
//  Structural invariants
//  ************************************************************

#[test]
fn encoding_is_deterministic() {
    for (payload, ec) in [("HELLO WORLD", Q), ("01234567", M), ("mixed Payload 123!", H)] {
        let a = encode(payload, ec).unwrap();
        let b = encode(payload, ec).unwrap();
        assert_eq!(a.version(), b.version());
        assert_eq!(a.mask(), b.mask());
        assert_eq!(modules_of(&a), modules_of(&b));
    }
}

#[test]
fn size_follows_version() {
    for payload_len in [1usize, 30, 100, 500] {
        let payload = "z".repeat(payload_len);
        let qr = encode(&payload, M).unwrap();
        assert_eq!(qr.size(), 4 * usize::from(qr.version()) + 17);
    }
}

#[test]
fn function_patterns_are_mask_invariant() {
    let n = 21;
    let format_cells = format_cell_set(n);
    let mut reference: Option<Vec<bool>> = None;
    for mask in 0..8u8 {
        let qr = encode_with("MASK INVARIANCE", Q, None, None, Some(mask)).unwrap();
        assert_eq!(qr.size(), n);
        assert_eq!(qr.mask(), mask);
        let cells: Vec<bool> = (0..n * n)
            .filter(|i| qr.is_function_module(i / n, i % n) && !format_cells.contains(&(i / n, i % n)))
            .map(|i| qr.module(i / n, i % n))
            .collect();
        match &reference {
            None => reference = Some(cells),
            Some(expected) => assert_eq!(&cells, expected, "mask {} moved function modules", mask),
        }
    }
}

#[test]
fn finder_timing_and_dark_module_placement() {
    let qr = encode("PLACEMENT", M).unwrap();
    let n = qr.size();
    // Finder centres are all dark
    for &(r, c) in &[(3, 3), (3, n - 4), (n - 4, 3)] {
        assert!(qr.module(r, c));
        // The ring at distance two is light, at three dark, and the
        // separator at distance four is light again
        assert!(!qr.module(r, c - 2));
        assert!(qr.module(r, c - 3));
    }
    assert!(!qr.module(3, 7), "separator next to the top left finder");
    assert!(!qr.module(7, 3), "separator below the top left finder");
    // Timing patterns alternate starting dark at index 8
    for i in 8..n - 8 {
        assert_eq!(qr.module(6, i), i % 2 == 0);
        assert_eq!(qr.module(i, 6), i % 2 == 0);
    }
    // The dark module
    assert!(qr.module(n - 8, 8));
    // Out-of-range reads are light
    assert!(!qr.module(n, 0));
    assert!(!qr.module(0, n));
}

#[test]
fn unmasking_recovers_the_same_data_region() {
    let n = 21;
    let mut reference: Option<Vec<bool>> = None;
    for mask in 0..8u8 {
        let qr = encode_with("UNMASK CHECK 123", Q, None, None, Some(mask)).unwrap();
        let unmasked: Vec<bool> = (0..n * n)
            .filter(|i| !qr.is_function_module(i / n, i % n))
            .map(|i| qr.module(i / n, i % n) ^ mask_predicate(mask, i / n, i % n))
            .collect();
        match &reference {
            None => reference = Some(unmasked),
            Some(expected) => assert_eq!(&unmasked, expected, "mask {} lost data", mask),
        }
    }
}

#[test]
fn format_info_copies_match_and_decode() {
    for ec in ErrorCorrectionLevel::ALL {
        for mask in [0u8, 3, 7] {
            let qr = encode_with("FORMAT", ec, None, None, Some(mask)).unwrap();
            let n = qr.size();
            let (copy_a, copy_b) = format_positions(n);
            let bits_a: Vec<bool> = copy_a.iter().map(|&(r, c)| qr.module(r, c)).collect();
            let bits_b: Vec<bool> = copy_b.iter().map(|&(r, c)| qr.module(r, c)).collect();
            assert_eq!(bits_a, bits_b, "format copies differ for {:?} mask {}", ec, mask);
            let word: u16 = bits_a.iter().fold(0, |acc, &b| acc << 1 | u16::from(b));
            assert_eq!(
                word,
                format_word_reference(ec, mask),
                "format word wrong for {:?} mask {}",
                ec,
                mask
            );
        }
    }
}

#[test]
fn version_info_copies_match_and_decode() {
    // 200 bytes at level L land well past version 7
    let payload = "v".repeat(200);
    let qr = encode(&payload, L).unwrap();
    assert!(qr.version() >= 7);
    let n = qr.size();
    let mut word_top_right: u32 = 0;
    let mut word_bottom_left: u32 = 0;
    for i in (0..18).rev() {
        let (a, b) = (i / 3, n - 11 + i % 3);
        word_top_right = word_top_right << 1 | u32::from(qr.module(a, b));
        word_bottom_left = word_bottom_left << 1 | u32::from(qr.module(b, a));
    }
    assert_eq!(word_top_right, word_bottom_left);
    assert_eq!(word_top_right, version_word_reference(qr.version()));
}

#[test]
fn dark_ratio_is_sane() {
    for (payload, ec) in [
        ("HELLO WORLD", Q),
        ("01234567", M),
        ("Lorem ipsum dolor sit amet, consectetur adipiscing elit", L),
    ] {
        let qr = encode(payload, ec).unwrap();
        let n = qr.size();
        let dark = (0..n * n).filter(|i| qr.module(i / n, i % n)).count();
        let percent = 100 * dark / (n * n);
        assert!(
            (35..=65).contains(&percent),
            "dark ratio {}% out of range for {:?}",
            percent,
            payload
        );
    }
}


//  ************************************************************
//  Randomized sweep
//  ************************************************************

#[test]
fn random_payloads_encode_consistently() {
    let mut rng = Rng::new(0x5EED);
    for round in 0..60 {
        let len = 1 + rng.next() as usize % 250;
        let ec = ErrorCorrectionLevel::ALL[rng.next() as usize % 4];
        let payload: String = (0..len)
            .map(|_| char::from(0x20 + (rng.next() % 0x5F) as u8))
            .collect();
        let qr = encode(&payload, ec).unwrap_or_else(|e| {
            panic!("round {}: failed to encode {:?}: {}", round, payload, e)
        });
        assert_eq!(qr.size(), 4 * usize::from(qr.version()) + 17);
        assert_eq!(
            Some(qr.version()),
            tables::version_for_length(len, qr.mode(), ec),
            "round {}: version not minimal",
            round
        );
        if round % 20 == 0 {
            let again = encode(&payload, ec).unwrap();
            assert_eq!(modules_of(&qr), modules_of(&again), "round {}: not deterministic", round);
        }
    }
}


//  ************************************************************
//  Helpers
//  ************************************************************

fn modules_of(qr: &QrSymbol) -> Vec<bool> {
    let n = qr.size();
    (0..n * n).map(|i| qr.module(i / n, i % n)).collect()
}

// The canonical positions of the format bits, most significant first.
fn format_positions(n: usize) -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let copy_a = vec![
        (8, 0), (8, 1), (8, 2), (8, 3), (8, 4), (8, 5), (8, 7), (8, 8),
        (7, 8), (5, 8), (4, 8), (3, 8), (2, 8), (1, 8), (0, 8),
    ];
    let mut copy_b = Vec::with_capacity(15);
    for i in 0..7 {
        copy_b.push((n - 1 - i, 8));
    }
    for i in 7..15 {
        copy_b.push((8, n - 15 + i));
    }
    (copy_a, copy_b)
}

fn format_cell_set(n: usize) -> std::collections::HashSet<(usize, usize)> {
    let (a, b) = format_positions(n);
    a.into_iter().chain(b).collect()
}

// Reference BCH(15,5) computation of the format word.
fn format_word_reference(ec: ErrorCorrectionLevel, mask: u8) -> u16 {
    let data = u32::from(ec.format_bits()) << 3 | u32::from(mask);
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10 | rem) ^ 0x5412) as u16
}

// Reference Golay(18,6) computation of the version word.
fn version_word_reference(version: u8) -> u32 {
    let data = u32::from(version);
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
    }
    data << 12 | rem
}

// The eight data mask predicates in (row, col) form.
fn mask_predicate(mask: u8, r: usize, c: usize) -> bool {
    match mask {
        0 => (r + c) % 2 == 0,
        1 => r % 2 == 0,
        2 => c % 3 == 0,
        3 => (r + c) % 3 == 0,
        4 => (r / 2 + c / 3) % 2 == 0,
        5 => r * c % 2 + r * c % 3 == 0,
        6 => (r * c % 2 + r * c % 3) % 2 == 0,
        7 => ((r + c) % 2 + r * c % 3) % 2 == 0,
        _ => unreachable!(),
    }
}

//  ************************************************************
/// Very simple XORSHIFT pseudo random number generator
///
/// # References
///
/// - <https://en.wikipedia.org/wiki/Xorshift>
//  ************************************************************

struct Rng {
    state: u32,
}

impl Rng {
    fn new(seed: u32) -> Self {
        Rng { state: seed }
    }
    fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}
