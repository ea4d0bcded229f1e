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
//! Capacity, block structure and placement tables of ISO/IEC 18004
//!
//! # References
//!
//! * [Wikipedia on QR codes](https://en.wikipedia.org/wiki/QR_code)
//! * [ISO 18004:2015](https://www.iso.org/standard/62021.html)
//  ************************************************************

use crate::{ErrorCorrectionLevel, Mode};


//  ************************************************************

pub const VERSION_MIN: u8 = 1;
pub const VERSION_MAX: u8 = 40;

/// Width in modules of the light margin renderers must draw around a symbol.
pub const QUIET_ZONE: usize = 4;


//  ************************************************************
/// The 45 characters of alphanumeric mode, in value order
//  ************************************************************

pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";


//  ************************************************************
/// Alphanumeric value of a payload byte, if it has one
//  ************************************************************

pub fn alnum_index(byte: u8) -> Option<u8> {
    ALPHANUMERIC_CHARSET
        .bytes()
        .position(|c| c == byte)
        .map(|i| i as u8)
}


//  ************************************************************
// Error correction words per block, indexed by level ordinal
// (L, M, Q, H) and then version; index 0 is padding.
//  ************************************************************

#[rustfmt::skip]
static ECC_WORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
    //21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [
        -1,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28,
        28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // L
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26,
        26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // M
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30,
        28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Q
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28,
        30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // H
];


//  ************************************************************
// Number of error correction blocks, same indexing.
//  ************************************************************

#[rustfmt::skip]
static NUM_ECC_BLOCKS: [[i8; 41]; 4] = [
    // 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
    //21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [
        -1,  1,  1,  1,  1,  1,  2,  2,  2,  2,  4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,
         8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // L
    [
        -1,  1,  1,  1,  2,  2,  4,  4,  4,  5,  5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16,
        17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // M
    [
        -1,  1,  1,  2,  2,  4,  4,  6,  6,  8,  8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20,
        23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Q
    [
        -1,  1,  1,  2,  4,  4,  4,  5,  6,  8,  8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25,
        25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // H
];


//  ************************************************************
// Alignment pattern centre coordinates, indexed by version.
//  ************************************************************

#[rustfmt::skip]
pub static ALIGNMENT_POSITIONS: [&[u8]; 41] = [
    &[], // padding
    &[], // version 1 has no alignment pattern
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];


//  ************************************************************
/// Symbol side length in modules for a version
//  ************************************************************

pub fn n_modules(version: u8) -> usize {
    17 + 4 * usize::from(version)
}


//  ************************************************************
/// Data modules available after excluding all function patterns
///
/// Includes the 0..=7 remainder bits, so this is not always a
/// multiple of eight.
//  ************************************************************

pub fn n_raw_data_modules(version: u8) -> usize {
    let v = usize::from(version);
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let n_align = v / 7 + 2;
        result -= (25 * n_align - 10) * n_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}


//  ************************************************************
/// Total codewords (data plus error correction) in a symbol
//  ************************************************************

pub fn n_total_codewords(version: u8) -> usize {
    n_raw_data_modules(version) / 8
}


//  ************************************************************
/// Error correction codewords for a version and level
//  ************************************************************

pub fn n_ec_codewords(version: u8, ec: ErrorCorrectionLevel) -> usize {
    let row = ec.ordinal();
    let v = usize::from(version);
    ECC_WORDS_PER_BLOCK[row][v] as usize * NUM_ECC_BLOCKS[row][v] as usize
}


//  ************************************************************
/// Data codewords for a version and level
//  ************************************************************

pub fn n_data_codewords(version: u8, ec: ErrorCorrectionLevel) -> usize {
    n_total_codewords(version) - n_ec_codewords(version, ec)
}


//  ************************************************************
/// One uniform run of error correction blocks
//  ************************************************************

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGroup {
    pub blocks: usize,
    pub data_words: usize,
    pub ec_words: usize,
}


//  ************************************************************
/// The block structure of a symbol: short blocks, then blocks
/// holding one extra data word
///
/// The second group is empty (zero blocks) when the codewords
/// divide evenly.
//  ************************************************************

pub fn ec_blocks(version: u8, ec: ErrorCorrectionLevel) -> [BlockGroup; 2] {
    let row = ec.ordinal();
    let v = usize::from(version);
    let n_blocks = NUM_ECC_BLOCKS[row][v] as usize;
    let ec_words = ECC_WORDS_PER_BLOCK[row][v] as usize;
    let total = n_total_codewords(version);
    let n_long = total % n_blocks;
    let short_len = total / n_blocks;
    [
        BlockGroup { blocks: n_blocks - n_long, data_words: short_len - ec_words, ec_words },
        BlockGroup { blocks: n_long, data_words: short_len + 1 - ec_words, ec_words },
    ]
}


//  ************************************************************
/// Width of the character count indicator for a mode and version
//  ************************************************************

pub fn n_count_bits(version: u8, mode: Mode) -> usize {
    match mode {
        Mode::Numeric if version < 10 => 10,
        Mode::Numeric if version < 27 => 12,
        Mode::Numeric => 14,
        Mode::AlphaNumeric if version < 10 => 9,
        Mode::AlphaNumeric if version < 27 => 11,
        Mode::AlphaNumeric => 13,
        Mode::EightBit if version < 10 => 8,
        Mode::EightBit => 16,
        Mode::Kanji if version < 10 => 8,
        Mode::Kanji if version < 27 => 10,
        Mode::Kanji => 12,
    }
}


//  ************************************************************
/// Character capacity of a symbol for a mode and level
//  ************************************************************

pub fn data_capacity(version: u8, mode: Mode, ec: ErrorCorrectionLevel) -> usize {
    let bits = 8 * n_data_codewords(version, ec) - 4 - n_count_bits(version, mode);
    match mode {
        Mode::EightBit => bits / 8,
        Mode::AlphaNumeric => {
            let pairs = bits / 11 * 2;
            if bits % 11 >= 6 {
                pairs + 1
            } else {
                pairs
            }
        }
        Mode::Numeric => {
            let triplets = bits / 10 * 3;
            if bits % 10 >= 7 {
                triplets + 2
            } else if bits % 10 >= 4 {
                triplets + 1
            } else {
                triplets
            }
        }
        Mode::Kanji => bits / 13,
    }
}


//  ************************************************************
/// Smallest version whose capacity holds `len` characters
//  ************************************************************

pub fn version_for_length(len: usize, mode: Mode, ec: ErrorCorrectionLevel) -> Option<u8> {
    (VERSION_MIN..=VERSION_MAX).find(|&v| data_capacity(v, mode, ec) >= len)
}
