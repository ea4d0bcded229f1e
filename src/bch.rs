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
//! BCH-protected format and version information words
//!
//! Both fields are tabulated: 32 possible 15-bit format words
//! (5 data bits under BCH(15,5), already XORed with the 0x5412
//! masking constant) and 34 possible 18-bit version words
//! (6 data bits under Golay(18,6)).
//  ************************************************************

use crate::ErrorCorrectionLevel;


//  ************************************************************
/// XOR applied to every format word so no field is all-zero
//  ************************************************************

pub const FORMAT_XOR_MASK: u16 = 0x5412;

pub const N_FORMAT_BITS: usize = 15;
pub const N_VERSION_BITS: usize = 18;


//  ************************************************************
// The 32 format words, indexed by `format_bits(ec) << 3 | mask`.
// Row order follows the two-bit level codes: M, L, H, Q.
//  ************************************************************

#[rustfmt::skip]
static FORMAT_WORDS: [u16; 32] = [
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0, // M
    0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976, // L
    0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B, // H
    0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED, // Q
];


//  ************************************************************
// The 34 version words for versions 7..=40.
//  ************************************************************

#[rustfmt::skip]
static VERSION_WORDS: [u32; 34] = [
    0x07C94, 0x085BC, 0x09A99, 0x0A4D3, 0x0BBF6, 0x0C762, 0x0D847, 0x0E60D,
    0x0F928, 0x10B78, 0x1145D, 0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9,
    0x177EC, 0x18EC4, 0x191E1, 0x1AFAB, 0x1B08E, 0x1CC1A, 0x1D33F, 0x1ED75,
    0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B, 0x2542E, 0x26A64,
    0x27541, 0x28C69,
];


//  ************************************************************
/// The complete 15-bit format word for a level and mask index
//  ************************************************************

pub fn format_word(ec: ErrorCorrectionLevel, mask: u8) -> u16 {
    debug_assert!(mask <= 7, "mask index out of range");
    FORMAT_WORDS[usize::from(ec.format_bits()) << 3 | usize::from(mask)]
}


//  ************************************************************
/// The complete 18-bit version word; only defined for versions 7..=40
//  ************************************************************

pub fn version_word(version: u8) -> u32 {
    debug_assert!((7..=40).contains(&version), "no version info below version 7");
    VERSION_WORDS[usize::from(version) - 7]
}
