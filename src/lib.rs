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
//! QR Code symbol generation as defined by ISO/IEC 18004
//!
//! Encodes a text payload into a square grid of dark and light
//! modules, supporting all 40 versions, the four error correction
//! levels and the eight data mask patterns. The crate performs no
//! I/O; rendering the returned [`QrSymbol`] to an image is left to
//! the caller.
//!
//! ```
//! use qrgrid::{encode, ErrorCorrectionLevel};
//!
//! let qr = encode("HELLO WORLD", ErrorCorrectionLevel::Q).unwrap();
//! for row in 0..qr.size() {
//!     for col in 0..qr.size() {
//!         print!("{}", if qr.module(row, col) { "##" } else { "  " });
//!     }
//!     println!();
//! }
//! ```
//!
//! # Note
//!
//! Numeric, alphanumeric and 8 bit modes are implemented. ISO 18004
//! defines further modes (Kanji, ECI, structured append) which are not.
//  ************************************************************

mod bch;
mod bits;
mod encode;
mod error;
mod matrix;

pub mod gf;
pub mod reedsolomon;
pub mod tables;

pub use encode::QrSymbol;
pub use error::EncodeError;


//  ************************************************************
/// Mode (Numeric, Alpha Numeric, 8 bit, Kanji) as defined by ISO 18004
///
/// The discriminant of each variant is its four-bit mode indicator.
///
/// # Note
///
/// Kanji is listed for completeness but carries no encoding support;
/// payloads outside the numeric and alphanumeric alphabets fall back
/// to 8 bit mode.
//  ************************************************************

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric = 1,
    AlphaNumeric = 2,
    EightBit = 4,
    Kanji = 8,
}

impl Mode {
    //  ************************************************************
    /// The four-bit mode indicator opening every segment
    //  ************************************************************
    pub fn indicator(self) -> u32 {
        self as u32
    }
}


//  ************************************************************
/// Error Correction Level (L/M/Q/H) as defined by ISO 18004
///
/// The discriminant of each variant is its two-bit code in the
/// format information.
//  ************************************************************

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCorrectionLevel {
    /// ~ 7% error correction capability
    L = 1,
    /// ~ 15% error correction capability
    M = 0,
    /// ~ 25% error correction capability
    Q = 3,
    /// ~ 30% error correction capability
    H = 2,
}

impl ErrorCorrectionLevel {
    /// All four levels, from lowest to highest robustness.
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::L,
        ErrorCorrectionLevel::M,
        ErrorCorrectionLevel::Q,
        ErrorCorrectionLevel::H,
    ];

    //  ************************************************************
    /// The two-bit code carried in the format information
    //  ************************************************************
    pub fn format_bits(self) -> u8 {
        self as u8
    }

    //  ************************************************************
    /// Index into the capacity tables, in L, M, Q, H order
    //  ************************************************************
    pub(crate) fn ordinal(self) -> usize {
        match self {
            ErrorCorrectionLevel::L => 0,
            ErrorCorrectionLevel::M => 1,
            ErrorCorrectionLevel::Q => 2,
            ErrorCorrectionLevel::H => 3,
        }
    }
}


//  ************************************************************
/// Encode `text` into a QR Code symbol at the given level
///
/// The narrowest mode that can represent the payload and the
/// smallest version that can hold it are chosen automatically; the
/// mask with the lowest penalty score wins.
///
/// Fails with [`EncodeError::PayloadTooLarge`] when no version
/// 1..=40 can hold the payload at the requested level.
//  ************************************************************

pub fn encode(text: &str, ec: ErrorCorrectionLevel) -> Result<QrSymbol, EncodeError> {
    encode::build(text, ec, None, None, None)
}


//  ************************************************************
/// Encode with any of version, mode and mask pinned
///
/// Intended for deterministic testing and for callers that must
/// reproduce a specific symbol. `None` selects automatically, as
/// [`encode`] does.
///
/// # Panics
///
/// Panics if a forced version is outside 1..=40 or a forced mask is
/// outside 0..=7. A forced mode that cannot represent the payload
/// fails with [`EncodeError::InvalidChar`].
//  ************************************************************

pub fn encode_with(
    text: &str,
    ec: ErrorCorrectionLevel,
    version: Option<u8>,
    mode: Option<Mode>,
    mask: Option<u8>,
) -> Result<QrSymbol, EncodeError> {
    encode::build(text, ec, version, mode, mask)
}
