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
//! Payload encoding: mode and version selection, bitstream
//! assembly, error correction, interleaving and mask choice
//  ************************************************************

use log::{debug, trace};

use crate::bits::BitSeq;
use crate::error::EncodeError;
use crate::matrix::Matrix;
use crate::reedsolomon::ReedSolomonEncoder;
use crate::tables;
use crate::{ErrorCorrectionLevel, Mode};


//  ************************************************************
/// A finished QR Code symbol
///
/// An immutable square grid of dark and light modules plus the
/// parameters chosen while encoding it. Renderers draw a dark
/// square for every `module(row, col)` returning `true` and must
/// surround the symbol with a quiet zone of at least
/// [`tables::QUIET_ZONE`] light modules.
//  ************************************************************

#[derive(Clone, Debug)]
pub struct QrSymbol {
    version: u8,
    mask: u8,
    mode: Mode,
    ec: ErrorCorrectionLevel,
    matrix: Matrix,
}

impl QrSymbol {
    //  ************************************************************
    /// Version number in 1..=40
    //  ************************************************************
    pub fn version(&self) -> u8 {
        self.version
    }

    //  ************************************************************
    /// Index of the applied mask pattern, in 0..=7
    //  ************************************************************
    pub fn mask(&self) -> u8 {
        self.mask
    }

    //  ************************************************************
    /// Mode the payload was encoded in
    //  ************************************************************
    pub fn mode(&self) -> Mode {
        self.mode
    }

    //  ************************************************************
    pub fn error_correction_level(&self) -> ErrorCorrectionLevel {
        self.ec
    }

    //  ************************************************************
    /// Side length in modules, `4 * version + 17`
    //  ************************************************************
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    //  ************************************************************
    /// Colour of the module at (row, col); `true` is dark
    ///
    /// Coordinates outside the symbol read as light.
    //  ************************************************************
    pub fn module(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.matrix.get(row, col)
    }

    //  ************************************************************
    /// Whether (row, col) belongs to a function pattern
    ///
    /// Useful for styled renderers that draw finder and alignment
    /// patterns differently from data modules.
    //  ************************************************************
    pub fn is_function_module(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.matrix.is_reserved(row, col)
    }
}


//  ************************************************************
/// The whole encoding pipeline behind `encode` / `encode_with`
//  ************************************************************

pub(crate) fn build(
    text: &str,
    ec: ErrorCorrectionLevel,
    force_version: Option<u8>,
    force_mode: Option<Mode>,
    force_mask: Option<u8>,
) -> Result<QrSymbol, EncodeError> {
    let data = text.as_bytes();

    let mode = match force_mode {
        Some(Mode::Kanji) => return Err(EncodeError::UnsupportedMode { mode: Mode::Kanji }),
        Some(mode) => mode,
        None => detect_mode(data),
    };

    let version = match force_version {
        Some(version) => {
            assert!(
                (tables::VERSION_MIN..=tables::VERSION_MAX).contains(&version),
                "version out of range"
            );
            if data.len() > tables::data_capacity(version, mode, ec) {
                return Err(EncodeError::PayloadTooLarge { len: data.len(), ec });
            }
            version
        }
        None => tables::version_for_length(data.len(), mode, ec)
            .ok_or(EncodeError::PayloadTooLarge { len: data.len(), ec })?,
    };
    debug!(
        "encode: len={} mode={:?} ec={:?} version={}",
        data.len(),
        mode,
        ec,
        version
    );

    let bits = build_bitstream(data, mode, version, ec)?;
    let codewords = add_ec_and_interleave(&bits.into_bytes(), version, ec)?;

    let mut matrix = Matrix::new(version);
    // Reserve the format area before data placement; the final
    // format bits are drawn once the mask is known.
    matrix.draw_format_info(ec, 0);
    matrix.place_data(&BitSeq::from(codewords))?;

    let mask = match force_mask {
        Some(mask) => {
            assert!(mask <= 7, "mask index out of range");
            mask
        }
        None => select_mask(&mut matrix, ec),
    };
    matrix.apply_mask(mask);
    matrix.draw_format_info(ec, mask);
    debug!("encode: done version={} mask={}", version, mask);

    Ok(QrSymbol { version, mask, mode, ec, matrix })
}


//  ************************************************************
/// Narrowest mode that can represent every payload byte
//  ************************************************************

fn detect_mode(data: &[u8]) -> Mode {
    if data.iter().all(u8::is_ascii_digit) {
        Mode::Numeric
    } else if data.iter().all(|&b| tables::alnum_index(b).is_some()) {
        Mode::AlphaNumeric
    } else {
        Mode::EightBit
    }
}


//  ************************************************************
/// Mode indicator, character count, payload bits, terminator
/// and padding, exactly filling the data codewords
//  ************************************************************

fn build_bitstream(
    data: &[u8],
    mode: Mode,
    version: u8,
    ec: ErrorCorrectionLevel,
) -> Result<BitSeq, EncodeError> {
    let capacity_bits = 8 * tables::n_data_codewords(version, ec);
    let mut bits = BitSeq::with_capacity(capacity_bits / 8);
    bits.append_bits(mode.indicator(), 4);
    bits.append_bits(data.len() as u32, tables::n_count_bits(version, mode));
    match mode {
        Mode::Numeric => append_numeric(&mut bits, data)?,
        Mode::AlphaNumeric => append_alpha_numeric(&mut bits, data)?,
        Mode::EightBit => append_eight_bit(&mut bits, data),
        Mode::Kanji => return Err(EncodeError::UnsupportedMode { mode }),
    }
    if bits.len() > capacity_bits {
        return Err(EncodeError::Internal("payload overflows the selected version"));
    }

    // Terminator, truncated when the capacity leaves no room
    let terminator = (capacity_bits - bits.len()).min(4);
    bits.append_bits(0, terminator);
    bits.append_bits(0, (8 - bits.len() % 8) % 8);
    for &pad in [0xEC, 0x11].iter().cycle() {
        if bits.len() >= capacity_bits {
            break;
        }
        bits.append_bits(pad, 8);
    }
    debug_assert_eq!(bits.len(), capacity_bits);
    Ok(bits)
}


//  ************************************************************
fn append_numeric(bits: &mut BitSeq, data: &[u8]) -> Result<(), EncodeError> {
    for chunk in data.chunks(3) {
        let mut val: u32 = 0;
        for &byte in chunk {
            if !byte.is_ascii_digit() {
                return Err(EncodeError::InvalidChar { byte, mode: Mode::Numeric });
            }
            val = val * 10 + u32::from(byte - b'0');
        }
        // Three digits take ten bits, two take seven, one takes four
        bits.append_bits(val, [4, 7, 10][chunk.len() - 1]);
    }
    Ok(())
}


//  ************************************************************
fn append_alpha_numeric(bits: &mut BitSeq, data: &[u8]) -> Result<(), EncodeError> {
    for chunk in data.chunks(2) {
        let mut vals = chunk.iter().map(|&byte| match tables::alnum_index(byte) {
            Some(v) => Ok(u32::from(v)),
            None => Err(EncodeError::InvalidChar { byte, mode: Mode::AlphaNumeric }),
        });
        let first = vals.next().unwrap_or(Ok(0))?;
        match vals.next() {
            Some(second) => bits.append_bits(45 * first + second?, 11),
            None => bits.append_bits(first, 6),
        }
    }
    Ok(())
}


//  ************************************************************
fn append_eight_bit(bits: &mut BitSeq, data: &[u8]) {
    for &byte in data {
        bits.append_bits(u32::from(byte), 8);
    }
}


//  ************************************************************
/// Split the data codewords into blocks, append Reed-Solomon
/// parity per block, and interleave column-wise: all data bytes
/// first, then all parity bytes
//  ************************************************************

fn add_ec_and_interleave(
    data: &[u8],
    version: u8,
    ec: ErrorCorrectionLevel,
) -> Result<Vec<u8>, EncodeError> {
    let groups = tables::ec_blocks(version, ec);
    let expected: usize = groups.iter().map(|g| g.blocks * g.data_words).sum();
    if data.len() != expected {
        return Err(EncodeError::Internal("data codeword count mismatch"));
    }

    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::new();
    let mut consumed = 0;
    for group in &groups {
        if group.blocks == 0 {
            continue;
        }
        let rs = ReedSolomonEncoder::new(group.ec_words);
        for _ in 0..group.blocks {
            let block = &data[consumed..consumed + group.data_words];
            consumed += group.data_words;
            let parity = rs.encode(block);
            blocks.push((block, parity));
        }
    }
    trace!("add_ec_and_interleave: {} blocks", blocks.len());

    let max_data = blocks.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    let max_parity = blocks.iter().map(|(_, p)| p.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(tables::n_total_codewords(version));
    for i in 0..max_data {
        for (block, _) in &blocks {
            if let Some(&byte) = block.get(i) {
                out.push(byte);
            }
        }
    }
    for i in 0..max_parity {
        for (_, parity) in &blocks {
            if let Some(&byte) = parity.get(i) {
                out.push(byte);
            }
        }
    }
    if out.len() != tables::n_total_codewords(version) {
        return Err(EncodeError::Internal("interleaved codeword count mismatch"));
    }
    Ok(out)
}


//  ************************************************************
/// Score all eight masks and return the index of the cheapest
///
/// Each candidate is XOR-applied in place together with its format
/// bits, scored, and undone again; ties go to the lower index.
//  ************************************************************

fn select_mask(matrix: &mut Matrix, ec: ErrorCorrectionLevel) -> u8 {
    let mut best_mask = 0;
    let mut best_penalty = u32::MAX;
    for mask in 0..8u8 {
        matrix.apply_mask(mask);
        matrix.draw_format_info(ec, mask);
        let penalty = matrix.penalty();
        trace!("select_mask: mask={} penalty={}", mask, penalty);
        if penalty < best_penalty {
            best_penalty = penalty;
            best_mask = mask;
        }
        matrix.apply_mask(mask);
    }
    debug!("select_mask: best mask={} penalty={}", best_mask, best_penalty);
    best_mask
}
