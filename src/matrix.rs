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
//! The module grid: function patterns, data placement, masking
//! and the mask penalty rules
//!
//! Coordinates are (row, column) with (0, 0) in the top left
//! corner. `true` is a dark module.
//  ************************************************************

use log::trace;

use crate::bch;
use crate::bits::BitSeq;
use crate::error::EncodeError;
use crate::tables;
use crate::ErrorCorrectionLevel;


//  ************************************************************
// Penalty weights of the four mask evaluation rules.
//  ************************************************************

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

// The finder-like sequence penalised by rule N3: dark module runs
// of ratio 1:1:3:1:1 with four light modules on the right, and its
// mirror image.
const FINDER_SEQUENCE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];


//  ************************************************************
/// Square grid of modules under construction
///
/// `reserved` marks function modules; data placement and masking
/// never touch them.
//  ************************************************************

#[derive(Clone, Debug)]
pub(crate) struct Matrix {
    version: u8,
    size: usize,
    modules: Vec<bool>,
    reserved: Vec<bool>,
}

impl Matrix {
    //  ************************************************************
    /// Build the function pattern skeleton for a version
    ///
    /// Draws timing patterns, finder patterns with separators,
    /// alignment patterns and (for version 7 up) the version
    /// information blocks. The format information area is reserved
    /// separately by `draw_format_info`.
    //  ************************************************************
    pub fn new(version: u8) -> Self {
        let size = tables::n_modules(version);
        let mut matrix = Matrix {
            version,
            size,
            modules: vec![false; size * size],
            reserved: vec![false; size * size],
        };

        for i in 0..size {
            matrix.set_function(6, i, i % 2 == 0);
            matrix.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns overwrite the ends of the timing patterns
        matrix.draw_finder(3, 3);
        matrix.draw_finder(3, size - 4);
        matrix.draw_finder(size - 4, 3);

        matrix.draw_alignment_patterns();
        matrix.draw_version_info();
        matrix
    }

    //  ************************************************************
    pub fn size(&self) -> usize {
        self.size
    }

    //  ************************************************************
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.modules[row * self.size + col]
    }

    //  ************************************************************
    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.reserved[row * self.size + col]
    }

    //  ************************************************************
    fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[row * self.size + col] = dark;
        self.reserved[row * self.size + col] = true;
    }

    //  ************************************************************
    // Finder pattern centred on (row, col), including the light
    // separator ring; modules falling outside the grid are clipped.
    //  ************************************************************
    fn draw_finder(&mut self, row: usize, col: usize) {
        let n = self.size as i32;
        for dr in -4..=4i32 {
            for dc in -4..=4i32 {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if (0..n).contains(&r) && (0..n).contains(&c) {
                    let dist = dr.abs().max(dc.abs());
                    self.set_function(r as usize, c as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    //  ************************************************************
    fn draw_alignment_patterns(&mut self) {
        let centres = tables::ALIGNMENT_POSITIONS[usize::from(self.version)];
        if centres.is_empty() {
            return;
        }
        let last = centres.len() - 1;
        for (i, &row) in centres.iter().enumerate() {
            for (j, &col) in centres.iter().enumerate() {
                // The three combinations under the finder patterns are skipped
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                for dr in -2..=2i32 {
                    for dc in -2..=2i32 {
                        let dark = dr.abs().max(dc.abs()) != 1;
                        let r = (i32::from(row) + dr) as usize;
                        let c = (i32::from(col) + dc) as usize;
                        self.set_function(r, c, dark);
                    }
                }
            }
        }
    }

    //  ************************************************************
    // The two 3x6 version information blocks, for version 7 up.
    // Bit i of the 18-bit word goes to (i/3, n-11+i%3) and its
    // transposed position.
    //  ************************************************************
    fn draw_version_info(&mut self) {
        if self.version < 7 {
            return;
        }
        let word = bch::version_word(self.version);
        let n = self.size;
        for i in 0..bch::N_VERSION_BITS {
            let dark = word >> i & 1 != 0;
            let (a, b) = (i / 3, n - 11 + i % 3);
            self.set_function(a, b, dark);
            self.set_function(b, a, dark);
        }
    }

    //  ************************************************************
    // Positions of the 15 format bits, most significant first,
    // for both redundant copies.
    //  ************************************************************
    fn format_positions(&self) -> [[(usize, usize); 2]; 15] {
        let n = self.size;
        let mut pos = [[(0usize, 0usize); 2]; 15];
        // Copy A wraps around the top left finder, skipping the
        // timing row/column; copy B is split between the other two.
        let copy_a = [
            (8, 0), (8, 1), (8, 2), (8, 3), (8, 4), (8, 5), (8, 7), (8, 8),
            (7, 8), (5, 8), (4, 8), (3, 8), (2, 8), (1, 8), (0, 8),
        ];
        for (i, &rc) in copy_a.iter().enumerate() {
            pos[i][0] = rc;
        }
        for (i, p) in pos.iter_mut().enumerate().take(7) {
            p[1] = (n - 1 - i, 8);
        }
        for (i, p) in pos.iter_mut().enumerate().skip(7) {
            p[1] = (8, n - 15 + i);
        }
        pos
    }

    //  ************************************************************
    /// Draw both copies of the format information for a level and
    /// mask index, plus the always-dark module
    ///
    /// Also serves to reserve the format area before data placement
    /// (drawn with a dummy mask, overwritten once the mask is chosen).
    //  ************************************************************
    pub fn draw_format_info(&mut self, ec: ErrorCorrectionLevel, mask: u8) {
        let word = bch::format_word(ec, mask);
        for (i, copies) in self.format_positions().iter().enumerate() {
            let dark = word >> (bch::N_FORMAT_BITS - 1 - i) & 1 != 0;
            for &(r, c) in copies {
                self.set_function(r, c, dark);
            }
        }
        let dark_module = (self.size - 8, 8);
        self.set_function(dark_module.0, dark_module.1, true);
    }

    //  ************************************************************
    /// Place the codeword bits into the data area
    ///
    /// Columns are processed right to left in pairs, skipping the
    /// timing column; the traversal direction alternates upward and
    /// downward per pair, and within a row the right cell of the
    /// pair is tried before the left. Cells left over once all bits
    /// are placed (the remainder bits) stay light.
    //  ************************************************************
    pub fn place_data(&mut self, bits: &BitSeq) -> Result<(), EncodeError> {
        let n = self.size;
        let mut iter = bits.iter();
        let mut placed = 0usize;
        let mut upward = true;
        let mut right = n as i32 - 1;
        while right >= 1 {
            if right == 6 {
                // The timing column shifts the pair window left by one
                right = 5;
            }
            for vert in 0..n {
                let row = if upward { n - 1 - vert } else { vert };
                for j in 0..2 {
                    let col = right as usize - j;
                    if self.reserved[row * n + col] {
                        continue;
                    }
                    if let Some(bit) = iter.next() {
                        self.modules[row * n + col] = bit;
                        placed += 1;
                    }
                }
            }
            upward = !upward;
            right -= 2;
        }
        trace!("place_data: placed {} of {} bits", placed, bits.len());
        if placed != bits.len() {
            return Err(EncodeError::Internal("codeword bits exceed the data area"));
        }
        Ok(())
    }

    //  ************************************************************
    /// XOR the mask predicate over the data area
    ///
    /// Function modules are never inverted. Applying the same mask
    /// twice restores the previous state, which is what the mask
    /// evaluation loop relies on.
    //  ************************************************************
    pub fn apply_mask(&mut self, mask: u8) {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let invert = match mask {
                    0 => (row + col) % 2 == 0,
                    1 => row % 2 == 0,
                    2 => col % 3 == 0,
                    3 => (row + col) % 3 == 0,
                    4 => (row / 2 + col / 3) % 2 == 0,
                    5 => row * col % 2 + row * col % 3 == 0,
                    6 => (row * col % 2 + row * col % 3) % 2 == 0,
                    7 => ((row + col) % 2 + row * col % 3) % 2 == 0,
                    _ => unreachable!("mask index out of range"),
                };
                let idx = row * n + col;
                self.modules[idx] ^= invert && !self.reserved[idx];
            }
        }
    }

    //  ************************************************************
    /// Total penalty of the current module state
    //  ************************************************************
    pub fn penalty(&self) -> u32 {
        let adjacent = self.penalty_adjacent();
        let blocks = self.penalty_blocks();
        let finder = self.penalty_finder_like();
        let dark = self.penalty_dark();
        trace!(
            "penalty: adjacent={} blocks={} finder={} dark={}",
            adjacent,
            blocks,
            finder,
            dark
        );
        adjacent + blocks + finder + dark
    }

    //  ************************************************************
    // Module at (i, j) for row scans, (j, i) for column scans.
    //  ************************************************************
    fn at(&self, i: usize, j: usize, by_row: bool) -> bool {
        if by_row {
            self.get(i, j)
        } else {
            self.get(j, i)
        }
    }

    //  ************************************************************
    // N1: every run of five or more same-coloured modules in a row
    // or column scores its length minus two.
    //  ************************************************************
    fn penalty_adjacent(&self) -> u32 {
        let n = self.size;
        let mut points = 0;
        for &by_row in &[true, false] {
            for i in 0..n {
                let mut run_color = self.at(i, 0, by_row);
                let mut run_len = 1u32;
                for j in 1..n {
                    let module = self.at(i, j, by_row);
                    if module == run_color {
                        run_len += 1;
                    } else {
                        if run_len >= 5 {
                            points += PENALTY_N1 + run_len - 5;
                        }
                        run_color = module;
                        run_len = 1;
                    }
                }
                if run_len >= 5 {
                    points += PENALTY_N1 + run_len - 5;
                }
            }
        }
        points
    }

    //  ************************************************************
    // N2: every 2x2 block of uniform colour scores three.
    //  ************************************************************
    fn penalty_blocks(&self) -> u32 {
        let n = self.size;
        let mut points = 0;
        for row in 0..n - 1 {
            for col in 0..n - 1 {
                let color = self.get(row, col);
                if color == self.get(row, col + 1)
                    && color == self.get(row + 1, col)
                    && color == self.get(row + 1, col + 1)
                {
                    points += PENALTY_N2;
                }
            }
        }
        points
    }

    //  ************************************************************
    // N3: every occurrence of the finder-like 1:1:3:1:1 sequence
    // (in either orientation) along a row or column scores forty.
    //  ************************************************************
    fn penalty_finder_like(&self) -> u32 {
        let n = self.size;
        let len = FINDER_SEQUENCE.len();
        let mut points = 0;
        for &by_row in &[true, false] {
            for i in 0..n {
                for start in 0..=n - len {
                    let forward = (0..len).all(|k| self.at(i, start + k, by_row) == FINDER_SEQUENCE[k]);
                    let backward =
                        (0..len).all(|k| self.at(i, start + k, by_row) == FINDER_SEQUENCE[len - 1 - k]);
                    if forward {
                        points += PENALTY_N3;
                    }
                    if backward {
                        points += PENALTY_N3;
                    }
                }
            }
        }
        points
    }

    //  ************************************************************
    // N4: ten points for every five percent the dark proportion
    // strays from fifty.
    //  ************************************************************
    fn penalty_dark(&self) -> u32 {
        let dark = self.modules.iter().filter(|&&m| m).count();
        let total = self.size * self.size;
        let percent = 100 * dark / total;
        let deviation = if percent >= 50 { percent - 50 } else { 50 - percent };
        PENALTY_N4 * (deviation / 5) as u32
    }
}
