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
//! Systematic Reed-Solomon encoding over GF(2^8)
//  ************************************************************

use log::trace;

use crate::gf::Gf;


//  ************************************************************
/// Reed-Solomon encoder for a fixed number of error correction words
//  ************************************************************

pub struct ReedSolomonEncoder {
    // Generator polynomial coefficients, highest degree first.
    // Always `ec_words + 1` coefficients with a leading one.
    gen: Vec<Gf>,
}

impl ReedSolomonEncoder {
    //  ************************************************************
    /// Build the encoder for `n_ec_words` parity bytes per block
    ///
    /// The generator polynomial is (x - a^0)(x - a^1)...(x - a^(e-1))
    /// for the field generator element a.
    //  ************************************************************
    pub fn new(n_ec_words: usize) -> Self {
        assert!(
            (1..=254).contains(&n_ec_words),
            "error correction word count out of range"
        );
        let mut gen = vec![Gf::ONE];
        let mut root = Gf::ONE;
        for _ in 0..n_ec_words {
            // Multiply the product so far by (x + root)
            let mut next = vec![Gf::ZERO; gen.len() + 1];
            for (j, &coef) in gen.iter().enumerate() {
                next[j] += coef;
                next[j + 1] += coef * root;
            }
            gen = next;
            root = root * Gf::ALPHA;
        }
        trace!("ReedSolomonEncoder::new n={} gen={:?}", n_ec_words, gen);
        ReedSolomonEncoder { gen }
    }

    //  ************************************************************
    pub fn ec_len(&self) -> usize {
        self.gen.len() - 1
    }

    //  ************************************************************
    /// Parity bytes for `data`, by systematic polynomial division
    ///
    /// Returns exactly `ec_len()` bytes for any input.
    //  ************************************************************
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let e = self.ec_len();
        let mut work: Vec<Gf> = Vec::with_capacity(data.len() + e);
        work.extend(data.iter().map(|&b| Gf(b)));
        work.resize(data.len() + e, Gf::ZERO);
        for i in 0..data.len() {
            let coef = work[i];
            if coef != Gf::ZERO {
                for (j, &g) in self.gen.iter().enumerate() {
                    work[i + j] += g * coef;
                }
            }
        }
        let parity: Vec<u8> = work[data.len()..].iter().map(|g| g.0).collect();
        trace!("ReedSolomonEncoder::encode len={} parity={:X?}", data.len(), parity);
        parity
    }
}


//  ************************************************************
#[cfg(test)]
//  ************************************************************

mod reedsolomon {
    use super::*;

    fn generator_bytes(n: usize) -> Vec<u8> {
        ReedSolomonEncoder::new(n).gen.iter().map(|g| g.0).collect()
    }

    #[test]
    fn generator_degree_2() {
        // (x - 1)(x - 2) = x^2 + 3x + 2
        assert_eq!(generator_bytes(2), vec![1, 3, 2]);
    }

    #[test]
    fn generator_degree_3() {
        // (x - 1)(x - 2)(x - 4) = x^3 + 7x^2 + 14x + 8
        assert_eq!(generator_bytes(3), vec![1, 7, 14, 8]);
    }

    #[test]
    fn generator_degree_7() {
        assert_eq!(generator_bytes(7), vec![1, 127, 122, 154, 164, 11, 68, 117]);
    }

    #[test]
    fn parity_count_is_exact() {
        for n in [7usize, 10, 13, 17, 22, 30] {
            let rs = ReedSolomonEncoder::new(n);
            assert_eq!(rs.ec_len(), n);
            assert_eq!(rs.encode(&[0x42; 19]).len(), n);
            assert_eq!(rs.encode(&[]).len(), n);
        }
    }

    #[test]
    fn all_zero_data_has_all_zero_parity() {
        let rs = ReedSolomonEncoder::new(10);
        assert_eq!(rs.encode(&[0; 16]), vec![0; 10]);
    }

    #[test]
    fn iso_annex_reference_block() {
        // Data codewords of the ISO/IEC 18004 Annex I example:
        // "01234567" encoded at version 1, level M.
        let data = [
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        let rs = ReedSolomonEncoder::new(10);
        assert_eq!(
            rs.encode(&data),
            vec![0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let rs = ReedSolomonEncoder::new(13);
        let data: Vec<u8> = (0..22u8).map(|i| i.wrapping_mul(11)).collect();
        assert_eq!(rs.encode(&data), rs.encode(&data));
    }
}
