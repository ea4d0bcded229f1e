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
//! Arithmetic in the Galois field GF(2^8) used by QR error correction
//  ************************************************************

use std::ops::{Add, AddAssign, Mul};

use lazy_static::lazy_static;


//  ************************************************************
/// The primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 defining the field
//  ************************************************************

pub const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;


lazy_static! {
    /// Shared exponent/logarithm tables, built on first use.
    ///
    /// Read-only after construction, so they may be shared freely
    /// between concurrent encodings.
    pub static ref GF: Tables = Tables::build();
}


//  ************************************************************
/// Exponent and logarithm tables for GF(2^8)
///
/// The exponent table is doubled to 512 entries so that
/// `exp[log a + log b]` never needs a modulo reduction.
//  ************************************************************

pub struct Tables {
    exp: [u8; 512],
    log: [u8; 256],
}

impl Tables {
    //  ************************************************************
    fn build() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut x: u16 = 1;
        for i in 0..255 {
            exp[i] = x as u8;
            exp[i + 255] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLYNOMIAL;
            }
        }
        Tables { exp, log }
    }

    //  ************************************************************
    /// Product of two field elements; zero annihilates
    //  ************************************************************
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[usize::from(self.log[usize::from(a)]) + usize::from(self.log[usize::from(b)])]
    }

    //  ************************************************************
    /// `x` raised to the `n`'th power
    //  ************************************************************
    pub fn pow(&self, x: u8, n: usize) -> u8 {
        if n == 0 {
            return 1;
        }
        if x == 0 {
            return 0;
        }
        self.exp[usize::from(self.log[usize::from(x)]) * n % 255]
    }

    //  ************************************************************
    /// Multiplicative inverse; `None` for zero, which has none
    //  ************************************************************
    pub fn inv(&self, x: u8) -> Option<u8> {
        if x == 0 {
            return None;
        }
        Some(self.exp[255 - usize::from(self.log[usize::from(x)])])
    }

    //  ************************************************************
    /// The power `alpha^n` of the generator element alpha = 2
    ///
    /// Valid for exponents up to 509, the range reachable as the
    /// sum of two logarithms.
    //  ************************************************************
    pub fn alpha_pow(&self, n: usize) -> u8 {
        self.exp[n]
    }
}


//  ************************************************************
/// Element of GF(2^8)
///
/// Addition is XOR; multiplication goes through the shared tables.
//  ************************************************************

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gf(pub u8);

impl Gf {
    pub const ZERO: Gf = Gf(0);
    pub const ONE: Gf = Gf(1);
    /// The generator element of the field.
    pub const ALPHA: Gf = Gf(2);

    pub fn pow(self, n: usize) -> Gf {
        Gf(GF.pow(self.0, n))
    }

    pub fn inv(self) -> Option<Gf> {
        GF.inv(self.0).map(Gf)
    }
}

//  ************************************************************
impl Add for Gf {
    type Output = Gf;
    fn add(self, other: Gf) -> Gf {
        Gf(self.0 ^ other.0)
    }
}

//  ************************************************************
impl AddAssign for Gf {
    fn add_assign(&mut self, other: Gf) {
        *self = *self + other;
    }
}

//  ************************************************************
impl Mul for Gf {
    type Output = Gf;
    fn mul(self, other: Gf) -> Gf {
        Gf(GF.mul(self.0, other.0))
    }
}


//  ************************************************************
#[cfg(test)]
//  ************************************************************

mod galois {
    use super::*;

    // Bitwise carry-less reference multiplication, independent of the tables.
    fn mul_reference(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * (PRIMITIVE_POLYNOMIAL as u8));
            z ^= ((y >> i) & 1) * x;
        }
        z
    }

    #[test]
    fn exp_is_a_bijection_on_nonzero() {
        let mut seen = [false; 256];
        for i in 0..255 {
            let e = GF.alpha_pow(i);
            assert!(e != 0, "alpha^{} must not be zero", i);
            assert!(!seen[e as usize], "alpha^{} = {} found more than once", i, e);
            seen[e as usize] = true;
        }
    }

    #[test]
    fn exp_table_is_doubled() {
        for i in 0..255 {
            assert_eq!(GF.alpha_pow(i), GF.alpha_pow(i + 255));
        }
    }

    #[test]
    fn mul_matches_reference() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(
                    GF.mul(a, b),
                    mul_reference(a, b),
                    "table product differs from reference for {} * {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn mul_commutative() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(GF.mul(a, b), GF.mul(b, a));
            }
        }
    }

    #[test]
    fn mul_distributes_over_add() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                for &c in &[1u8, 0x1D, 0x8E] {
                    assert_eq!(
                        Gf(a) * (Gf(b) + Gf(c)),
                        Gf(a) * Gf(b) + Gf(a) * Gf(c),
                        "distributivity broken for a={} b={} c={}",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn inverse_round_trip() {
        assert_eq!(GF.inv(0), None);
        for x in 1..=255u8 {
            let inv = GF.inv(x).unwrap();
            assert_eq!(GF.mul(x, inv), 1, "x * inv(x) != 1 for x={}", x);
        }
    }

    #[test]
    fn powers_of_alpha() {
        assert_eq!(GF.pow(2, 0), 1);
        assert_eq!(GF.pow(2, 1), 2);
        assert_eq!(GF.pow(2, 8), 0x1D);
        for x in 1..=255u8 {
            assert_eq!(GF.pow(x, 255), 1, "x^255 != 1 for x={}", x);
        }
    }
}
