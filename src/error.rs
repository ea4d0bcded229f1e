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
//! Typed failures of the encoder
//  ************************************************************

use thiserror::Error;

use crate::{ErrorCorrectionLevel, Mode};


//  ************************************************************
/// Everything that can go wrong while encoding a payload
///
/// The encoder is pure, so none of these are transient; recovery
/// is up to the caller (shorter payload, lower level, other mode).
//  ************************************************************

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// No version 1..=40 can hold the payload at the requested level.
    #[error("payload of {len} characters exceeds the capacity of every version at level {ec:?}")]
    PayloadTooLarge { len: usize, ec: ErrorCorrectionLevel },

    /// A forced text mode cannot represent one of the payload bytes.
    #[error("byte {byte:#04x} cannot be encoded in {mode:?} mode")]
    InvalidChar { byte: u8, mode: Mode },

    /// The requested mode has no encoding support (Kanji needs a Shift-JIS table).
    #[error("{mode:?} mode is not supported")]
    UnsupportedMode { mode: Mode },

    /// An internal invariant was violated; always a bug, never bad input.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
