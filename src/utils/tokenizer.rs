//! Message tokenization.
//!
//! Turns a message into numeric units according to the [`Mode`], reshapes
//! the units into the `nbr × n` [`MessageMatrix`] consumed by the block
//! cipher, and decodes numeric units back into text.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{HillCryptError, Result};

/// Granularity of message units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mode `0`: one unit per character, valued by its code.
    Character,
    /// Mode `1`: one unit per whitespace-delimited word, valued by the code
    /// of the word's first character.
    Word,
}

impl Mode {
    /// Returns the numeric selector (`0` or `1`).
    pub fn selector(self) -> u8 {
        match self {
            Mode::Character => 0,
            Mode::Word => 1,
        }
    }
}

impl TryFrom<i64> for Mode {
    type Error = HillCryptError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Mode::Character),
            1 => Ok(Mode::Word),
            other => Err(HillCryptError::InvalidMode(other.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = HillCryptError;

    /// Parses `"0"` or `"1"` (surrounding whitespace allowed).
    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| HillCryptError::InvalidMode(s.to_string()))?;
        Mode::try_from(value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())
    }
}

/// Converts a message into numeric units for the given mode.
///
/// # Examples
///
/// ```
/// use hillcrypt::Mode;
/// use hillcrypt::utils::tokenizer::units;
///
/// assert_eq!(units("Hi", Mode::Character), vec![72, 105]);
/// assert_eq!(units("  hello   world ", Mode::Word), vec![104, 119]);
/// ```
pub fn units(message: &str, mode: Mode) -> Vec<i64> {
    match mode {
        Mode::Character => message.chars().map(|c| c as u32 as i64).collect(),
        Mode::Word => message
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .map(|c| c as u32 as i64)
            .collect(),
    }
}

/// Number of `n`-unit blocks needed to hold `num_units` units.
///
/// A zero dimension holds nothing and yields zero blocks.
pub fn block_count(num_units: usize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    num_units.div_ceil(n)
}

/// Decodes numeric units into text.
///
/// Trailing zero units (block padding) are dropped. Use [`decode_exact`]
/// when the number of real units is known and may end in U+0000.
///
/// # Errors
/// Returns [`HillCryptError::InvalidCharCode`] for any unit that is not a
/// Unicode scalar value.
pub fn decode_units(codes: &[i64]) -> Result<String> {
    let end = codes
        .iter()
        .rposition(|&c| c != 0)
        .map_or(0, |last| last + 1);
    decode_exact(&codes[..end])
}

/// Decodes every unit into a character, zeros included.
///
/// # Errors
/// Returns [`HillCryptError::InvalidCharCode`] for any unit that is not a
/// Unicode scalar value.
pub fn decode_exact(codes: &[i64]) -> Result<String> {
    codes
        .iter()
        .map(|&code| {
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or(HillCryptError::InvalidCharCode(code))
        })
        .collect()
}

/// Message units reshaped into rows of `n`, zero-padded at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMatrix {
    dim: usize,
    unit_count: usize,
    cells: Vec<i64>,
}

impl MessageMatrix {
    /// Reshapes `units` into `ceil(len / n)` rows of width `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::MessageMatrix;
    ///
    /// let mm = MessageMatrix::from_units(&[1, 2, 3, 4, 5], 2);
    /// assert_eq!(mm.block_count(), 3);
    /// assert_eq!(mm.block(2), &[5, 0]);
    /// ```
    pub fn from_units(units: &[i64], n: usize) -> Self {
        let nbr = block_count(units.len(), n);
        let mut cells = if n == 0 { Vec::new() } else { units.to_vec() };
        cells.resize(nbr * n, 0);
        MessageMatrix {
            dim: n,
            unit_count: units.len(),
            cells,
        }
    }

    /// Tokenizes `message` for `mode` and reshapes it for dimension `n`.
    pub fn tokenize(message: &str, mode: Mode, n: usize) -> Self {
        let units = units(message, mode);
        let mm = Self::from_units(&units, n);
        debug!(
            "tokenized {} units in mode {mode} into {} blocks of {n}",
            units.len(),
            mm.block_count()
        );
        mm
    }

    /// Width of each block.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Number of message units before padding.
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// Number of blocks (`nbr`).
    pub fn block_count(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.cells.len() / self.dim
        }
    }

    /// Returns block `i`.
    pub fn block(&self, i: usize) -> &[i64] {
        &self.cells[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterates over the blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &[i64]> {
        self.cells.chunks(self.dim.max(1))
    }
}
