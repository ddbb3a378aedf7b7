//! BlockCipherEngine: vector–matrix product over message blocks.
//!
//! Each `n`-unit message block `m` is encrypted as the row vector `m × K`,
//! i.e. output `j` of block `i` is `Σ_k K[k][j] · m[i][k]`. The key matrix is
//! read column-major, and decryption applies the same product with the
//! exact inverse key.

use log::{debug, trace};

use crate::error::{HillCryptError, Result};
use crate::fraction::Fraction;
use crate::key_matrix::{InverseMatrix, KeyMatrix};
use crate::utils::tokenizer::MessageMatrix;

/// Encrypted values, `n` per block, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CipherBlockSequence {
    dim: usize,
    values: Vec<f64>,
}

impl CipherBlockSequence {
    /// Wraps raw cipher values produced with a key of dimension `n`.
    ///
    /// # Errors
    /// Returns [`HillCryptError::DimensionMismatch`] if `values.len()` is not
    /// a multiple of `n`.
    pub fn from_values(values: Vec<f64>, n: usize) -> Result<Self> {
        let aligned = if n == 0 {
            values.is_empty()
        } else {
            values.len().is_multiple_of(n)
        };
        if !aligned {
            // a zero-dimension key can only produce an empty sequence
            let expected = if n == 0 {
                0
            } else {
                values.len().next_multiple_of(n)
            };
            return Err(HillCryptError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(CipherBlockSequence { dim: n, values })
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of encrypted blocks (`nbr`).
    pub fn block_count(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.values.len() / self.dim
        }
    }

    /// Iterates over the encrypted blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.dim.max(1))
    }
}

/// Encrypts every block of `message` with `key`.
///
/// # Parameters
/// - `key`: Key matrix, read column by column for each output value.
/// - `message`: Message blocks, each as wide as the key.
///
/// # Returns
/// A [`CipherBlockSequence`] of `block_count * n` values.
///
/// # Errors
/// Returns [`HillCryptError::DimensionMismatch`] if the message blocks are not
/// as wide as the key matrix.
///
/// # Examples
///
/// ```
/// use hillcrypt::{encrypt, KeyMatrix, MessageMatrix, Mode};
///
/// let key = KeyMatrix::build("KEY");
/// let msg = MessageMatrix::tokenize("HELLO", Mode::Character, key.dimension());
/// let seq = encrypt(&key, &msg).unwrap();
/// assert_eq!(seq.values(), &[11541.0, 4968.0, 12464.0, 5244.0, 5925.0, 5451.0]);
/// ```
pub fn encrypt(key: &KeyMatrix, message: &MessageMatrix) -> Result<CipherBlockSequence> {
    let n = key.dimension();
    if message.dimension() != n {
        return Err(HillCryptError::DimensionMismatch {
            expected: n,
            actual: message.dimension(),
        });
    }

    let nbr = message.block_count();
    let mut values = Vec::with_capacity(nbr * n);
    for (i, block) in message.blocks().enumerate().take(nbr) {
        for j in 0..n {
            let mut stock = 0.0f64;
            for (k, &unit) in block.iter().enumerate() {
                stock += key.get(k, j) as f64 * unit as f64;
            }
            values.push(stock);
        }
        trace!("block {i}: {block:?} -> {:?}", &values[i * n..]);
    }
    debug!("encrypted {nbr} blocks of {n}");
    Ok(CipherBlockSequence { dim: n, values })
}

/// Recovers the message units from `cipher` using the exact inverse key.
///
/// Cipher values are rounded to the nearest integer, multiplied by the
/// inverse exactly, and each result is rounded to the nearest unit code.
///
/// # Parameters
/// - `inverse`: Exact inverse of the key used for encryption.
/// - `cipher`: Encrypted values produced with that key.
///
/// # Returns
/// The padded message units, one per cipher value.
///
/// # Errors
/// Returns [`HillCryptError::DimensionMismatch`] if the cipher dimension
/// differs from the inverse's, and [`HillCryptError::ArithmeticOverflow`] if
/// exact arithmetic overflows.
pub fn decrypt(inverse: &InverseMatrix, cipher: &CipherBlockSequence) -> Result<Vec<i64>> {
    let n = inverse.dimension();
    if cipher.dimension() != n {
        return Err(HillCryptError::DimensionMismatch {
            expected: n,
            actual: cipher.dimension(),
        });
    }

    let mut units = Vec::with_capacity(cipher.len());
    for block in cipher.blocks().take(cipher.block_count()) {
        let exact: Vec<Fraction> = block
            .iter()
            .map(|&v| {
                let rounded = v.round();
                if rounded.abs() >= i64::MAX as f64 {
                    return Err(HillCryptError::ArithmeticOverflow);
                }
                Ok(Fraction::from_integer(rounded as i64))
            })
            .collect::<Result<_>>()?;
        for j in 0..n {
            let mut stock = Fraction::zero();
            for (k, &c) in exact.iter().enumerate() {
                stock = stock.checked_add(inverse.get(k, j).checked_mul(c)?)?;
            }
            let unit =
                i64::try_from(stock.round()).map_err(|_| HillCryptError::ArithmeticOverflow)?;
            units.push(unit);
        }
    }
    debug!("decrypted {} blocks of {n}", cipher.block_count());
    Ok(units)
}
