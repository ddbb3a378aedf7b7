//! KeyMatrix: square key matrix derived from a textual key.
//!
//! The key's characters are laid out row-major in an `n × n` grid of
//! character codes (zero-padded), where `n` depends on the key length.
//! The module also provides the exact determinant and the adjugate-based
//! inverse used for decryption.

use log::{debug, warn};

use crate::error::{HillCryptError, Result};
use crate::fraction::Fraction;

/// Returns the key matrix dimension for a key of `len` characters.
///
/// `ceil(sqrt(len))` when `len` is odd, `floor(sqrt(len))` when it is even.
///
/// # Examples
///
/// ```
/// use hillcrypt::key_matrix::dimension_for_key_len;
///
/// assert_eq!(dimension_for_key_len(3), 2);
/// assert_eq!(dimension_for_key_len(9), 3);
/// assert_eq!(dimension_for_key_len(8), 2);
/// assert_eq!(dimension_for_key_len(0), 0);
/// ```
pub fn dimension_for_key_len(len: usize) -> usize {
    let root = len.isqrt();
    if !len.is_multiple_of(2) && root * root != len {
        root + 1
    } else {
        root
    }
}

/// Square `n × n` matrix of character codes, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatrix {
    dim: usize,
    cells: Vec<i64>,
}

impl KeyMatrix {
    /// Builds the key matrix from a key string.
    ///
    /// Cell `(i, j)` holds the code of the key's `i * n + j`-th character,
    /// or `0` past the end of the key. Characters beyond `n²` are ignored.
    /// An empty key yields a `0 × 0` matrix, which is singular.
    ///
    /// # Parameters
    /// - `key`: Key text; only its first `n²` characters are used.
    ///
    /// # Returns
    /// The `n × n` key matrix, `n` given by [`dimension_for_key_len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::KeyMatrix;
    ///
    /// let km = KeyMatrix::build("KEY");
    /// assert_eq!(km.dimension(), 2);
    /// assert_eq!(km.row(0), &[75, 69]);
    /// assert_eq!(km.row(1), &[89, 0]);
    /// ```
    pub fn build(key: &str) -> Self {
        let len = key.chars().count();
        let dim = dimension_for_key_len(len);
        let mut cells = vec![0i64; dim * dim];
        for (cell, ch) in cells.iter_mut().zip(key.chars()) {
            *cell = ch as u32 as i64;
        }
        debug!("derived {dim}x{dim} key matrix from a {len}-character key");
        KeyMatrix { dim, cells }
    }

    /// Builds a key matrix from explicit rows.
    ///
    /// # Errors
    /// Returns [`HillCryptError::DimensionMismatch`] if any row's length
    /// differs from the number of rows.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let dim = rows.len();
        let mut cells = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(HillCryptError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(KeyMatrix { dim, cells })
    }

    /// Returns `n`.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Returns the cell at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below [`dimension`](Self::dimension).
    pub fn get(&self, i: usize, j: usize) -> i64 {
        assert!(j < self.dim, "column {j} out of range");
        self.cells[i * self.dim + j]
    }

    /// Returns row `i` as a slice.
    pub fn row(&self, i: usize) -> &[i64] {
        &self.cells[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        // chunks(0) panics; an empty matrix simply has no rows.
        self.cells.chunks(self.dim.max(1))
    }

    /// Transposes the matrix about its main diagonal, in place.
    pub fn transpose_in_place(&mut self) {
        let n = self.dim;
        for i in 0..n {
            for j in (i + 1)..n {
                self.cells.swap(i * n + j, j * n + i);
            }
        }
    }

    /// Returns the symmetric variant: a transposed copy of this matrix.
    ///
    /// Applying it twice yields the original matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::KeyMatrix;
    ///
    /// let km = KeyMatrix::build("GYBNQKURP");
    /// let sym = km.symmetric_variant();
    /// assert_eq!(sym.get(0, 1), km.get(1, 0));
    /// assert_eq!(sym.symmetric_variant(), km);
    /// ```
    pub fn symmetric_variant(&self) -> KeyMatrix {
        let mut sym = self.clone();
        sym.transpose_in_place();
        sym
    }

    /// Computes the exact determinant.
    ///
    /// The `0 × 0` matrix has determinant 1 by convention; [`invert`]
    /// still treats it as singular.
    ///
    /// # Errors
    /// Returns [`HillCryptError::ArithmeticOverflow`] if an intermediate
    /// value exceeds `i128`.
    ///
    /// [`invert`]: Self::invert
    pub fn determinant(&self) -> Result<i128> {
        let widened = self.cells.iter().map(|&c| c as i128).collect();
        bareiss_determinant(widened, self.dim)
    }

    /// Computes the inverse via the adjugate: `inverse[i][j]` is the signed
    /// `(i, j)` minor of the transposed matrix divided by the determinant.
    ///
    /// # Returns
    /// An [`InverseMatrix`] of exact fractions; `self` is left unchanged.
    ///
    /// # Errors
    /// Returns [`HillCryptError::SingularMatrix`] if the matrix is empty or
    /// its determinant is zero, and [`HillCryptError::ArithmeticOverflow`] if
    /// exact arithmetic overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::{Fraction, KeyMatrix};
    ///
    /// let km = KeyMatrix::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    /// let inv = km.invert().unwrap();
    /// assert_eq!(inv.get(0, 0), Fraction::new(1, 2).unwrap());
    /// assert_eq!(inv.get_f64(1, 1), 0.25);
    ///
    /// assert!(KeyMatrix::build("").invert().is_err());
    /// ```
    pub fn invert(&self) -> Result<InverseMatrix> {
        let n = self.dim;
        if n == 0 {
            warn!("cannot invert an empty key matrix");
            return Err(HillCryptError::SingularMatrix);
        }
        let det = self.determinant()?;
        debug!("key matrix determinant = {det}");
        if det == 0 {
            warn!("key matrix is singular, no inverse exists");
            return Err(HillCryptError::SingularMatrix);
        }

        let symmetric = self.symmetric_variant();
        let inv_det = Fraction::new(1, det)?;
        let mut cells = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let minor = bareiss_determinant(symmetric.minor(i, j), n - 1)?;
                let sign = if (i + j).is_multiple_of(2) { 1 } else { -1 };
                let cofactor = minor
                    .checked_mul(sign)
                    .ok_or(HillCryptError::ArithmeticOverflow)?;
                cells.push(inv_det.checked_mul(Fraction::new(cofactor, 1)?)?);
            }
        }
        Ok(InverseMatrix { dim: n, cells })
    }

    /// Returns the `(n-1) × (n-1)` submatrix without row `skip_row` and
    /// column `skip_col`, widened to `i128`, rows and columns ascending.
    fn minor(&self, skip_row: usize, skip_col: usize) -> Vec<i128> {
        let n = self.dim;
        let mut out = Vec::with_capacity((n - 1) * (n - 1));
        for i in (0..n).filter(|&i| i != skip_row) {
            for j in (0..n).filter(|&j| j != skip_col) {
                out.push(self.cells[i * n + j] as i128);
            }
        }
        out
    }
}

/// Fraction-free Gaussian elimination (Bareiss). Every division is exact.
fn bareiss_determinant(mut a: Vec<i128>, m: usize) -> Result<i128> {
    if m == 0 {
        return Ok(1);
    }
    let mut sign = 1i128;
    let mut prev = 1i128;
    for k in 0..(m - 1) {
        if a[k * m + k] == 0 {
            match ((k + 1)..m).find(|&r| a[r * m + k] != 0) {
                Some(r) => {
                    for c in 0..m {
                        a.swap(k * m + c, r * m + c);
                    }
                    sign = -sign;
                }
                None => return Ok(0),
            }
        }
        let pivot = a[k * m + k];
        for i in (k + 1)..m {
            for j in (k + 1)..m {
                let lhs = a[i * m + j]
                    .checked_mul(pivot)
                    .ok_or(HillCryptError::ArithmeticOverflow)?;
                let rhs = a[i * m + k]
                    .checked_mul(a[k * m + j])
                    .ok_or(HillCryptError::ArithmeticOverflow)?;
                let diff = lhs
                    .checked_sub(rhs)
                    .ok_or(HillCryptError::ArithmeticOverflow)?;
                a[i * m + j] = diff / prev;
            }
        }
        prev = pivot;
    }
    Ok(sign * a[m * m - 1])
}

/// Exact inverse of a [`KeyMatrix`], stored row-major as fractions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseMatrix {
    dim: usize,
    cells: Vec<Fraction>,
}

impl InverseMatrix {
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Returns the exact cell at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Fraction {
        assert!(j < self.dim, "column {j} out of range");
        self.cells[i * self.dim + j]
    }

    /// Returns the cell converted to `f64` (exact zero is `0.0`).
    pub fn get_f64(&self, i: usize, j: usize) -> f64 {
        self.get(i, j).to_f64()
    }

    /// Iterates over the exact rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Fraction]> {
        self.cells.chunks(self.dim.max(1))
    }

    /// Converts the whole matrix to floating point, row by row.
    pub fn to_f64_rows(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(|f| f.to_f64()).collect())
            .collect()
    }
}
