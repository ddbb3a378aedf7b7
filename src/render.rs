//! Text rendering of key matrices and encrypted sequences.
//!
//! Every function returns a `String` and never prints, so the binary can
//! emit nothing at all when a later step fails.

use crate::block_cipher::CipherBlockSequence;
use crate::error::{HillCryptError, Result};
use crate::key_matrix::{InverseMatrix, KeyMatrix};
use crate::matrix_crypt::MatrixCipher;
use crate::utils::tokenizer::Mode;

/// Fixed-point cell format; exact zero is written as `0.0`.
fn fixed_point(value: f64) -> String {
    if value == 0.0 {
        "0.0".to_string()
    } else {
        format!("{value:.3}")
    }
}

/// Renders the key matrix, one line per row, each cell followed by a tab.
///
/// Cells are plain integers in character mode and fixed-point with three
/// decimals in word mode.
///
/// # Examples
///
/// ```
/// use hillcrypt::{render, KeyMatrix, Mode};
///
/// let km = KeyMatrix::build("KEY");
/// assert_eq!(render::render_key_matrix(&km, Mode::Character), "75\t69\t\n89\t0\t\n");
/// assert_eq!(
///     render::render_key_matrix(&km, Mode::Word),
///     "75.000\t69.000\t\n89.000\t0.0\t\n"
/// );
/// ```
pub fn render_key_matrix(matrix: &KeyMatrix, mode: Mode) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for &cell in row {
            match mode {
                Mode::Character => out.push_str(&cell.to_string()),
                Mode::Word => out.push_str(&fixed_point(cell as f64)),
            }
            out.push('\t');
        }
        out.push('\n');
    }
    out
}

/// Renders an inverse key matrix with three decimals, exact zero as `0.0`.
pub fn render_inverse_matrix(inverse: &InverseMatrix) -> String {
    let mut out = String::new();
    for row in inverse.to_f64_rows() {
        for cell in row {
            out.push_str(&fixed_point(cell));
            out.push('\t');
        }
        out.push('\n');
    }
    out
}

/// Renders the encrypted sequence.
///
/// Character mode: each value truncated to an integer, followed by a space.
/// Word mode: each value rounded to the nearest integer and decoded as a
/// character; a rounded value of `0` contributes nothing.
///
/// # Errors
/// Returns [`HillCryptError::InvalidCharCode`] in word mode if a rounded
/// value is not a Unicode scalar value.
pub fn render_encrypted(seq: &CipherBlockSequence, mode: Mode) -> Result<String> {
    let mut out = String::new();
    match mode {
        Mode::Character => {
            for &value in seq.values() {
                out.push_str(&(value.trunc() as i64).to_string());
                out.push(' ');
            }
        }
        Mode::Word => {
            for &value in seq.values() {
                let code = value.round() as i64;
                if code == 0 {
                    continue;
                }
                let ch = u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or(HillCryptError::InvalidCharCode(code))?;
                out.push(ch);
            }
        }
    }
    Ok(out)
}

/// Renders a full session: the key matrix followed by the encrypted message.
///
/// # Examples
///
/// ```
/// use hillcrypt::{render, MatrixCipher, Mode};
///
/// let mc = MatrixCipher::new("HELLO", "KEY", Mode::Character).unwrap();
/// assert_eq!(
///     render::render_session(&mc).unwrap(),
///     "Key matrix:\n75\t69\t\n89\t0\t\nEncrypted message:\n11541 4968 12464 5244 5925 5451 "
/// );
/// ```
pub fn render_session(cipher: &MatrixCipher) -> Result<String> {
    let encrypted = render_encrypted(cipher.encrypted(), cipher.mode())?;
    let mut out = String::from("Key matrix:\n");
    out.push_str(&render_key_matrix(cipher.key_matrix(), cipher.mode()));
    out.push_str("Encrypted message:\n");
    out.push_str(&encrypted);
    Ok(out)
}
