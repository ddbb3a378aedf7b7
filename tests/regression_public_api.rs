//! Regression tests for the public API.
//!
//! All expected values are frozen snapshots computed from the block
//! product `block × key`: any change in output indicates a regression.
//!
//! Coverage:
//! - `key_matrix::{dimension_for_key_len, KeyMatrix, InverseMatrix}`
//! - `fraction::Fraction`
//! - `utils::tokenizer::{units, block_count, decode_units, MessageMatrix, Mode}`
//! - `block_cipher::{encrypt, decrypt, CipherBlockSequence}`
//! - `render`
//! - `MatrixCipher` (end-to-end)

use hillcrypt::key_matrix::dimension_for_key_len;
use hillcrypt::render;
use hillcrypt::utils::tokenizer::{block_count, decode_units, units};
use hillcrypt::{
    decrypt, encrypt, CipherBlockSequence, Fraction, HillCryptError, KeyMatrix, MatrixCipher,
    MessageMatrix, Mode,
};

/// Classical 3x3 key used across several tests.
const KEY_3X3: &str = "GYBNQKURP";

fn frac(n: i128, d: i128) -> Fraction {
    Fraction::new(n, d).unwrap()
}

fn values(message: &str, key: &str, mode: Mode) -> Vec<i64> {
    let mc = MatrixCipher::new(message, key, mode).unwrap();
    mc.encrypted().values().iter().map(|&v| v as i64).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Key matrix derivation
// ═══════════════════════════════════════════════════════════════════════

/// Odd lengths round the square root up, even lengths round it down.
#[test]
fn dimension_rule_parity() {
    for len in 0usize..=200 {
        let root = len.isqrt();
        let expected = if len % 2 == 1 && root * root != len {
            root + 1
        } else {
            root
        };
        assert_eq!(dimension_for_key_len(len), expected, "len={}", len);
    }
}

/// Cell `(i, j)` is the code of `key[i * n + j]`, or zero past the end.
#[test]
fn key_matrix_cells_follow_key_order() {
    for key in ["KEY", KEY_3X3, "abcde", "Hill cipher!", "ñandú", "x"] {
        let km = KeyMatrix::build(key);
        let n = km.dimension();
        let codes: Vec<i64> = key.chars().map(|c| c as i64).collect();
        for i in 0..n {
            for j in 0..n {
                let expected = codes.get(i * n + j).copied().unwrap_or(0);
                assert_eq!(km.get(i, j), expected, "key={:?} cell=({},{})", key, i, j);
            }
        }
    }
}

#[test]
fn key_matrix_frozen_3x3() {
    let km = KeyMatrix::build(KEY_3X3);
    assert_eq!(km.row(0), &[71, 89, 66]);
    assert_eq!(km.row(1), &[78, 81, 75]);
    assert_eq!(km.row(2), &[85, 82, 80]);
    assert_eq!(km.determinant().unwrap(), 3171);
}

#[test]
fn symmetric_variant_twice_is_identity() {
    let km = KeyMatrix::build(KEY_3X3);
    let sym = km.symmetric_variant();
    assert_ne!(sym, km);
    assert_eq!(sym.symmetric_variant(), km);
}

// ═══════════════════════════════════════════════════════════════════════
// Inversion
// ═══════════════════════════════════════════════════════════════════════

/// Frozen exact inverse of the 3x3 key.
#[test]
fn inverse_frozen_3x3() {
    let inv = KeyMatrix::build(KEY_3X3).invert().unwrap();
    let expected = [
        [frac(110, 1057), frac(-244, 453), frac(443, 1057)],
        [frac(45, 1057), frac(10, 453), frac(-59, 1057)],
        [frac(-163, 1057), frac(83, 151), frac(-397, 1057)],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            assert_eq!(inv.get(i, j), cell, "cell ({},{})", i, j);
        }
    }
}

#[test]
fn inverse_render_frozen_3x3() {
    let inv = KeyMatrix::build(KEY_3X3).invert().unwrap();
    assert_eq!(
        render::render_inverse_matrix(&inv),
        "0.104\t-0.539\t0.419\t\n0.043\t0.022\t-0.056\t\n-0.154\t0.550\t-0.376\t\n"
    );
}

#[test]
fn inverse_times_key_is_identity() {
    let km = KeyMatrix::build(KEY_3X3);
    let inv = km.invert().unwrap();
    for i in 0..3 {
        for j in 0..3 {
            let sum: f64 = (0..3)
                .map(|k| km.get(i, k) as f64 * inv.get_f64(k, j))
                .sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((sum - expected).abs() < 1e-6, "({},{}) = {}", i, j, sum);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tokenization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ten_units_in_blocks_of_three() {
    assert_eq!(block_count(10, 3), 4);
    let mm = MessageMatrix::tokenize("abcdefghij", Mode::Character, 3);
    assert_eq!(mm.block_count(), 4);
    assert_eq!(mm.block(3), &[106, 0, 0]);
}

#[test]
fn word_units_are_initials() {
    assert_eq!(
        units("The quick brown fox", Mode::Word),
        vec![84, 113, 98, 102]
    );
    assert_eq!(decode_units(&[84, 113, 98, 102, 0, 0]).unwrap(), "Tqbf");
}

// ═══════════════════════════════════════════════════════════════════════
// Encryption snapshots
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn golden_hello_key() {
    assert_eq!(
        values("HELLO", "KEY", Mode::Character),
        vec![11541, 4968, 12464, 5244, 5925, 5451]
    );
}

#[test]
fn golden_act_3x3() {
    assert_eq!(
        values("ACT", KEY_3X3, Mode::Character),
        vec![16981, 18100, 16035]
    );
}

#[test]
fn golden_attack_at_dawn() {
    assert_eq!(
        values("Attack at dawn", KEY_3X3, Mode::Character),
        vec![
            23523, 24693, 22270, 23704, 25426, 22387, 19698, 20217, 18667, 18317, 18902, 17372,
            17029, 19501, 16104
        ]
    );
}

#[test]
fn golden_even_key_2x2() {
    assert_eq!(
        values("hello world", "abcd", Mode::Character),
        vec![20087, 20292, 21168, 21384, 13935, 14078, 22532, 22762, 21750, 21972, 9700, 9800]
    );
}

#[test]
fn golden_word_mode() {
    assert_eq!(
        values("The quick brown fox", KEY_3X3, Mode::Word),
        vec![23108, 24665, 21859, 7242, 9078, 6732]
    );
}

#[test]
fn golden_single_character_key() {
    assert_eq!(
        values("Rust", "k", Mode::Character),
        vec![8774, 12519, 12305, 12412]
    );
}

/// Doubling every unit doubles every output value.
#[test]
fn encryption_is_linear() {
    let km = KeyMatrix::build(KEY_3X3);
    let base_units = units("Linear maps!", Mode::Character);
    let doubled: Vec<i64> = base_units.iter().map(|u| 2 * u).collect();
    let base = encrypt(&km, &MessageMatrix::from_units(&base_units, 3)).unwrap();
    let twice = encrypt(&km, &MessageMatrix::from_units(&doubled, 3)).unwrap();
    assert_eq!(base.len(), twice.len());
    for (a, b) in base.values().iter().zip(twice.values()) {
        assert_eq!(2.0 * a, *b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Decryption
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn decrypt_frozen_ciphertext() {
    let inv = KeyMatrix::build(KEY_3X3).invert().unwrap();
    let seq = CipherBlockSequence::from_values(vec![16981.0, 18100.0, 16035.0], 3).unwrap();
    assert_eq!(decrypt(&inv, &seq).unwrap(), vec![65, 67, 84]);
}

#[test]
fn round_trip_across_keys() {
    let message = "Matrices all the way down, 123!";
    for key in [KEY_3X3, "KEY", "abcd", "Rustacean", "sixteen-key-text"] {
        let mc = MatrixCipher::new(message, key, Mode::Character).unwrap();
        match mc.decrypt() {
            Ok(plain) => assert_eq!(plain, message, "key={:?}", key),
            Err(e) => assert_eq!(e, HillCryptError::SingularMatrix, "key={:?}", key),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn render_session_character_mode() {
    let mc = MatrixCipher::new("HELLO", "KEY", Mode::Character).unwrap();
    assert_eq!(
        render::render_session(&mc).unwrap(),
        "Key matrix:\n75\t69\t\n89\t0\t\nEncrypted message:\n11541 4968 12464 5244 5925 5451 "
    );
}

#[test]
fn render_key_matrix_word_mode() {
    let km = KeyMatrix::build(KEY_3X3);
    assert_eq!(
        render::render_key_matrix(&km, Mode::Word),
        "71.000\t89.000\t66.000\t\n78.000\t81.000\t75.000\t\n85.000\t82.000\t80.000\t\n"
    );
}
