//! Hill-cipher-style matrix encryption.
//!
//! A textual key is laid out as a square matrix of character codes, the
//! message is cut into blocks as wide as that matrix, and each block is
//! encrypted as the vector–matrix product `block × key`. The key can be
//! inverted exactly (rational adjugate method) to decrypt.
//!
//! This is a textbook linear-algebra cipher, not a secure primitive.
//!
//! # Architecture
//!
//! ```text
//! KeyMatrix        (key string → n×n codes; determinant; exact inverse)
//!     ↓
//! MessageMatrix    (message → units per Mode → nbr blocks of n)
//!     ↓
//! block_cipher     (encrypt: block × key; decrypt: block × key⁻¹)
//!     ↓
//! MatrixCipher     (one (message, key, mode) session)
//! ```
//!
//! # Examples
//!
//! ```
//! use hillcrypt::{MatrixCipher, Mode};
//!
//! let session = MatrixCipher::new("HELLO", "KEY", Mode::Character).unwrap();
//! assert_eq!(
//!     session.encrypted().values(),
//!     &[11541.0, 4968.0, 12464.0, 5244.0, 5925.0, 5451.0]
//! );
//! assert_eq!(session.decrypt().unwrap(), "HELLO");
//! ```
//!
//! A key whose matrix has a zero determinant cannot be inverted:
//!
//! ```
//! use hillcrypt::{HillCryptError, KeyMatrix};
//!
//! assert_eq!(KeyMatrix::build("").invert(), Err(HillCryptError::SingularMatrix));
//! ```

pub mod block_cipher;
pub mod cli;
pub mod error;
pub mod fraction;
pub mod key_matrix;
pub mod logging;
pub mod render;
pub mod utils;

mod matrix_crypt;

pub use block_cipher::{decrypt, encrypt, CipherBlockSequence};
pub use error::{HillCryptError, Result};
pub use fraction::Fraction;
pub use key_matrix::{InverseMatrix, KeyMatrix};
pub use matrix_crypt::MatrixCipher;
pub use utils::tokenizer::{MessageMatrix, Mode};
