//! MatrixCipher: one encryption session.
//!
//! Binds a message, a key and a [`Mode`] together: derives the key matrix,
//! tokenizes the message into blocks of the key's dimension, and encrypts
//! them. The session can also invert its key and decrypt its own output.

use log::info;

use crate::block_cipher::{self, CipherBlockSequence};
use crate::error::Result;
use crate::key_matrix::{InverseMatrix, KeyMatrix};
use crate::utils::tokenizer::{self, MessageMatrix, Mode};

/// A single `(message, key, mode)` encryption session.
///
/// All state is computed eagerly in [`new`](Self::new); sessions share
/// nothing with each other.
#[derive(Debug, Clone)]
pub struct MatrixCipher {
    mode: Mode,
    key_matrix: KeyMatrix,
    message_matrix: MessageMatrix,
    encrypted: CipherBlockSequence,
}

impl MatrixCipher {
    /// Builds the key matrix and encrypts `message` with it.
    ///
    /// # Errors
    /// Propagates [`encrypt`](crate::encrypt) errors. Construction always
    /// produces matching dimensions, so in practice this does not fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::{MatrixCipher, Mode};
    ///
    /// let mc = MatrixCipher::new("HELLO", "KEY", Mode::Character).unwrap();
    /// assert_eq!(mc.dimension(), 2);
    /// assert_eq!(mc.block_count(), 3);
    /// assert_eq!(mc.encrypted().len(), 6);
    /// ```
    pub fn new(message: &str, key: &str, mode: Mode) -> Result<Self> {
        let key_matrix = KeyMatrix::build(key);
        let n = key_matrix.dimension();
        let message_matrix = MessageMatrix::tokenize(message, mode, n);
        let encrypted = block_cipher::encrypt(&key_matrix, &message_matrix)?;
        info!(
            "session ready: mode {mode}, {n}x{n} key, {} blocks",
            message_matrix.block_count()
        );
        Ok(MatrixCipher {
            mode,
            key_matrix,
            message_matrix,
            encrypted,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Key matrix dimension `n`.
    pub fn dimension(&self) -> usize {
        self.key_matrix.dimension()
    }

    /// Number of message blocks `nbr`.
    pub fn block_count(&self) -> usize {
        self.message_matrix.block_count()
    }

    pub fn key_matrix(&self) -> &KeyMatrix {
        &self.key_matrix
    }

    pub fn message_matrix(&self) -> &MessageMatrix {
        &self.message_matrix
    }

    pub fn encrypted(&self) -> &CipherBlockSequence {
        &self.encrypted
    }

    /// Inverts the session's key matrix.
    ///
    /// # Errors
    /// Returns [`HillCryptError::SingularMatrix`](crate::HillCryptError::SingularMatrix)
    /// if the key cannot be inverted.
    pub fn inverse_key(&self) -> Result<InverseMatrix> {
        self.key_matrix.invert()
    }

    /// Decrypts the session's ciphertext and decodes it back to text.
    ///
    /// Block padding is cut back to the message's unit count, so a message
    /// that really ends in U+0000 keeps those characters. In word mode only
    /// each word's first character survives, so the result is the string of
    /// initials.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::{MatrixCipher, Mode};
    ///
    /// let mc = MatrixCipher::new("Attack at dawn", "GYBNQKURP", Mode::Character).unwrap();
    /// assert_eq!(mc.decrypt().unwrap(), "Attack at dawn");
    ///
    /// let singular = MatrixCipher::new("HELLO", "", Mode::Character).unwrap();
    /// assert!(singular.decrypt().is_err());
    /// ```
    pub fn decrypt(&self) -> Result<String> {
        let inverse = self.inverse_key()?;
        let mut units = block_cipher::decrypt(&inverse, &self.encrypted)?;
        units.truncate(self.message_matrix.unit_count());
        tokenizer::decode_exact(&units)
    }
}
