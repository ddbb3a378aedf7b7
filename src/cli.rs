//! Command-line front end: argument parsing and session output.
//!
//! The binary is a thin wrapper over [`parse_args`] and [`run`]; every
//! failure maps to [`EXIT_FAILURE_CODE`].

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use log::info;
use thiserror::Error;

use crate::error::{HillCryptError, Result};
use crate::matrix_crypt::MatrixCipher;
use crate::render;
use crate::utils::tokenizer::Mode;

/// Process exit code for every reported failure.
pub const EXIT_FAILURE_CODE: u8 = 84;

/// Number of positional arguments the binary requires.
const POSITIONALS: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "hillcrypt", author, version, about = "Hill-cipher-style matrix encryption", long_about = None)]
struct CommandLineOptions {
    /// Message to encrypt
    message: String,

    /// Key text; its character codes fill the key matrix
    key: String,

    /// 0 to encrypt characters, 1 to encrypt words
    mode: String,

    /// Also print the inverse key matrix
    #[arg(long, default_value_t = false)]
    inverse: bool,

    /// Also decrypt the ciphertext and print the result
    #[arg(long, default_value_t = false)]
    decrypt: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// A validated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub message: String,
    pub key: String,
    pub mode: Mode,
    pub inverse: bool,
    pub decrypt: bool,
    pub verbose: u8,
}

/// Why the command line did not produce an [`Invocation`].
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument count or mode.
    #[error(transparent)]
    Cipher(#[from] HillCryptError),
    /// Any other parse failure reported by clap.
    #[error("{0}")]
    Usage(clap::Error),
    /// `--help` or `--version` was requested.
    #[error("{0}")]
    Info(clap::Error),
}

impl CliError {
    /// Exit code for this outcome: 0 for help/version, 84 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Info(_) => 0,
            _ => EXIT_FAILURE_CODE,
        }
    }
}

/// Parses a full argument vector (program name first).
///
/// # Errors
/// - [`HillCryptError::InvalidArguments`] when the positional count is not 3.
/// - [`HillCryptError::InvalidMode`] when the mode is not `0` or `1`.
///
/// # Examples
///
/// ```
/// use hillcrypt::cli::parse_args;
/// use hillcrypt::Mode;
///
/// let inv = parse_args(["hillcrypt", "HELLO", "KEY", "0"]).unwrap();
/// assert_eq!(inv.mode, Mode::Character);
/// assert!(parse_args(["hillcrypt", "HELLO", "KEY", "2"]).is_err());
/// ```
pub fn parse_args<I, T>(args: I) -> std::result::Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let (flags, positionals) = split_args(&args);

    // Positionals go after `--` so clap never reads `-hello` or `-5` as a flag.
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.extend(args.first().cloned());
    argv.extend(flags);
    argv.push("--".to_string());
    argv.extend(positionals.iter().cloned());

    let opts = match CommandLineOptions::try_parse_from(&argv) {
        Ok(opts) => opts,
        Err(e) => {
            return Err(match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => CliError::Info(e),
                _ if positionals.len() != POSITIONALS => HillCryptError::InvalidArguments {
                    expected: POSITIONALS,
                    actual: positionals.len(),
                }
                .into(),
                _ => CliError::Usage(e),
            });
        }
    };

    let mode: Mode = opts.mode.parse()?;
    Ok(Invocation {
        message: opts.message,
        key: opts.key,
        mode,
        inverse: opts.inverse,
        decrypt: opts.decrypt,
        verbose: opts.verbose,
    })
}

/// Returns true for the literal flags the binary understands.
///
/// Anything else, including text that merely starts with `-`, is positional.
fn is_flag(arg: &str) -> bool {
    match arg {
        "--inverse" | "--decrypt" | "--verbose" | "-h" | "--help" | "-V" | "--version" => true,
        _ => arg
            .strip_prefix('-')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c == 'v')),
    }
}

/// Splits the arguments after the program name into flags and positionals.
///
/// Everything after a literal `--` is positional.
fn split_args(args: &[String]) -> (Vec<String>, Vec<String>) {
    let mut flags = Vec::new();
    let mut positionals = Vec::new();
    let mut rest = args.iter().skip(1);
    for arg in rest.by_ref() {
        if arg == "--" {
            break;
        } else if is_flag(arg) {
            flags.push(arg.clone());
        } else {
            positionals.push(arg.clone());
        }
    }
    positionals.extend(rest.cloned());
    (flags, positionals)
}

/// Runs one session and returns the complete output text.
///
/// Nothing is returned on failure, so no partial output is ever printed.
///
/// # Errors
/// Returns [`HillCryptError::SingularMatrix`] when `--inverse` or
/// `--decrypt` is requested for a singular key, and
/// [`HillCryptError::InvalidCharCode`] when word-mode output cannot be
/// rendered as text.
pub fn run(invocation: &Invocation) -> Result<String> {
    info!(
        "encrypting {} characters in mode {}",
        invocation.message.chars().count(),
        invocation.mode
    );
    let cipher = MatrixCipher::new(&invocation.message, &invocation.key, invocation.mode)?;
    let mut out = render::render_session(&cipher)?;

    if invocation.inverse {
        let inverse = cipher.inverse_key()?;
        out.push_str("\nInverse key matrix:\n");
        out.push_str(&render::render_inverse_matrix(&inverse));
    }
    if invocation.decrypt {
        let plain = cipher.decrypt()?;
        out.push_str(if invocation.inverse { "" } else { "\n" });
        out.push_str("Decrypted message:\n");
        out.push_str(&plain);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(message: &str, key: &str, mode: Mode) -> Invocation {
        Invocation {
            message: message.to_string(),
            key: key.to_string(),
            mode,
            inverse: false,
            decrypt: false,
            verbose: 0,
        }
    }

    #[test]
    fn test_parse_valid() {
        let inv = parse_args(["hillcrypt", "HELLO", "KEY", "1", "--inverse", "-vv"]).unwrap();
        assert_eq!(inv.message, "HELLO");
        assert_eq!(inv.key, "KEY");
        assert_eq!(inv.mode, Mode::Word);
        assert!(inv.inverse);
        assert!(!inv.decrypt);
        assert_eq!(inv.verbose, 2);
    }

    #[test]
    fn test_parse_missing_argument() {
        let err = parse_args(["hillcrypt", "HELLO", "KEY"]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Cipher(HillCryptError::InvalidArguments {
                expected: 3,
                actual: 2
            })
        ));
        assert_eq!(err.exit_code(), EXIT_FAILURE_CODE);
    }

    #[test]
    fn test_parse_too_many_arguments() {
        let err = parse_args(["hillcrypt", "a", "b", "0", "extra"]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Cipher(HillCryptError::InvalidArguments {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_parse_invalid_mode() {
        for mode in ["2", "abc", ""] {
            let err = parse_args(["hillcrypt", "HELLO", "KEY", mode]).unwrap_err();
            assert!(
                matches!(err, CliError::Cipher(HillCryptError::InvalidMode(_))),
                "mode={mode:?}"
            );
            assert_eq!(err.exit_code(), EXIT_FAILURE_CODE);
        }
    }

    #[test]
    fn test_parse_help_is_not_a_failure() {
        let err = parse_args(["hillcrypt", "--help"]).unwrap_err();
        assert!(matches!(err, CliError::Info(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_split_args() {
        let args: Vec<String> = ["prog", "a", "-v", "--inverse", "-x", "--", "-c", "--decrypt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (flags, positionals) = split_args(&args);
        assert_eq!(flags, vec!["-v", "--inverse"]);
        assert_eq!(positionals, vec!["a", "-x", "-c", "--decrypt"]);
    }

    #[test]
    fn test_parse_hyphen_prefixed_message_and_key() {
        let inv = parse_args(["hillcrypt", "-hello", "-5", "0"]).unwrap();
        assert_eq!(inv.message, "-hello");
        assert_eq!(inv.key, "-5");
        assert_eq!(inv.mode, Mode::Character);

        let inv = parse_args(["hillcrypt", "-x", "KEY", "1", "--decrypt"]).unwrap();
        assert_eq!(inv.message, "-x");
        assert_eq!(inv.mode, Mode::Word);
        assert!(inv.decrypt);
    }

    #[test]
    fn test_parse_negative_mode_is_invalid_mode() {
        let err = parse_args(["hillcrypt", "HELLO", "KEY", "-1"]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Cipher(HillCryptError::InvalidMode(ref m)) if m == "-1"
        ));
    }

    #[test]
    fn test_run_hyphen_prefixed_message() {
        let inv = parse_args(["hillcrypt", "-hello", "KEY", "0", "--decrypt"]).unwrap();
        let out = run(&inv).unwrap();
        assert!(out.ends_with("Decrypted message:\n-hello"));
    }

    #[test]
    fn test_run_golden_output() {
        let out = run(&invocation("HELLO", "KEY", Mode::Character)).unwrap();
        assert_eq!(
            out,
            "Key matrix:\n75\t69\t\n89\t0\t\nEncrypted message:\n11541 4968 12464 5244 5925 5451 "
        );
    }

    #[test]
    fn test_run_with_inverse_and_decrypt() {
        let mut inv = invocation("HELLO", "KEY", Mode::Character);
        inv.inverse = true;
        inv.decrypt = true;
        let out = run(&inv).unwrap();
        assert!(out.contains("\nInverse key matrix:\n0.0\t0.011\t\n0.014\t-0.012\t\n"));
        assert!(out.ends_with("Decrypted message:\nHELLO"));
    }

    #[test]
    fn test_run_singular_key_emits_nothing() {
        let mut inv = invocation("HELLO", "", Mode::Character);
        inv.decrypt = true;
        assert_eq!(run(&inv), Err(HillCryptError::SingularMatrix));
    }
}
