//! Message tokenization helpers.

pub mod tokenizer;
