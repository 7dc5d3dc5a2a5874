#![allow(dead_code)]

pub mod generator;
pub mod tokenizer;

pub const BOS: u32 = 0;
pub const PAD: u32 = 1;
pub const EOS: u32 = 2;

/// Ten-word input, the smallest text that reaches the model.
pub const TEN_WORDS: &str = "one two three four five six seven eight nine ten";
pub const NINE_WORDS: &str = "one two three four five six seven eight nine";

pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}
