//! Byte-level BPE tokenizer for BART checkpoints.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tokenizers::models::bpe::BPE;
use tokenizers::pre_tokenizers::byte_level::ByteLevel;
use tokenizers::{AddedToken, Tokenizer};
use tracing::info;

use super::TextTokenizer;
use crate::core::models::TokenSequence;

const BOS_TOKEN: &str = "<s>";
const EOS_TOKEN: &str = "</s>";
const SPECIAL_TOKENS: [&str; 5] = [BOS_TOKEN, "<pad>", EOS_TOKEN, "<unk>", "<mask>"];

pub struct BartTokenizer {
    inner: Tokenizer,
    bos_token_id: u32,
    eos_token_id: u32,
}

impl BartTokenizer {
    /// Loads `tokenizer.json` from `dir` when present, otherwise assembles
    /// the tokenizer from `vocab.json` and `merges.txt`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let tokenizer_json = dir.join("tokenizer.json");
        let inner = if tokenizer_json.is_file() {
            info!(path = %tokenizer_json.display(), "Loading tokenizer.json");
            Tokenizer::from_file(&tokenizer_json).map_err(|e| anyhow!(e))?
        } else {
            Self::from_vocab_and_merges(dir)?
        };
        Self::from_tokenizer(inner)
    }

    fn from_vocab_and_merges(dir: &Path) -> Result<Tokenizer> {
        let vocab = dir.join("vocab.json");
        let merges = dir.join("merges.txt");
        info!(
            vocab = %vocab.display(),
            merges = %merges.display(),
            "Building byte-level BPE tokenizer"
        );

        let vocab = vocab
            .to_str()
            .with_context(|| format!("non UTF-8 path: {}", vocab.display()))?;
        let merges = merges
            .to_str()
            .with_context(|| format!("non UTF-8 path: {}", merges.display()))?;

        let bpe = BPE::from_file(vocab, merges)
            .build()
            .map_err(|e| anyhow!(e))
            .context("failed to load BPE vocabulary")?;

        let mut tokenizer = Tokenizer::new(bpe);
        tokenizer
            .with_pre_tokenizer(Some(ByteLevel::new(false, true, true)))
            .with_decoder(Some(ByteLevel::new(false, true, true)));

        let specials: Vec<AddedToken> = SPECIAL_TOKENS
            .iter()
            .map(|t| AddedToken::from(*t, true))
            .collect();
        tokenizer.add_special_tokens(&specials);

        Ok(tokenizer)
    }

    pub fn from_tokenizer(inner: Tokenizer) -> Result<Self> {
        let bos_token_id = inner
            .token_to_id(BOS_TOKEN)
            .ok_or_else(|| anyhow!("vocabulary has no {BOS_TOKEN} token"))?;
        let eos_token_id = inner
            .token_to_id(EOS_TOKEN)
            .ok_or_else(|| anyhow!("vocabulary has no {EOS_TOKEN} token"))?;

        Ok(Self {
            inner,
            bos_token_id,
            eos_token_id,
        })
    }
}

impl TextTokenizer for BartTokenizer {
    fn encode(&self, text: &str, max_tokens: usize) -> Result<TokenSequence> {
        let encoding = self.inner.encode(text, false).map_err(|e| anyhow!(e))?;

        let budget = max_tokens.saturating_sub(2);
        let content = encoding.get_ids();
        let kept = content.get(..budget).unwrap_or(content);

        let mut ids = Vec::with_capacity(kept.len() + 2);
        ids.push(self.bos_token_id);
        ids.extend_from_slice(kept);
        ids.push(self.eos_token_id);
        Ok(ids)
    }

    fn decode(&self, tokens: &[u32], skip_special_tokens: bool) -> Result<String> {
        let text = self
            .inner
            .decode(tokens, skip_special_tokens)
            .map_err(|e| anyhow!(e))?;
        Ok(clean_up_tokenization(&text))
    }
}

/// Removes the spaces byte-level decoding leaves before punctuation and
/// English contractions.
#[must_use]
pub fn clean_up_tokenization(text: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 10] = [
        (" .", "."),
        (" ?", "?"),
        (" !", "!"),
        (" ,", ","),
        (" ' ", "'"),
        (" n't", "n't"),
        (" 'm", "'m"),
        (" 's", "'s"),
        (" 've", "'ve"),
        (" 're", "'re"),
    ];

    let mut out = text.to_string();
    for (from, to) in REPLACEMENTS {
        out = out.replace(from, to);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal BART-shaped vocabulary: "w" and " w" are the only words.
    fn tiny_tokenizer() -> (tempfile::TempDir, BartTokenizer) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("vocab.json"),
            r#"{"<s>":0,"<pad>":1,"</s>":2,"<unk>":3,"w":4,"\u0120":5,"\u0120w":6,"<mask>":7}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("merges.txt"), "#version: 0.2\n\u{120} w\n").unwrap();
        let tokenizer = BartTokenizer::from_dir(dir.path()).unwrap();
        (dir, tokenizer)
    }

    fn words(n: usize) -> String {
        vec!["w"; n].join(" ")
    }

    #[test]
    fn encode_wraps_content_in_bos_and_eos() {
        let (_dir, tokenizer) = tiny_tokenizer();
        assert_eq!(tokenizer.encode("w w w", 1024).unwrap(), vec![0, 4, 6, 6, 2]);
    }

    #[test]
    fn encode_truncates_long_input_to_max_tokens() {
        let (_dir, tokenizer) = tiny_tokenizer();
        let ids = tokenizer.encode(&words(3000), 1024).unwrap();

        assert_eq!(ids.len(), 1024);
        assert_eq!(ids[0], tokenizer.bos_token_id);
        assert_eq!(ids[ids.len() - 1], tokenizer.eos_token_id);
        assert!(ids[1..1023].iter().all(|&id| id == 4 || id == 6));
    }

    #[test]
    fn decode_skips_special_tokens() {
        let (_dir, tokenizer) = tiny_tokenizer();
        let ids = tokenizer.encode(&words(3000), 1024).unwrap();

        let text = tokenizer.decode(&ids, true).unwrap();
        assert!(!text.contains("<s>"));
        assert!(!text.contains("</s>"));
        assert_eq!(text, words(1022));

        let raw = tokenizer.decode(&[0, 4, 6, 2], false).unwrap();
        assert!(raw.starts_with("<s>"));
    }

    #[test]
    fn clean_up_joins_punctuation_and_contractions() {
        assert_eq!(
            clean_up_tokenization(" The meeting is moved , we do n't know why ."),
            "The meeting is moved, we don't know why."
        );
        assert_eq!(clean_up_tokenization("It 's done !"), "It's done!");
    }

    #[test]
    fn clean_up_leaves_plain_text_alone() {
        assert_eq!(clean_up_tokenization("plain text"), "plain text");
    }
}
