use std::sync::{Arc, Mutex};

use brevity::model::TextTokenizer;

use super::{BOS, EOS, PAD};

/// Maps every whitespace-separated word to one token id.
#[derive(Clone, Default)]
pub struct MockTokenizer {
    pub encode_calls: Arc<Mutex<Vec<(String, usize)>>>,
    pub decode_calls: Arc<Mutex<Vec<(Vec<u32>, bool)>>>,
    pub fail_encode: Option<String>,
    pub fail_decode: Option<String>,
}

impl MockTokenizer {
    pub fn failing_encode(msg: &str) -> Self {
        Self {
            fail_encode: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_decode(msg: &str) -> Self {
        Self {
            fail_decode: Some(msg.to_string()),
            ..Self::default()
        }
    }
}

impl TextTokenizer for MockTokenizer {
    fn encode(&self, text: &str, max_tokens: usize) -> anyhow::Result<Vec<u32>> {
        self.encode_calls
            .lock()
            .unwrap()
            .push((text.to_string(), max_tokens));
        if let Some(ref msg) = self.fail_encode {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let mut ids = vec![BOS];
        ids.extend(
            text.split_whitespace()
                .take(max_tokens.saturating_sub(2))
                .enumerate()
                .map(|(i, _)| 100 + i as u32),
        );
        ids.push(EOS);
        Ok(ids)
    }

    fn decode(&self, tokens: &[u32], skip_special_tokens: bool) -> anyhow::Result<String> {
        self.decode_calls
            .lock()
            .unwrap()
            .push((tokens.to_vec(), skip_special_tokens));
        if let Some(ref msg) = self.fail_decode {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let pieces: Vec<String> = tokens
            .iter()
            .filter_map(|&id| match id {
                BOS if skip_special_tokens => None,
                PAD if skip_special_tokens => None,
                EOS if skip_special_tokens => None,
                BOS => Some("<s>".to_string()),
                PAD => Some("<pad>".to_string()),
                EOS => Some("</s>".to_string()),
                other => Some(format!("t{other}")),
            })
            .collect();
        Ok(pieces.join(" "))
    }
}
