use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use brevity::core::models::{GenerationPlan, GenerationPolicy};
use brevity::model::Generator;

use super::{BOS, EOS};

#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub tokens: Vec<u32>,
    pub plan: GenerationPlan,
    pub policy: GenerationPolicy,
}

#[derive(Clone)]
pub struct MockGenerator {
    pub output: Vec<u32>,
    pub calls: Arc<Mutex<Vec<GenerateCall>>>,
    pub fail_with: Option<String>,
}

impl MockGenerator {
    pub fn new(output: Vec<u32>) -> Self {
        Self {
            output,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            output: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(vec![BOS, 7, 8, 9, EOS])
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(
        &self,
        tokens: &[u32],
        plan: &GenerationPlan,
        policy: &GenerationPolicy,
    ) -> anyhow::Result<Vec<u32>> {
        self.calls.lock().unwrap().push(GenerateCall {
            tokens: tokens.to_vec(),
            plan: *plan,
            policy: *policy,
        });
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.output.clone())
    }
}
