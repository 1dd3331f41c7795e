//! Mock LLM client for offline runs and tests
//!
//! Returns a canned FocusFlow campaign by default; tests can queue their own
//! responses to exercise failure paths without a network.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::llm::client::{
    GenerationRequest, GenerationResponse, LlmClient, LlmError, TokenUsage, estimate_tokens,
};

/// Mock client: canned campaign, or queued responses in order
#[derive(Debug, Default)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl MockLlmClient {
    /// A client that always returns the canned campaign
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that returns the given responses in order, then the canned
    /// campaign once exhausted
    pub fn with_responses(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many generate() calls this client has served
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The canned FocusFlow campaign used for offline runs
    pub fn canned_campaign() -> Value {
        json!({
            "campaign_id": "cmp_2025_09_01",
            "campaign_name": "FocusFlow Trial Push Sep2025",
            "objective": "trial_signups",
            "total_budget": 5000,
            "budget_breakdown": {
                "search": 3000,
                "social": 2000
            },
            "ad_groups": [
                {
                    "id": "ag_1",
                    "target": {
                        "age": "25-40",
                        "behaviors": ["remote work", "productivity apps"]
                    },
                    "creatives": [
                        {
                            "id": "c_1a",
                            "headline": "Get More Done — Free 14-Day Trial",
                            "body": "AI task prioritization that fits your calendar. Try FocusFlow free for 14 days.",
                            "cta": "Start Free Trial",
                            "justification": "Highlights trial + AI feature; concise for search."
                        }
                    ]
                }
            ],
            "checks": {
                "budget_sum_ok": true,
                "required_fields_present": true
            }
        })
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let queued = self
            .responses
            .lock()
            .map_err(|_| LlmError::InvalidResponse("mock response queue poisoned".to_string()))?
            .pop_front();

        let content = match queued {
            Some(content) => content,
            None => Self::canned_campaign().to_string(),
        };

        let usage = TokenUsage {
            input_tokens: estimate_tokens(&request.system_prompt)
                + estimate_tokens(&request.user_prompt),
            output_tokens: estimate_tokens(&content),
        };

        Ok(GenerationResponse { content, usage })
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
