//! Campaign agent orchestration
//!
//! One `process_brief` call runs the full pipeline: validate the brief,
//! render prompts, call the generation collaborator, parse its output,
//! cross-check the plan against the brief, then score creatives and scan for
//! hallucinations. Consistency failures are fatal and re-raised after being
//! recorded; hallucination flags are advisory and only accumulate in metrics.
//! The consistency check always runs to completion before any scoring
//! begins, since scoring an inconsistent plan is meaningless.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::{Brief, Campaign};
use crate::error::{PlanrError, Result};
use crate::kb::KnowledgeBase;
use crate::llm::{GenerationRequest, LlmClient, estimate_tokens};
use crate::metrics::{Metrics, MetricsRecorder, PromptKind};
use crate::prompt::PromptBuilder;
use crate::scoring::CreativeScorer;
use crate::validation::{ConsistencyChecker, HallucinationDetector, TextMatcher};

/// Final output of one processing request: the scored campaign plus the
/// metrics snapshot for the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    #[serde(flatten)]
    pub campaign: Campaign,

    pub metrics: Metrics,

    pub generated_at: DateTime<Utc>,
}

/// Orchestrates generation, verification and scoring for campaign briefs
pub struct CampaignAgent {
    client: Arc<dyn LlmClient>,
    checker: ConsistencyChecker,
    scorer: CreativeScorer,
    detector: HallucinationDetector,
    prompts: PromptBuilder,
    max_tokens: u32,
    temperature: f32,
}

impl CampaignAgent {
    pub fn new(client: Arc<dyn LlmClient>, kb: Arc<KnowledgeBase>, config: &Config) -> Self {
        let matcher = TextMatcher::new(config.matching);
        Self {
            client,
            checker: ConsistencyChecker::new(),
            scorer: CreativeScorer::new(kb, config.scoring, matcher),
            detector: HallucinationDetector::new(config.hallucination, matcher),
            prompts: PromptBuilder::new(),
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        }
    }

    /// Process one brief end to end.
    ///
    /// A fresh MetricsRecorder is created per call; concurrent calls never
    /// share accumulator state.
    pub async fn process_brief(&self, brief: &Brief) -> Result<CampaignReport> {
        let mut recorder = MetricsRecorder::new();
        recorder.start();

        match self.run(brief, &mut recorder).await {
            Ok(campaign) => {
                recorder.stop(true);
                Ok(CampaignReport {
                    campaign,
                    metrics: recorder.snapshot(),
                    generated_at: Utc::now(),
                })
            }
            Err(err) => {
                // consistency violations were already recorded rule by rule
                if !matches!(err, PlanrError::Consistency(_)) {
                    recorder.log_validation_error(err.to_string());
                }
                recorder.stop(false);
                Err(err)
            }
        }
    }

    async fn run(&self, brief: &Brief, recorder: &mut MetricsRecorder) -> Result<Campaign> {
        brief.validate()?;

        let system_prompt = self.prompts.system_prompt();
        let user_prompt = self.prompts.user_prompt(brief)?;
        recorder.log_token_count(PromptKind::SystemPrompt, estimate_tokens(system_prompt));
        recorder.log_token_count(PromptKind::UserPrompt, estimate_tokens(&user_prompt));

        log::info!(
            "Generating campaign for {} via {}",
            brief.campaign_id,
            self.client.model()
        );

        let response = self
            .client
            .generate(GenerationRequest {
                system_prompt: system_prompt.to_string(),
                user_prompt,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            })
            .await?;
        recorder.log_token_count(PromptKind::Completion, estimate_tokens(&response.content));

        let mut campaign = parse_campaign(&response.content)?;

        let result = self.checker.check(&campaign, brief);
        if !result.ok {
            for violation in &result.violations {
                recorder.log_validation_error(violation.to_string());
            }
            if let Some(first) = result.into_first() {
                return Err(PlanrError::Consistency(first));
            }
        }
        campaign.checks.budget_sum_ok = true;
        campaign.checks.required_fields_present = true;

        // consistency is settled; creatives are independent from here on
        for ad_group in &mut campaign.ad_groups {
            for creative in &mut ad_group.creatives {
                let score = self.scorer.score(creative, &brief.product.name);
                creative.score = Some(score);
                if let Some(flag) = self.detector.inspect(creative, &brief.product.key_features) {
                    recorder.log_hallucination(flag);
                }
            }
        }

        Ok(campaign)
    }
}

/// Parse generation output into a Campaign, tolerating a Markdown code fence
/// around the JSON document
fn parse_campaign(content: &str) -> Result<Campaign> {
    let stripped = strip_code_fence(content);
    serde_json::from_str(stripped).map_err(|e| PlanrError::MalformedOutput(e.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
