//! Prompt construction for campaign generation
//!
//! The system prompt is fixed; the user prompt is a Handlebars template that
//! carries the pretty-printed brief JSON and the output schema the generator
//! must follow.

use handlebars::Handlebars;
use serde_json::json;

use crate::domain::Brief;
use crate::error::{PlanrError, Result};

/// Fixed instructions for the generation model
pub const SYSTEM_PROMPT: &str = "\
You are an expert marketing campaign planner specialized in creating structured ad campaigns. \
Your task is to convert campaign briefs into detailed, machine-readable campaign plans.

Your output must:
1. Follow the exact JSON schema provided in the campaign brief
2. Generate realistic and effective ad content
3. Provide clear targeting recommendations
4. Include logical budget allocations
5. Add brief justifications for creative choices

Guidelines:
- Ensure all IDs follow the specified formats
- Make budget breakdowns that sum to the total budget
- Create multiple ad variants per ad group
- Keep ad copy within platform limits
- Use a professional, brand-appropriate tone
- Base targeting on audience hints provided

Always validate your output:
- Check all required fields are present
- Verify budget numbers sum correctly
- Ensure all IDs are unique
- Confirm targeting matches audience hints

Return your response as a single JSON object matching the campaign schema.";

/// User prompt template; `{{brief}}` receives the pretty-printed brief JSON
pub const USER_PROMPT_TEMPLATE: &str = "\
Campaign brief:

```json
{{brief}}
```

Produce the campaign plan as one JSON object with this shape:

```json
{
  \"campaign_id\": \"<same as brief>\",
  \"campaign_name\": \"<string>\",
  \"objective\": \"<string>\",
  \"total_budget\": <same as brief budget>,
  \"budget_breakdown\": {\"<channel>\": <amount>},
  \"ad_groups\": [
    {
      \"id\": \"<unique>\",
      \"target\": {\"age\": \"<range>\", \"behaviors\": [\"<string>\"]},
      \"creatives\": [
        {
          \"id\": \"<unique within ad group>\",
          \"headline\": \"<string>\",
          \"body\": \"<string>\",
          \"cta\": \"<string>\",
          \"justification\": \"<string>\"
        }
      ]
    }
  ],
  \"checks\": {\"budget_sum_ok\": <bool>, \"required_fields_present\": <bool>}
}
```

Respond with the JSON object only.";

/// Renders the generation prompts for a brief
pub struct PromptBuilder {
    handlebars: Handlebars<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Prompt text is not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Render the user prompt with the brief embedded as pretty JSON
    pub fn user_prompt(&self, brief: &Brief) -> Result<String> {
        let brief_json = serde_json::to_string_pretty(brief)?;
        self.handlebars
            .render_template(USER_PROMPT_TEMPLATE, &json!({ "brief": brief_json }))
            .map_err(|e| PlanrError::Prompt(format!("failed to render user prompt: {}", e)))
    }
}
