use std::fmt;

use thiserror::Error;

/// Directive used when the caller leaves the instructions blank.
pub const DEFAULT_INSTRUCTIONS: &str = "Summarize the key points and action items.";

const PREAMBLE: &str = "Based on the following meeting transcript, create a professional summary \
for a CEO. The summary should be concise and use bullet points. The most important points \
should be highlighted in bold. Make sure to clearly separate key takeaways and actionable \
items. The tone should be formal and direct.";

const OUTPUT_TEMPLATE: &str = "Your summary format should be:\n\
\n\
**Key Takeaways**\n\
* Bullet point 1\n\
* **Bolded important point**\n\
* Bullet point 2\n\
\n\
**Action Items**\n\
* Action item 1\n\
* **Bolded important action item**\n\
* Action item 2";

/// Input rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("summary is empty")]
    EmptySummary,

    #[error("recipient address is empty")]
    EmptyRecipient,
}

/// Final prompt text sent to the generation endpoint.
///
/// Only [`build_summary_prompt`] creates one, so holding a `RenderedPrompt`
/// means the transcript was already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a deterministic summary prompt for a meeting transcript.
///
/// The transcript is embedded verbatim between `---` lines. Blank
/// `instructions` fall back to [`DEFAULT_INSTRUCTIONS`].
pub fn build_summary_prompt(
    transcript: &str,
    instructions: &str,
) -> Result<RenderedPrompt, InvalidInput> {
    if transcript.trim().is_empty() {
        return Err(InvalidInput::EmptyTranscript);
    }

    let instructions = match instructions.trim() {
        "" => DEFAULT_INSTRUCTIONS,
        trimmed => trimmed,
    };

    Ok(RenderedPrompt(format!(
        "{PREAMBLE}\n\
Instructions: {instructions}\n\
\n\
---\n\
{transcript}\n\
---\n\
\n\
{OUTPUT_TEMPLATE}"
    )))
}
