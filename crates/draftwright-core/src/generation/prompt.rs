//! Prompt construction

use crate::models::Draft;

const PREAMBLE: &str = "You are an expert email writer. Transform the following raw thoughts into a polished, professional email.";

const INSTRUCTIONS: &str = "Write ONLY the email content. Do not include any explanations, meta-commentary, or notes. Start directly with the greeting (like \"Hi [Name],\" or \"Dear [Name],\") and end with a sign-off. Make sure the email:";

const REPLY_INSTRUCTION: &str = "Appropriately references and responds to the original email";

/// Instruction asking for a subject line; only used for new emails
pub const SUBJECT_INSTRUCTION: &str =
    "Has an appropriate subject line suggestion at the very start in the format \"Subject: [subject]\"";

/// Delimiter line around the quoted original message
pub const QUOTE_DELIMITER: &str = "---";

/// Build the single user prompt for a draft.
///
/// Thoughts and the quoted original are embedded verbatim.
pub fn build_prompt(draft: &Draft) -> String {
    let mut prompt = String::with_capacity(
        PREAMBLE.len() + INSTRUCTIONS.len() + draft.raw_thoughts.len() + 512,
    );

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\nTone: ");
    prompt.push_str(&draft.tone.prompt_phrase());
    prompt.push_str("\n\n");

    if let Some(original) = &draft.original_email {
        prompt.push_str("This is a reply to the following email:\n");
        prompt.push_str(QUOTE_DELIMITER);
        prompt.push('\n');
        prompt.push_str(original);
        prompt.push('\n');
        prompt.push_str(QUOTE_DELIMITER);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Raw thoughts to transform:\n");
    prompt.push_str(&draft.raw_thoughts);
    prompt.push_str("\n\n");
    prompt.push_str(INSTRUCTIONS);

    let third = if draft.is_reply() {
        REPLY_INSTRUCTION
    } else {
        SUBJECT_INSTRUCTION
    };
    for line in [
        "Matches the requested tone perfectly",
        "Is well-structured with clear paragraphs",
        third,
        "Sounds natural and human",
        "Uses [Name] or [Your Name] as placeholders where appropriate",
    ] {
        prompt.push_str("\n- ");
        prompt.push_str(line);
    }

    prompt
}
