// Prompt fragments shared by every feature that parses model output as JSON.
// Feature prompts live in a prompts.rs next to the code that sends them.

/// System prompt for calls whose reply is deserialized.
pub const JSON_ONLY_SYSTEM: &str = "You are a market research assistant that answers in JSON. \
    Respond with a single valid JSON value and nothing else: \
    no prose before or after it, no markdown code fences, no comments.";
