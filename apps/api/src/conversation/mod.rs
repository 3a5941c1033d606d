// Guided intake conversation and the market analysis it hands off to.
// All LLM calls go through llm_client, never to a provider directly.

pub mod analysis;
pub mod intake;
pub mod mock;
pub mod prompts;
