/// Provider-neutral completion request: one instruction, one user turn
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Instruction prompt
    pub system: String,
    /// User message
    pub user: String,
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Raw model output
#[derive(Debug, Clone)]
pub struct Completion {
    /// Concatenated text of the first candidate
    pub text: String,
    /// Why generation stopped, as reported by the provider
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}
