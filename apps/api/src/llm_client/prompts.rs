// Shared prompt fragments and sampling settings.
// Each feature that calls the generator keeps its own prompts.rs alongside it.

/// Sampling temperature used for every call in the app.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Instruction appended to prompts whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "JSON 형식으로만 응답해주세요. \
    JSON 바깥에 설명을 덧붙이지 마세요.";

/// Closing line shared by the Korean-language assistant prompts.
pub const ANSWER_IN_KOREAN: &str =
    "답변은 한국어로 제공하고, 실용적이고 구체적인 조언을 해주세요.";
