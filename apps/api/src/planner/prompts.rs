// Prompt constants for weekly-plan personalization.

/// System instruction for personalization.
pub const PERSONALIZATION_SYSTEM: &str = "당신은 영양사이자 요리 전문가입니다.";

/// Personalization prompt. Replace `{preferences}`, `{plan_json}`, and
/// `{json_instruction}` before sending.
pub const PERSONALIZATION_PROMPT_TEMPLATE: &str = r#"다음 주간 식단 계획을 사용자의 선호도에 맞게 개인화해주세요.

사용자 선호도: {preferences}

현재 주간 계획:
{plan_json}

다음 형식으로 응답해주세요:
1. 각 요일별로 추천하는 레시피 변경사항
2. 개인화된 조리 팁
3. 영양 균형 개선 제안

{json_instruction}"#;

pub const PERSONALIZATION_MAX_TOKENS: u32 = 800;
