// Prompt builders for the cooking assistant.

use crate::llm_client::prompts::ANSWER_IN_KOREAN;
use crate::models::profile::UserProfileRow;
use crate::models::recipe::Recipe;

pub const CHAT_MAX_TOKENS: u32 = 500;
pub const RECIPE_QUESTION_MAX_TOKENS: u32 = 400;

const CHAT_INTRO: &str = "당신은 1인 가구를 위한 레시피 추천 챗봇입니다.

사용자의 질문에 대해 친근하고 도움이 되는 답변을 제공해주세요.

주요 기능:
1. 레시피 추천 및 대체 재료 제안
2. 조리 팁 및 요리 방법 안내
3. 영양 정보 및 칼로리 계산
4. 식단 계획 조언";

const RECIPE_EXPERT_INTRO: &str = "당신은 레시피 전문가입니다.

사용자의 레시피 관련 질문에 대해 정확하고 실용적인 답변을 제공해주세요.";

fn joined_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "없음".to_string()
    } else {
        items.join(", ")
    }
}

/// System prompt for free-form chat. `profile` is `None` for anonymous users.
pub fn chat_system_prompt(profile: Option<&UserProfileRow>) -> String {
    let user_info = match profile {
        Some(p) => format!(
            "- 알레르기: {}\n- 선호 음식: {}",
            joined_or_none(&p.allergies),
            joined_or_none(&p.preferences)
        ),
        None => "로그인하지 않은 사용자".to_string(),
    };
    format!("{CHAT_INTRO}\n\n사용자 정보:\n{user_info}\n\n{ANSWER_IN_KOREAN}")
}

pub fn recipe_question_system_prompt(recipe: Option<&Recipe>) -> String {
    let recipe_info = recipe
        .map(|r| {
            format!(
                "\n\n레시피 정보:\n- 제목: {}\n- 재료: {}\n- 조리시간: {}분\n- 난이도: {}\n- 카테고리: {}",
                r.title,
                r.ingredients.join(", "),
                r.cooking_time,
                r.difficulty,
                r.category
            )
        })
        .unwrap_or_default();
    format!("{RECIPE_EXPERT_INTRO}{recipe_info}\n\n{ANSWER_IN_KOREAN}")
}
