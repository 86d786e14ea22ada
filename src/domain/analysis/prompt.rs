//! Prompt construction for the analysis service

use crate::domain::scenario::ScenarioProfile;

/// System instruction for media-mode evaluation. The JSON shape named here
/// matches the response schema the client also declares on the request.
const MEDIA_SYSTEM_INSTRUCTION: &str = r#"あなたはプロのコミュニケーションアドバイザーです。
ユーザーから提供された動画または音声データを分析し、指定されたシチュエーションに基づいて評価を行ってください。

以下のJSON形式で回答を返してください：
{
  "totalScore": number (0-100),
  "metrics": {
    "clarity": number (0-10),
    "confidence": number (0-10),
    "empathy": number (0-10),
    "logic": number (0-10)
  },
  "feedback": "全体的なフィードバック（日本語）",
  "strengths": ["良かった点1", "良かった点2"],
  "improvements": ["改善すべき点1", "改善すべき点2"],
  "transcription": "書き起こしテキスト"
}"#;

/// Value object holding the instruction texts for one analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt {
    system_instruction: Option<String>,
    user_prompt: String,
}

impl AnalysisPrompt {
    /// Build the media-mode prompt pair: a fixed system instruction plus a
    /// short user prompt framing the selected scenario.
    pub fn for_media(scenario: &ScenarioProfile) -> Self {
        let user_prompt = format!(
            "以下のメディアデータを「{}」の場面として分析してください。\n\
             話し方、内容、表情（ビデオの場合）、論理構成を評価してください。",
            scenario.title
        );
        Self {
            system_instruction: Some(MEDIA_SYSTEM_INSTRUCTION.to_string()),
            user_prompt,
        }
    }

    /// Build the transcript-mode prompt: a single text embedding the
    /// transcript, the scenario's criteria, and the requested JSON shape.
    pub fn for_transcript(transcript: &str, scenario: &ScenarioProfile) -> Self {
        let score_shape = scenario
            .criteria
            .iter()
            .map(|c| format!("{{\"label\": \"{}\", \"value\": number (0-10)}}", c))
            .collect::<Vec<_>>()
            .join(", ");

        let user_prompt = format!(
            "あなたはプロの話し方講師です。以下は「{title}」の場面での発言です。\
             分析し、必ずJSON形式で答えてください。\n\
             発言: \"{transcript}\"\n\
             JSONフォーマット:\n\
             {{\n\
             \x20 \"scores\": [{score_shape}],\n\
             \x20 \"summary\": \"要約\",\n\
             \x20 \"advice\": \"アドバイス\",\n\
             \x20 \"beforeAfter\": [{{\"before\": \"元\", \"after\": \"改善\", \"reason\": \"理由\"}}]\n\
             }}",
            title = scenario.title,
        );
        Self {
            system_instruction: None,
            user_prompt,
        }
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }
}
