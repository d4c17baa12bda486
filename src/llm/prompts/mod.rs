// ABOUTME: Prompt and schema construction for the grading and coach requests
// ABOUTME: Builds per-category frame roles, the harsh rubric, and the JSON schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Prompts
//!
//! The grading prompt is assembled per request: frame role descriptions for
//! the category, a category- or skill-specific emphasis clause, and the fixed
//! harsh-grading rubric. The request also declares a Gemini response schema
//! matching [`AnalysisResult`](crate::models::AnalysisResult) exactly, so a
//! conforming service cannot omit required fields.
//!
//! The coach persona prompt is fixed and loaded at compile time.

use serde_json::{json, Value};

use super::{Content, ContentPart, GenerateRequest};
use crate::models::AnalysisRequest;
use crate::skills::SkillCategory;

/// Fixed system prompt for the free-form coach chat
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Build the full grading request: lead text, inline keyframes, system
/// instruction, and the response schema declaration
#[must_use]
pub fn build_analysis_request(request: &AnalysisRequest) -> GenerateRequest {
    let skill_name =
        crate::skills::sub_skill_display_name(request.sub_skill()).unwrap_or(request.sub_skill());

    let mut parts = vec![ContentPart::text(format!(
        "Analyze this {}-frame sequence for a \"{skill_name}\".",
        request.frames().len()
    ))];
    for frame in request.frames() {
        parts.push(ContentPart::inline_image(
            frame.mime_type.clone(),
            frame.data.clone(),
        ));
    }

    GenerateRequest::new(vec![Content::user(parts)])
        .with_system_instruction(analysis_system_prompt(request.category(), skill_name))
        .with_json_schema(analysis_response_schema())
}

/// Build the coach chat request for one user message
#[must_use]
pub fn build_coach_request(message: &str) -> GenerateRequest {
    GenerateRequest::new(vec![Content::user_text(message)])
        .with_system_instruction(COACH_SYSTEM_PROMPT)
}

/// Assemble the grading system prompt for a category and skill name
#[must_use]
pub fn analysis_system_prompt(category: SkillCategory, skill_name: &str) -> String {
    let frame_roles = frame_role_descriptions(category);
    let emphasis = emphasis_clause(category, skill_name);

    format!(
        r#"You are a harsh, world-class critic and AI football analyst.
Your job is to be extremely strict with your scoring. A score of 50-60 is for an average amateur. A score of 70-80 is for a top-tier amateur. A score of 90+ is for a world-class professional. **Do not give high scores easily.** Find the flaws.

You are analyzing a "{skill_name}".
{frame_roles}

Analyze the *entire motion* across all images. Identify issues in the sequence.
Provide one, consolidated report.

{emphasis}

You MUST respond *only* with a valid JSON object adhering precisely to the schema provided. Do not add "json" markdown tags or backticks around the JSON. Do not add any text before or after the JSON object.

IMPORTANT RULES FOR YOUR RESPONSE:
1.  **Strict JSON:** Output *only* the JSON object matching the declared schema.
2.  **At least one issue:** You **must** provide at least one item in the 'issues' array. Find a flaw, even a minor one.
3.  **Limited Strengths:** Only list 1-2 *clear* and *significant* strengths in the 'strengths' array. Be critical.
4.  **No Empty Strings:** All strings ("issue", "fix", "strength", "drill") **must** contain meaningful text. Do not return empty strings ("") or whitespace-only strings.
"#
    )
}

/// Per-category frame role descriptions matching the capture order
fn frame_role_descriptions(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Shooting | SkillCategory::Passing => {
            r#"You will receive 5 sequential keyframe images.
- Image 1: "Approach" (moment before contact)
- Image 2: "Contact" (moment of ball strike)
- Image 3: "Follow-through (Start)" (moment just after contact)
- Image 4: "Follow-through (End)" (end of the motion)
- Image 5: "Ball Trajectory" (the ball's path in the air)"#
        }
        SkillCategory::Defending => {
            r#"You will receive 4 sequential keyframe images.
- Image 1: "Approach" (closing down the attacker)
- Image 2: "Jockey/Stance" (body position, balance)
- Image 3: "Action" (the moment of the tackle, interception, or block)
- Image 4: "Recovery" (regaining balance or possession after the action)"#
        }
        SkillCategory::Positioning => {
            r#"You will receive 4 sequential keyframe images.
- Image 1: "Initial Position" (where the player is as the play begins)
- Image 2: "Scan/Movement" (player scanning or moving into space)
- Image 3: "Action Phase" (where the player is when the ball is played/received)
- Image 4: "Recovery/Transition" (where the player moves next)"#
        }
    }
}

/// Extra grading emphasis for the category, or for pass-like skill names
fn emphasis_clause(category: SkillCategory, skill_name: &str) -> &'static str {
    match category {
        SkillCategory::Shooting | SkillCategory::Passing => {
            let lower = skill_name.to_lowercase();
            if lower.contains("pass") || lower.contains("cross") || lower.contains("ball") {
                "SPECIAL INSTRUCTION FOR PASSING: Pay close attention to the pass weight/power based on the player's body shape. In your 'issues' section, you **must** comment on whether the pass power appears too high (too fast) or too low (too slow)."
            } else {
                ""
            }
        }
        SkillCategory::Defending => {
            "SPECIAL INSTRUCTION FOR DEFENDING: Focus on body shape, balance, and timing. Is the player on their toes? Is their body angled correctly? Did they over-commit?"
        }
        SkillCategory::Positioning => {
            "SPECIAL INSTRUCTION FOR POSITIONING: Focus on awareness. Is the player scanning? Are they in a good space to receive or defend? Are they ball-watching?"
        }
    }
}

/// Gemini-format response schema mirroring `AnalysisResult`
///
/// Required fields, enumerated severity, and minimum string lengths are all
/// declared so the service cannot legally return an empty or partial report.
#[must_use]
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "proScore": { "type": "NUMBER" },
            "issues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "severity": { "type": "STRING", "enum": ["high", "medium", "low"] },
                        "issue": { "type": "STRING", "minLength": 1 },
                        "fix": { "type": "STRING", "minLength": 1 }
                    },
                    "required": ["severity", "issue", "fix"]
                }
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING", "minLength": 1 }
            },
            "drills": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "drill": { "type": "STRING", "minLength": 1 },
                        "duration": { "type": "NUMBER" }
                    },
                    "required": ["drill", "duration"]
                }
            }
        },
        "required": ["score", "proScore", "issues", "strengths", "drills"]
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{AnalysisRequest, Keyframe};
    use crate::skills::SkillCategory;

    fn frames(n: usize) -> Vec<Keyframe> {
        (0..n).map(|_| Keyframe::jpeg("ZGF0YQ==")).collect()
    }

    #[test]
    fn analysis_request_carries_lead_text_and_all_frames() {
        let request =
            AnalysisRequest::new(SkillCategory::Shooting, "volley", frames(5)).unwrap();
        let built = build_analysis_request(&request);

        assert_eq!(built.contents.len(), 1);
        // One lead text part plus one part per keyframe
        assert_eq!(built.contents[0].parts.len(), 6);
        assert!(matches!(
            &built.contents[0].parts[0],
            ContentPart::Text { text } if text.contains("5-frame") && text.contains("Volley")
        ));
        assert!(built.system_instruction.is_some());
        assert!(built.generation_config.is_some());
    }

    #[test]
    fn pass_like_skill_names_get_the_power_emphasis() {
        let with = analysis_system_prompt(SkillCategory::Passing, "Ground Pass");
        assert!(with.contains("pass power"));

        let without = analysis_system_prompt(SkillCategory::Shooting, "Volley");
        assert!(!without.contains("pass power"));
    }

    #[test]
    fn prompts_state_the_harsh_rubric_and_frame_roles() {
        let prompt = analysis_system_prompt(SkillCategory::Defending, "Tackling");
        assert!(prompt.contains("90+ is for a world-class professional"));
        assert!(prompt.contains("4 sequential keyframe images"));
        assert!(prompt.contains("over-commit"));
    }

    #[test]
    fn schema_requires_every_result_field() {
        let schema = analysis_response_schema();
        let required = schema["required"].as_array().unwrap();
        for field in ["score", "proScore", "issues", "strengths", "drills"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
        }
        assert_eq!(schema["type"], "OBJECT");
    }

    #[test]
    fn coach_request_uses_the_persona_without_a_schema() {
        let built = build_coach_request("How do I defend a counter?");
        assert!(built.generation_config.is_none());
        let instruction = built.system_instruction.unwrap();
        assert!(matches!(
            &instruction.parts[0],
            ContentPart::Text { text } if text.contains("Coach AI")
        ));
    }
}
