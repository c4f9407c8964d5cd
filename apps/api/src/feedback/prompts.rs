use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::transcript::{Role, Utterance};

/// Grading prompt template.
/// Replace: {transcript}, {analysis_log}, {json_only}
pub const GRADING_PROMPT_TEMPLATE: &str = r#"You are a Senior Hiring Manager grading a technical interview.

TRANSCRIPT:
{transcript}

INTERVIEWER'S HIDDEN NOTES (The "Shadow Dossier"):
{analysis_log}

(Use these notes to see where the candidate struggled, even if they faked confidence.)

OUTPUT FORMAT:
{json_only}
Use this exact schema:
{
    "score": (integer 0-100),
    "verdict": (string "Hire", "No Hire", or "Strong Hire"),
    "feedback_summary": (string, 2-3 sentences),
    "weak_areas": [list of strings],
    "strong_areas": [list of strings],
    "category_scores": {
        "Technical Skills": (int 1-10),
        "Communication": (int 1-10),
        "Problem Solving": (int 1-10),
        "Experience Match": (int 1-10)
    }
}"#;

pub fn render_grading_prompt(transcript: &[Utterance], analysis_log: &[String]) -> String {
    GRADING_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{analysis_log}", &render_analysis_log(analysis_log))
        .replace("{transcript}", &render_transcript(transcript))
}

fn render_transcript(transcript: &[Utterance]) -> String {
    if transcript.is_empty() {
        return "(no conversation recorded)".to_string();
    }
    transcript
        .iter()
        .map(|u| {
            let speaker = match u.role {
                Role::User => "Candidate",
                Role::Assistant => "Interviewer",
                Role::System => "System",
            };
            format!("{speaker}: {}", u.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_analysis_log(analysis_log: &[String]) -> String {
    if analysis_log.is_empty() {
        return "(no notes recorded)".to_string();
    }
    analysis_log
        .iter()
        .enumerate()
        .map(|(i, note)| format!("{}. {note}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
