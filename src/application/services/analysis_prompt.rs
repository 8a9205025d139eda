use crate::domain::{DeviationAnalysis, Solution};

pub const EXPERT_COMMENT_LABEL: &str = "Expert description based on test reports: ";

pub const PHOTO_EVIDENCE_LABEL: &str =
    "Automated Inspection Recommendations based on attached photo: ";

pub const SOLUTION_SCHEMA_INSTRUCTION: &str = r#"Use the following JSON template structure and prepare the json object. Field values should be based on the text above. Predict the time in hours for repairEffortHours.
Resulted string will be mapped to an object with fields: issueType, summary, priorityLevel, repairEffortHours, checkList.
The checklist should include a list of necessary operations.
Provide the raw JSON without markdown formatting.
{
    "issueType": "",
    "summary": "",
    "priorityLevel": "",
    "repairEffortHours": "",
    "checkList": [""]
}
"#;

/// Captioning prompt sent with every deviation photo.
pub const INSPECTION_PROMPT: &str = "Analyze the provided photo of the electrical installation and identify potential issues. Review the following aspects and provide suggestions for improvement or further investigation:
1. Wiring and Insulation: Look for signs of wear, fraying, or exposed wires. Are all wires properly insulated and secured? Suggest any repairs if necessary.
2. Circuit Breakers and Fuses: Check the positioning, labeling, and condition of the circuit breakers. Are they functioning correctly? Suggest actions if any breaker's condition is questionable.
3. Conduit and Cable Routing: Are cables routed through proper conduits, and are they free from sharp bends or unsafe exposure? Suggest any necessary adjustments.
4. Grounding: Verify the grounding of the system. Is the installation properly grounded? If not, suggest steps to correct the grounding.
5. Overloaded Outlets or Junction Boxes: Are there any signs of overloaded circuits, overheating, or discoloration around outlets or junction boxes? Recommend necessary fixes.
6. Code Compliance: Is the installation in line with standard electrical codes (local or national)? Identify areas where it may be out of compliance and provide recommendations for updates.
7. Connection Integrity: Are there any loose or improperly connected terminals? Look for arc marks or signs of heat damage. Recommend any necessary reconnections or replacements.
8. General Condition and Environmental Damage: Is there any rust, corrosion, or environmental wear present that could affect performance? Suggest remediation steps if needed.
9. Maintenance Access and Ventilation: Does the installation have sufficient space for easy maintenance and adequate ventilation, especially near heat-producing equipment? Provide recommendations for reorganization if necessary.
Please provide a summary with specific suggestions for any repairs, further review, or potential hazards identified.";

#[derive(Debug, Clone, Copy)]
pub struct PromptOptions {
    /// Folds every transcript into the photo evidence segment ahead of the
    /// image descriptions, as the deployed prompt always has.
    pub repeat_transcripts_in_photo_evidence: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            repeat_transcripts_in_photo_evidence: true,
        }
    }
}

/// Builds the reasoning prompt from the expert comment and the collected evidence.
///
/// Segments are concatenated in fixed order with no separator; empty segments
/// are dropped. Within a segment, evidence values are joined by newlines.
pub fn build_solution_prompt(
    comment: &str,
    analysis: &DeviationAnalysis,
    options: PromptOptions,
) -> String {
    let transcripts: Vec<&str> = analysis.transcriptions.values().collect();

    let photo_evidence: Vec<&str> = if options.repeat_transcripts_in_photo_evidence {
        transcripts
            .iter()
            .copied()
            .chain(analysis.image_descriptions.values())
            .collect()
    } else {
        analysis.image_descriptions.values().collect()
    };

    let expert_segment = if comment.trim().is_empty() {
        String::new()
    } else {
        format!("{}{}", EXPERT_COMMENT_LABEL, comment)
    };

    [
        expert_segment,
        join_evidence(&transcripts),
        PHOTO_EVIDENCE_LABEL.to_string(),
        join_evidence(&photo_evidence),
        SOLUTION_SCHEMA_INSTRUCTION.to_string(),
    ]
    .into_iter()
    .filter(|segment| !segment.is_empty())
    .collect()
}

fn join_evidence(values: &[&str]) -> String {
    values
        .iter()
        .filter(|v| !v.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes markdown code fences the model wraps around its JSON despite being told not to.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

pub fn parse_solution(raw: &str) -> Result<Solution, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned.trim())
}
