use deviation_analyzer::domain::{DeviationAnalysis, MediaId, Solution};

fn sample_solution() -> Solution {
    Solution {
        issue_type: "Overload".to_string(),
        summary: "Junction box discoloured".to_string(),
        priority_level: "Medium".to_string(),
        repair_effort_hours: "1".to_string(),
        check_list: vec!["Replace box".to_string()],
    }
}

#[test]
fn given_full_analysis_when_round_tripped_then_equal() {
    let mut analysis = DeviationAnalysis::new();
    analysis.add_transcription(&MediaId::from_raw("r1"), "wires are loose");
    analysis.add_image_description(&MediaId::from_raw("i1"), "panel shows scorch marks");
    analysis.set_solution(sample_solution());

    let json = serde_json::to_string(&analysis).unwrap();
    let restored: DeviationAnalysis = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, analysis);
}

#[test]
fn given_analysis_when_serialized_then_descriptions_live_under_images() {
    let mut analysis = DeviationAnalysis::new();
    analysis.add_image_description(&MediaId::from_raw("i1"), "rusty conduit");

    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["images"]["i1"], "rusty conduit");
    assert!(json["transcriptions"].as_object().unwrap().is_empty());
    assert!(json["solution"].is_null());
}

#[test]
fn given_recording_only_record_when_deserialized_then_solution_is_absent() {
    let analysis: DeviationAnalysis =
        serde_json::from_str(r#"{"transcriptions":{"r1":"hum"}}"#).unwrap();

    assert_eq!(analysis.transcriptions.get("r1"), Some("hum"));
    assert!(analysis.image_descriptions.is_empty());
    assert!(analysis.solution.is_none());
}
