use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::CritiqueError;
use crate::document::RoadmapStep;
use crate::patterns::compile;

static STEP_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^\s*(?:step\s+)?(\d{1,3})[.):]\s+(.+)$"));

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[A-Z][A-Z /&-]*:$"));

/// Roadmap steps of an output, from its JSON `roadmap` array when the output
/// carries one, otherwise from a plain-text `ROADMAP:` section.
///
/// A JSON `roadmap` that is not a list of steps is an error; an output with
/// neither form simply has no steps.
pub(super) fn extract_roadmap(
    json: Option<&Value>,
    output_text: &str,
) -> Result<Vec<RoadmapStep>, CritiqueError> {
    match json.and_then(|v| v.get("roadmap")) {
        Some(Value::Null) | None => Ok(roadmap_from_text(output_text)),
        Some(roadmap) => serde_json::from_value(roadmap.clone())
            .map_err(|e| CritiqueError::MalformedRoadmap(e.to_string())),
    }
}

fn roadmap_from_text(text: &str) -> Vec<RoadmapStep> {
    let mut steps: Vec<RoadmapStep> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_section {
            in_section = trimmed.eq_ignore_ascii_case("roadmap:");
            continue;
        }
        if trimmed == "---" || SECTION_HEADER.is_match(trimmed) {
            break;
        }
        if let Some(caps) = STEP_LINE.captures(line)
            && let Ok(step_number) = caps[1].parse::<u32>()
        {
            let rest = caps[2].trim();
            let (title, description) = rest.split_once(": ").unwrap_or((rest, ""));
            steps.push(RoadmapStep {
                step_number,
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                ..RoadmapStep::default()
            });
        } else if !trimmed.is_empty()
            && let Some(last) = steps.last_mut()
        {
            if !last.description.is_empty() {
                last.description.push(' ');
            }
            last.description.push_str(trimmed);
        }
    }
    steps
}
