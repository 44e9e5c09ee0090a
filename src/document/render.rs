use std::fmt::Write as _;

use super::StructuredLegalOutput;

const SECTION_BREAK: &str = "---";

/// Sectioned plain-text form shown to end users and fed to the critique
/// verifier.
pub fn render_text(doc: &StructuredLegalOutput) -> String {
    let mut out = String::new();

    if !doc.disclaimer.trim().is_empty() {
        let _ = writeln!(out, "{}\n", doc.disclaimer.trim());
    }

    let _ = writeln!(out, "STRATEGY:\n{}\n", doc.strategy.trim());
    let _ = writeln!(out, "ADVERSARIAL STRATEGY:\n{}\n", doc.adversarial_strategy.trim());

    out.push_str("ROADMAP:\n");
    for step in &doc.roadmap {
        let _ = writeln!(out, "{}. {}: {}", step.step_number, step.title.trim(), step.description.trim());
        if let Some(time) = step.estimated_time.as_deref().filter(|t| !t.trim().is_empty()) {
            let _ = writeln!(out, "   Estimated Time: {}", time.trim());
        }
        if !step.required_documents.is_empty() {
            let _ = writeln!(out, "   Required Documents: {}", step.required_documents.join(", "));
        }
        if let Some(counter) = step.counter_measure.as_deref().filter(|c| !c.trim().is_empty()) {
            let _ = writeln!(out, "   Counter Measure: {}", counter.trim());
        }
    }
    out.push('\n');

    out.push_str("CITATIONS:\n");
    for citation in &doc.citations {
        match citation.url.as_deref() {
            Some(url) => {
                let _ = writeln!(out, "- {} ({url})", citation.text.trim());
            }
            None => {
                let _ = writeln!(out, "- {}", citation.text.trim());
            }
        }
    }
    out.push('\n');

    if let Some(logistics) = &doc.local_logistics {
        out.push_str("LOCAL COURT LOGISTICS:\n");
        let _ = writeln!(out, "Courthouse: {}", logistics.courthouse_address.trim());
        let optional = [
            ("Filing Fees", &logistics.filing_fees),
            ("Dress Code", &logistics.dress_code),
            ("Parking", &logistics.parking_info),
            ("Hours", &logistics.hours_of_operation),
            ("Local Rules", &logistics.local_rules_url),
        ];
        for (label, value) in optional {
            if let Some(value) = value.as_deref() {
                let _ = writeln!(out, "{label}: {}", value.trim());
            }
        }
        out.push('\n');
    }

    out.push_str("PROCEDURAL CHECKS:\n");
    for check in &doc.procedural_checks {
        let _ = writeln!(out, "- {}", check.trim());
    }
    out.push('\n');

    let _ = writeln!(out, "FILING TEMPLATE:\n{}\n", doc.filing_template.trim());
    out.push_str(SECTION_BREAK);
    out.push('\n');
    out
}
