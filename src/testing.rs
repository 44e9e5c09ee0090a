//! Shared fixtures for unit tests.

use crate::document::{
    Citation, LocalLogistics, RoadmapStep, STANDARD_DISCLAIMER, StructuredLegalOutput,
};

pub(crate) const SAMPLE_CONTEXT: &str = "California Civil Code Section 1942 lets a tenant repair \
and deduct. Code of Civil Procedure 1161 defines unlawful detainer. 42 U.S.C. 3604 bars \
discrimination in housing. Tenants must file an answer within five court days of service of \
the summons and complaint, and may request a hearing.";

pub(crate) fn step(number: u32, title: &str, description: &str) -> RoadmapStep {
    RoadmapStep {
        step_number: number,
        title: title.into(),
        description: description.into(),
        ..RoadmapStep::default()
    }
}

/// A document that passes every structural check.
pub(crate) fn sample_document() -> StructuredLegalOutput {
    StructuredLegalOutput {
        disclaimer: STANDARD_DISCLAIMER.into(),
        strategy: "Respond to the unlawful detainer by asserting the habitability defense. \
                   Document every repair request and the landlord's failure to act before the \
                   answer deadline."
            .into(),
        adversarial_strategy: "The landlord will argue the tenant caused the damage and \
                               withheld rent without giving proper notice."
            .into(),
        roadmap: vec![
            step(
                1,
                "File an answer",
                "File the answer with the clerk within five court days of service of the summons.",
            ),
            step(
                2,
                "Serve the landlord",
                "Serve a copy of the answer on the landlord and file the proof of service.",
            ),
            step(
                3,
                "Prepare for the hearing",
                "Gather repair requests and photos as evidence for the trial.",
            ),
        ],
        filing_template: "SUPERIOR COURT OF CALIFORNIA, COUNTY OF LOS ANGELES\n\
                          Plaintiff v. Defendant\nANSWER - UNLAWFUL DETAINER"
            .into(),
        citations: vec![
            Citation::new("Cal. Civ. Code § 1942"),
            Citation::new("Cal. Code Civ. Proc. § 1161"),
            Citation::new("42 U.S.C. § 3604"),
        ],
        sources: Vec::new(),
        local_logistics: Some(LocalLogistics {
            courthouse_address: "111 N. Hill St, Los Angeles".into(),
            filing_fees: Some("$240 unless a fee waiver is granted".into()),
            ..LocalLogistics::default()
        }),
        procedural_checks: vec!["Confirm the answer is filed within five court days.".into()],
        correction: None,
    }
}
