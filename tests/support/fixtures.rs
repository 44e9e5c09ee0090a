#![allow(dead_code)]

use lawsage_guard::StructuredLegalOutput;
use lawsage_guard::document::STANDARD_DISCLAIMER;
use serde_json::json;

pub const RESEARCH_CONTEXT: &str = "California Civil Code Section 1942 lets a tenant repair and \
deduct. Code of Civil Procedure 1161 defines unlawful detainer. 42 U.S.C. 3604 bars \
discrimination in housing. Tenants must file an answer within five court days of service of \
the summons and complaint, and may request a hearing.";

pub const FABRICATED_CLAIM: &str =
    "Under California Civil Code § 999999 the landlord owes triple damages.";

/// An eviction-defense analysis that passes every structural check.
pub fn eviction_answer() -> StructuredLegalOutput {
    serde_json::from_value(json!({
        "disclaimer": STANDARD_DISCLAIMER,
        "strategy": "Respond to the unlawful detainer by asserting the habitability defense. \
                     Document every repair request and the landlord's failure to act before \
                     the answer deadline.",
        "adversarialStrategy": "The landlord will argue the tenant caused the damage and \
                                withheld rent without giving proper notice.",
        "roadmap": [
            {
                "step": 1,
                "title": "File an answer",
                "description": "File the answer with the clerk within five court days of service of the summons."
            },
            {
                "step": 2,
                "title": "Serve the landlord",
                "description": "Serve a copy of the answer on the landlord and file the proof of service."
            },
            {
                "step": 3,
                "title": "Prepare for the hearing",
                "description": "Gather repair requests and photos as evidence for the trial."
            }
        ],
        "filingTemplate": "SUPERIOR COURT OF CALIFORNIA, COUNTY OF LOS ANGELES\nPlaintiff v. Defendant\nANSWER - UNLAWFUL DETAINER",
        "citations": [
            "Cal. Civ. Code § 1942",
            { "text": "Cal. Code Civ. Proc. § 1161", "sourceKind": "state_statute" },
            "42 U.S.C. § 3604"
        ],
        "localLogistics": {
            "courthouseAddress": "111 N. Hill St, Los Angeles, CA",
            "hoursOfOperation": "8:30 a.m. to 4:30 p.m."
        },
        "proceduralChecks": ["Confirm the answer deadline with the clerk"]
    }))
    .expect("fixture should deserialize")
}

pub fn eviction_answer_json() -> String {
    serde_json::to_string(&eviction_answer()).expect("fixture should serialize")
}
