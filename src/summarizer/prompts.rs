// src/summarizer/prompts.rs
use crate::profile::{AnalysisKind, ProfileFields};

pub const SYSTEM_PROMPT: &str = "You are a career analyst who writes about professional profiles. \
Work only from the profile text provided by the user. If a section is empty, \
say so briefly instead of inventing content. Respond with plain text, no markdown fences.";

/// Assemble the user prompt for one profile and analysis kind. Each kind
/// emphasizes different sections and targets a different length and tone.
pub fn build_prompt(fields: &ProfileFields, kind: AnalysisKind) -> String {
    let profile_block = profile_block(fields);

    match kind {
        AnalysisKind::Bio => format!(
            "Write a first-person LinkedIn bio (120-180 words) for the person below. \
Lead with who they are and what they do, weave in their strongest skills, and keep \
the tone warm and professional.\n\n{}",
            profile_block
        ),
        AnalysisKind::Summary => format!(
            "Write a third-person networking summary (80-120 words) of the person below, \
as you would brief a recruiter. Focus on their current role, headline strengths, and \
what kinds of opportunities would fit them.\n\n{}",
            profile_block
        ),
        AnalysisKind::Analysis => format!(
            "Write a structured analysis of the profile below with three short sections: \
Strengths, Gaps, and Suggestions. Consider every section of the profile, including \
education and skills, and be concrete about what is missing.\n\n{}",
            profile_block
        ),
    }
}

fn profile_block(fields: &ProfileFields) -> String {
    ProfileFields::COLUMNS
        .iter()
        .zip(fields.values())
        .map(|(column, value)| {
            let value = value.trim();
            if value.is_empty() {
                format!("{}: (not provided)", column)
            } else {
                format!("{}: {}", column, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> ProfileFields {
        ProfileFields {
            name: "Jane Doe".to_string(),
            headline: "Staff Engineer at Example Corp".to_string(),
            about: "Builds data platforms.".to_string(),
            experience: "Staff Engineer at Example Corp; Engineer at Start Inc".to_string(),
            skills: "Rust; SQL; Kafka".to_string(),
            education: "BSc Computer Science".to_string(),
        }
    }

    #[test]
    fn every_kind_includes_all_sections() {
        let fields = sample_fields();
        for kind in AnalysisKind::ALL {
            let prompt = build_prompt(&fields, kind);
            for column in ProfileFields::COLUMNS {
                assert!(prompt.contains(column), "{kind} prompt missing {column}");
            }
            assert!(prompt.contains("Jane Doe"));
        }
    }

    #[test]
    fn empty_sections_are_marked_not_invented() {
        let prompt = build_prompt(&ProfileFields::default(), AnalysisKind::Bio);
        assert!(prompt.contains("name: (not provided)"));
        assert!(prompt.contains("education: (not provided)"));
    }

    #[test]
    fn kinds_produce_distinct_prompts() {
        let fields = sample_fields();
        let bio = build_prompt(&fields, AnalysisKind::Bio);
        let summary = build_prompt(&fields, AnalysisKind::Summary);
        let analysis = build_prompt(&fields, AnalysisKind::Analysis);
        assert_ne!(bio, summary);
        assert_ne!(summary, analysis);
    }
}
