// src/browser/extractor.rs
use super::PageHandle;
use crate::config::FieldSelectorOverlay;
use crate::error::AnalyzerError;
use crate::profile::{ProfileFields, RawProfile};
use scraper::{Html, Selector};
use tracing::debug;

const NAME_SELECTORS: [&str; 3] = [
    "h1.text-heading-xlarge",
    ".top-card-layout__title",
    "main h1",
];

const HEADLINE_SELECTORS: [&str; 3] = [
    ".text-body-medium.break-words",
    ".top-card-layout__headline",
    "[data-section='headline']",
];

const ABOUT_SELECTORS: [&str; 3] = [
    "section[data-section='summary'] .inline-show-more-text",
    "#about ~ div .inline-show-more-text",
    ".core-section-container__content .summary",
];

const EXPERIENCE_SELECTORS: [&str; 3] = [
    "section[data-section='experience'] li",
    "#experience ~ div li.artdeco-list__item",
    ".experience-section li",
];

const SKILLS_SELECTORS: [&str; 3] = [
    "section[data-section='skills'] li",
    "#skills ~ div li.artdeco-list__item",
    ".skills-section li",
];

const EDUCATION_SELECTORS: [&str; 3] = [
    "section[data-section='education'] li",
    "#education ~ div li.artdeco-list__item",
    ".education-section li",
];

/// Per-field selector lists, ordered most-specific first.
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    pub name: Vec<String>,
    pub headline: Vec<String>,
    pub about: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            name: owned(&NAME_SELECTORS),
            headline: owned(&HEADLINE_SELECTORS),
            about: owned(&ABOUT_SELECTORS),
            experience: owned(&EXPERIENCE_SELECTORS),
            skills: owned(&SKILLS_SELECTORS),
            education: owned(&EDUCATION_SELECTORS),
        }
    }
}

impl FieldSelectors {
    pub fn from_overlay(overlay: &FieldSelectorOverlay) -> Self {
        let defaults = Self::default();
        Self {
            name: overlay.name.clone().unwrap_or(defaults.name),
            headline: overlay.headline.clone().unwrap_or(defaults.headline),
            about: overlay.about.clone().unwrap_or(defaults.about),
            experience: overlay.experience.clone().unwrap_or(defaults.experience),
            skills: overlay.skills.clone().unwrap_or(defaults.skills),
            education: overlay.education.clone().unwrap_or(defaults.education),
        }
    }
}

/// Reads the six fixed profile sections out of a page snapshot. Individual
/// misses yield empty strings; only a bad handle fails the whole extraction.
pub struct FieldExtractor {
    selectors: FieldSelectors,
}

impl FieldExtractor {
    pub fn new(selectors: FieldSelectors) -> Self {
        Self { selectors }
    }

    pub fn extract(&self, page: &PageHandle) -> Result<ProfileFields, AnalyzerError> {
        if page.html.trim().is_empty() {
            return Err(AnalyzerError::InvalidPage(format!(
                "empty document for {}",
                page.url
            )));
        }

        let document = Html::parse_document(&page.html);

        let body = Selector::parse("body").expect("static selector");
        if document.select(&body).next().is_none() {
            return Err(AnalyzerError::InvalidPage(format!(
                "no body element for {}",
                page.url
            )));
        }

        let raw = RawProfile {
            name: first_text(&document, &self.selectors.name),
            headline: first_text(&document, &self.selectors.headline),
            about: first_text(&document, &self.selectors.about),
            experience: joined_texts(&document, &self.selectors.experience),
            skills: joined_texts(&document, &self.selectors.skills),
            education: joined_texts(&document, &self.selectors.education),
        };

        debug!(
            "Extracted fields from {}: name={}, headline={}",
            page.url,
            raw.name.is_some(),
            raw.headline.is_some()
        );

        Ok(raw.into_fields())
    }
}

/// First non-empty text match across the ordered selector list.
fn first_text(document: &Html, selectors: &[String]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// All matches for the first selector that yields any, joined with "; ".
/// Used for the list-shaped sections.
fn joined_texts(document: &Html, selectors: &[String]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            let items: Vec<String> = document
                .select(&selector)
                .map(|element| clean_text(&element.text().collect::<Vec<_>>().join(" ")))
                .filter(|text| !text.is_empty())
                .collect();

            if !items.is_empty() {
                return Some(items.join("; "));
            }
        }
    }
    None
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageHandle {
        PageHandle {
            url: "https://www.linkedin.com/in/jane-doe/".to_string(),
            html: html.to_string(),
        }
    }

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(FieldSelectors::default())
    }

    const FULL_PROFILE: &str = r#"
        <html><body>
          <main>
            <h1 class="text-heading-xlarge">  Jane
              Doe </h1>
            <div class="text-body-medium break-words">Staff Engineer at Example Corp</div>
            <section data-section="summary">
              <div class="inline-show-more-text">Builds data platforms.</div>
            </section>
            <section data-section="experience">
              <li>Staff Engineer at Example Corp</li>
              <li>Engineer at Start Inc</li>
            </section>
            <section data-section="skills">
              <li>Rust</li><li>SQL</li>
            </section>
            <section data-section="education">
              <li>BSc Computer Science</li>
            </section>
          </main>
        </body></html>
    "#;

    #[test]
    fn extracts_all_six_fields() {
        let fields = extractor().extract(&page(FULL_PROFILE)).unwrap();
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.headline, "Staff Engineer at Example Corp");
        assert_eq!(fields.about, "Builds data platforms.");
        assert_eq!(
            fields.experience,
            "Staff Engineer at Example Corp; Engineer at Start Inc"
        );
        assert_eq!(fields.skills, "Rust; SQL");
        assert_eq!(fields.education, "BSc Computer Science");
    }

    #[test]
    fn partial_page_defaults_missing_fields_to_empty() {
        let html = r#"<html><body><main>
            <h1 class="text-heading-xlarge">Jane Doe</h1>
        </main></body></html>"#;

        let fields = extractor().extract(&page(html)).unwrap();
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.headline, "");
        assert_eq!(fields.about, "");
        assert_eq!(fields.experience, "");
        assert_eq!(fields.skills, "");
        assert_eq!(fields.education, "");
    }

    #[test]
    fn empty_document_is_an_invalid_page() {
        let err = extractor().extract(&page("   ")).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPage(_)));
    }

    #[test]
    fn selector_fallback_order_is_respected() {
        let html = r#"<html><body>
            <h1 class="top-card-layout__title">Fallback Name</h1>
        </body></html>"#;

        let fields = extractor().extract(&page(html)).unwrap();
        assert_eq!(fields.name, "Fallback Name");
    }

    #[test]
    fn overlay_overrides_one_field_only() {
        let overlay = FieldSelectorOverlay {
            name: Some(vec!["#display-name".to_string()]),
            ..Default::default()
        };
        let extractor = FieldExtractor::new(FieldSelectors::from_overlay(&overlay));

        let html = r#"<html><body>
            <div id="display-name">Custom Jane</div>
            <div class="text-body-medium break-words">Engineer</div>
        </body></html>"#;

        let fields = extractor.extract(&page(html)).unwrap();
        assert_eq!(fields.name, "Custom Jane");
        assert_eq!(fields.headline, "Engineer");
    }
}
