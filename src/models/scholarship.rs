//! Scholarship model for the scholarship information page.

use serde::{Deserialize, Serialize};

string_enum! {
    /// Kind of scholarship provider.
    ScholarshipType {
        Government => "government",
        University => "university",
        Private => "private",
        Organization => "organization",
    }
}

string_enum! {
    FundingType {
        FullTuition => "full-tuition",
        PartialTuition => "partial-tuition",
        MeritBased => "merit-based",
        NeedBased => "need-based",
    }
}

string_enum! {
    StudyLevel {
        Undergraduate => "undergraduate",
        Graduate => "graduate",
        Masters => "masters",
        Phd => "phd",
        AllLevels => "all-levels",
    }
}

string_enum! {
    FieldOfStudy {
        AllFields => "all-fields",
        Science => "science",
        Arts => "arts",
        Business => "business",
        Medicine => "medicine",
    }
}

/// A scholarship with bilingual descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_en: String,
    pub provider: String,
    #[serde(default)]
    pub provider_en: String,
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub benefits_en: Vec<String>,
    pub deadline: String,
    #[serde(default)]
    pub deadline_en: String,
    pub eligibility: String,
    #[serde(default)]
    pub eligibility_en: String,
    pub monthly_allowance: String,
    #[serde(default)]
    pub monthly_allowance_en: String,
    pub link: String,
    #[serde(rename = "type")]
    pub scholarship_type: ScholarshipType,
    #[serde(default)]
    pub funding_type: Vec<FundingType>,
    #[serde(default)]
    pub study_level: Vec<StudyLevel>,
    #[serde(default)]
    pub field_of_study: Vec<FieldOfStudy>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Optional filters of the scholarship page; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScholarshipFilter {
    pub funding_type: Option<FundingType>,
    pub study_level: Option<StudyLevel>,
    pub field_of_study: Option<FieldOfStudy>,
    pub scholarship_type: Option<ScholarshipType>,
}

impl ScholarshipFilter {
    /// Whether a scholarship passes every active filter.
    ///
    /// A scholarship open to `all-fields` matches any field filter.
    pub fn matches(&self, scholarship: &Scholarship) -> bool {
        let funding = self
            .funding_type
            .is_none_or(|f| scholarship.funding_type.contains(&f));
        let level = self
            .study_level
            .is_none_or(|l| scholarship.study_level.contains(&l));
        let field = self.field_of_study.is_none_or(|f| {
            scholarship.field_of_study.contains(&f)
                || scholarship.field_of_study.contains(&FieldOfStudy::AllFields)
        });
        let provider = self
            .scholarship_type
            .is_none_or(|t| scholarship.scholarship_type == t);

        funding && level && field && provider
    }
}

/// Scholarship list envelope used by the scholarship endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarshipList {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scholarship_type: Option<ScholarshipType>,
    pub scholarships: Vec<Scholarship>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scholarship(fields: Vec<FieldOfStudy>) -> Scholarship {
        Scholarship {
            id: "s1".to_string(),
            name: "ทุน GKS".to_string(),
            name_en: "GKS".to_string(),
            provider: "รัฐบาลเกาหลี".to_string(),
            provider_en: "Korean Government".to_string(),
            description: String::new(),
            description_en: String::new(),
            benefits: vec![],
            benefits_en: vec![],
            deadline: "มีนาคม".to_string(),
            deadline_en: "March".to_string(),
            eligibility: String::new(),
            eligibility_en: String::new(),
            monthly_allowance: "1,000,000 วอน".to_string(),
            monthly_allowance_en: "1,000,000 KRW".to_string(),
            link: "https://www.studyinkorea.go.kr".to_string(),
            scholarship_type: ScholarshipType::Government,
            funding_type: vec![FundingType::FullTuition],
            study_level: vec![StudyLevel::Masters, StudyLevel::Phd],
            field_of_study: fields,
            order: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_all_fields_matches_any_field() {
        let open = scholarship(vec![FieldOfStudy::AllFields]);
        let filter = ScholarshipFilter {
            field_of_study: Some(FieldOfStudy::Medicine),
            ..Default::default()
        };
        assert!(filter.matches(&open));
        assert!(!filter.matches(&scholarship(vec![FieldOfStudy::Arts])));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let gks = scholarship(vec![FieldOfStudy::Science]);
        let matching = ScholarshipFilter {
            funding_type: Some(FundingType::FullTuition),
            study_level: Some(StudyLevel::Phd),
            field_of_study: Some(FieldOfStudy::Science),
            scholarship_type: Some(ScholarshipType::Government),
        };
        assert!(matching.matches(&gks));

        let wrong_level = ScholarshipFilter {
            study_level: Some(StudyLevel::Undergraduate),
            ..matching
        };
        assert!(!wrong_level.matches(&gks));
    }

    #[test]
    fn test_hyphenated_wire_values() {
        let value = serde_json::to_value(scholarship(vec![FieldOfStudy::AllFields])).unwrap();
        assert_eq!(value["fundingType"][0], "full-tuition");
        assert_eq!(value["fieldOfStudy"][0], "all-fields");
        assert_eq!(value["type"], "government");
    }
}
