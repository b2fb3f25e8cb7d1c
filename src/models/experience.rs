//! Community experience-sharing model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Locale;

string_enum! {
    Degree {
        Bachelor => "bachelor",
        Master => "master",
        Phd => "phd",
        Exchange => "exchange",
    }
}

string_enum! {
    /// Language a study program is taught in.
    CurriculumLanguage {
        Korean => "korean",
        English => "english",
        Mixed => "mixed",
    }
}

string_enum! {
    ExperienceField {
        Science => "science",
        Arts => "arts",
        Business => "business",
        Medicine => "medicine",
        SocialScience => "social-science",
    }
}

/// Bilingual text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub th: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> String {
        locale.pick(&self.en, &self.th).to_string()
    }
}

/// Bilingual bullet list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedList {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub th: Vec<String>,
}

impl LocalizedList {
    /// English falls back to the Thai list when it is empty.
    pub fn get(&self, locale: Locale) -> Vec<String> {
        match locale {
            Locale::En if !self.en.is_empty() => self.en.clone(),
            _ => self.th.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// A student's study-in-Korea story, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub degree: Degree,
    pub curriculum_language: CurriculumLanguage,
    pub field_of_study: ExperienceField,
    pub name: LocalizedText,
    pub university: LocalizedText,
    pub major: LocalizedText,
    #[serde(default)]
    pub short_bio: LocalizedText,
    #[serde(default)]
    pub why_korea: LocalizedText,
    #[serde(default)]
    pub why_major: LocalizedText,
    #[serde(default)]
    pub life_in_korea: LocalizedText,
    #[serde(default)]
    pub recommendations: LocalizedText,
    #[serde(default)]
    pub major_pros: LocalizedList,
    #[serde(default)]
    pub major_cons: LocalizedList,
    #[serde(default)]
    pub uni_pros: LocalizedList,
    #[serde(default)]
    pub uni_cons: LocalizedList,
    #[serde(default)]
    pub recommended_courses: LocalizedList,
    #[serde(default)]
    pub achievements: LocalizedList,
    #[serde(default)]
    pub preparation: LocalizedList,
    #[serde(default)]
    pub contact: Contact,
    pub date_posted: NaiveDate,
}

/// An experience rendered in a single locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceView {
    pub id: String,
    pub name: String,
    pub photo: Option<String>,
    pub university: String,
    pub major: String,
    pub degree: Degree,
    pub curriculum_language: CurriculumLanguage,
    pub field_of_study: ExperienceField,
    pub short_bio: String,
    pub why_korea: String,
    pub why_major: String,
    pub major_pros: Vec<String>,
    pub major_cons: Vec<String>,
    pub uni_pros: Vec<String>,
    pub uni_cons: Vec<String>,
    pub recommended_courses: Vec<String>,
    pub achievements: Vec<String>,
    pub preparation: Vec<String>,
    pub life_in_korea: String,
    pub recommendations: String,
    pub contact: Contact,
    pub date_posted: NaiveDate,
}

impl Experience {
    pub fn localize(&self, locale: Locale) -> ExperienceView {
        ExperienceView {
            id: self.id.clone(),
            name: self.name.get(locale),
            photo: self.photo.clone(),
            university: self.university.get(locale),
            major: self.major.get(locale),
            degree: self.degree,
            curriculum_language: self.curriculum_language,
            field_of_study: self.field_of_study,
            short_bio: self.short_bio.get(locale),
            why_korea: self.why_korea.get(locale),
            why_major: self.why_major.get(locale),
            major_pros: self.major_pros.get(locale),
            major_cons: self.major_cons.get(locale),
            uni_pros: self.uni_pros.get(locale),
            uni_cons: self.uni_cons.get(locale),
            recommended_courses: self.recommended_courses.get(locale),
            achievements: self.achievements.get(locale),
            preparation: self.preparation.get(locale),
            life_in_korea: self.life_in_korea.get(locale),
            recommendations: self.recommendations.get(locale),
            contact: self.contact.clone(),
            date_posted: self.date_posted,
        }
    }
}

/// Optional filters of the experience page; `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExperienceFilter {
    pub degree: Option<Degree>,
    pub curriculum_language: Option<CurriculumLanguage>,
    pub field_of_study: Option<ExperienceField>,
}

impl ExperienceFilter {
    pub fn matches(&self, experience: &Experience) -> bool {
        self.degree.is_none_or(|d| experience.degree == d)
            && self
                .curriculum_language
                .is_none_or(|l| experience.curriculum_language == l)
            && self
                .field_of_study
                .is_none_or(|f| experience.field_of_study == f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn experience() -> Experience {
        serde_json::from_value(json!({
            "id": "0d7f7c1e-3f39-4b53-9a36-3f0f0b1f8c11",
            "degree": "master",
            "curriculumLanguage": "korean",
            "fieldOfStudy": "social-science",
            "name": { "en": "Ploy", "th": "พลอย" },
            "university": { "en": "Yonsei University", "th": "มหาวิทยาลัยยอนเซ" },
            "major": { "th": "รัฐศาสตร์" },
            "majorPros": { "en": ["Small classes"], "th": ["ห้องเรียนเล็ก"] },
            "uniCons": { "th": ["ค่าครองชีพสูง"] },
            "contact": { "instagram": "@ploy" },
            "datePosted": "2025-03-01"
        }))
        .unwrap()
    }

    #[test]
    fn test_localize_with_fallbacks() {
        let view = experience().localize(Locale::En);
        assert_eq!(view.name, "Ploy");
        assert_eq!(view.major, "รัฐศาสตร์");
        assert_eq!(view.major_pros, vec!["Small classes"]);
        assert_eq!(view.uni_cons, vec!["ค่าครองชีพสูง"]);
        assert!(view.recommended_courses.is_empty());
    }

    #[test]
    fn test_view_wire_format() {
        let value = serde_json::to_value(experience().localize(Locale::Th)).unwrap();
        assert_eq!(value["curriculumLanguage"], "korean");
        assert_eq!(value["fieldOfStudy"], "social-science");
        assert_eq!(value["contact"]["instagram"], "@ploy");
        assert!(value["contact"].get("email").is_none());
    }

    #[test]
    fn test_filter() {
        let exp = experience();
        assert!(ExperienceFilter::default().matches(&exp));
        let filter = ExperienceFilter {
            degree: Some(Degree::Bachelor),
            ..Default::default()
        };
        assert!(!filter.matches(&exp));
    }
}
