//! `ResumeDocument` — the fixed-shape input of the document assembler.
//!
//! Field names follow the PascalCase JSON produced upstream. Leaf text is lenient
//! (missing, `null`, or non-text values become `""`) so partially filled,
//! model-derived content still renders. Array fields must be present; an explicit
//! `null` array is normalised to empty, and so is an explicit `null` section.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(rename = "PersonalInfo", default, deserialize_with = "nullable_object")]
    pub personal_info: PersonalInfo,
    #[serde(rename = "Experience", deserialize_with = "required_list")]
    pub experience: Vec<Experience>,
    #[serde(rename = "Extracurricular", deserialize_with = "required_list")]
    pub extracurricular: Vec<Extracurricular>,
    #[serde(rename = "Education", default, deserialize_with = "nullable_object")]
    pub education: Education,
    #[serde(rename = "Skills", default, deserialize_with = "nullable_object")]
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(deserialize_with = "required_text_list")]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Extracurricular {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "required_text_list")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Education {
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: String,
    #[serde(rename = "GPA", default, deserialize_with = "lenient_text")]
    pub gpa: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient_text")]
    pub technical_skills: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub interests: String,
}

impl ResumeDocument {
    /// Decodes a document from a JSON value received at a service boundary.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary coercion
// ────────────────────────────────────────────────────────────────────────────

fn coerce_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(coerce_text)
        .unwrap_or_default())
}

fn required_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(coerce_text)
        .collect())
}

fn nullable_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn required_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_deserializes() {
        let doc = ResumeDocument::from_json(json!({
            "PersonalInfo": {
                "Name": "Jane Doe",
                "Title": "Backend Engineer",
                "Location": "Austin, TX",
                "Email": "jane@example.com",
                "Phone": "555-0100"
            },
            "Experience": [{
                "Company": "Acme",
                "Title": "Engineer",
                "Location": "Remote",
                "StartDate": "Jan 2021",
                "EndDate": "Present",
                "Responsibilities": ["Built things", "Shipped things"]
            }],
            "Extracurricular": [{ "Title": "Robotics", "Description": ["Mentored students"] }],
            "Education": {
                "Institution": "State University",
                "Degree": "BS Computer Science",
                "GPA": "3.6",
                "Dates": "2015 - 2019"
            },
            "Skills": { "TechnicalSkills": "Rust, SQL", "Interests": "Climbing" }
        }))
        .unwrap();

        assert_eq!(doc.personal_info.name, "Jane Doe");
        assert_eq!(doc.experience[0].responsibilities.len(), 2);
        assert_eq!(doc.education.gpa, "3.6");
        assert_eq!(doc.skills.technical_skills, "Rust, SQL");
    }

    #[test]
    fn test_numeric_gpa_is_coerced_to_text() {
        let doc = ResumeDocument::from_json(json!({
            "Experience": [],
            "Extracurricular": [],
            "Education": { "GPA": 3.6 }
        }))
        .unwrap();
        assert_eq!(doc.education.gpa, "3.6");
    }

    #[test]
    fn test_null_and_missing_leaves_become_empty() {
        let doc = ResumeDocument::from_json(json!({
            "PersonalInfo": { "Name": null, "Email": { "nested": true } },
            "Experience": [{ "Company": null, "Responsibilities": ["a", null, 7] }],
            "Extracurricular": []
        }))
        .unwrap();

        assert_eq!(doc.personal_info.name, "");
        assert_eq!(doc.personal_info.email, "");
        assert_eq!(doc.personal_info.phone, "");
        assert_eq!(doc.experience[0].company, "");
        assert_eq!(doc.experience[0].responsibilities, vec!["a", "", "7"]);
        assert_eq!(doc.education, Education::default());
    }

    #[test]
    fn test_missing_top_level_array_is_rejected() {
        let result = ResumeDocument::from_json(json!({ "Experience": [] }));
        assert!(result.is_err(), "missing Extracurricular must be rejected");
    }

    #[test]
    fn test_missing_responsibilities_is_rejected() {
        let result = ResumeDocument::from_json(json!({
            "Experience": [{ "Company": "Acme" }],
            "Extracurricular": []
        }));
        assert!(result.is_err(), "missing Responsibilities must be rejected");
    }

    #[test]
    fn test_null_array_is_normalised_to_empty() {
        let doc = ResumeDocument::from_json(json!({
            "Experience": [{ "Company": "Acme", "Responsibilities": null }],
            "Extracurricular": null
        }))
        .unwrap();
        assert!(doc.experience[0].responsibilities.is_empty());
        assert!(doc.extracurricular.is_empty());
    }

    #[test]
    fn test_null_sections_become_empty() {
        let doc = ResumeDocument::from_json(json!({
            "PersonalInfo": null,
            "Experience": [],
            "Extracurricular": [],
            "Education": null,
            "Skills": null
        }))
        .unwrap();
        assert_eq!(doc.personal_info, PersonalInfo::default());
        assert_eq!(doc.education, Education::default());
        assert_eq!(doc.skills, Skills::default());
    }
}
