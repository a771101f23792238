//! Data exchanged with the language model during tailoring.
//!
//! `ResumeProfile` is the parsed form of an uploaded résumé and the unit that gets
//! rewritten per job. It is deliberately forgiving on input: every field defaults,
//! and `null` collections read as empty, because the model routinely omits things
//! it could not find.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

// ────────────────────────────────────────────────────────────────────────────
// Résumé profile
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeProfile {
    pub name: String,
    pub job_role: String,
    pub address: String,
    pub email_address: String,
    pub phone_number: String,
    #[serde(deserialize_with = "nullable_list")]
    pub professional_experience: Vec<ProfessionalExperience>,
    pub education: EducationRecord,
    #[serde(deserialize_with = "nullable_list")]
    pub extra_curriculars: Vec<Activity>,
    #[serde(deserialize_with = "nullable_list")]
    pub technical_skills: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub tools_and_technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalExperience {
    pub company_name: String,
    pub job_title: String,
    #[serde(deserialize_with = "nullable_list")]
    pub job_bullets: Vec<String>,
    pub job_location: String,
    /// Free text such as `"Jan 2021 - Mar 2023"`.
    pub job_date_range: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRecord {
    pub college_name: String,
    pub degree: String,
    pub date_range: String,
    #[serde(deserialize_with = "lenient_gpa")]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub activity_name: String,
    pub date_range: String,
    pub description: String,
}

/// Sections the rewrite step is allowed to touch. A `None` section is kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewrittenSections {
    pub professional_experience: Option<Vec<ProfessionalExperience>>,
    pub extra_curriculars: Option<Vec<Activity>>,
    pub technical_skills: Option<Vec<String>>,
    pub tools_and_technologies: Option<Vec<String>>,
}

impl ResumeProfile {
    /// Overlays rewritten sections; personal details and education never change.
    pub fn with_sections(&self, sections: RewrittenSections) -> ResumeProfile {
        ResumeProfile {
            professional_experience: sections
                .professional_experience
                .unwrap_or_else(|| self.professional_experience.clone()),
            extra_curriculars: sections
                .extra_curriculars
                .unwrap_or_else(|| self.extra_curriculars.clone()),
            technical_skills: sections
                .technical_skills
                .unwrap_or_else(|| self.technical_skills.clone()),
            tools_and_technologies: sections
                .tools_and_technologies
                .unwrap_or_else(|| self.tools_and_technologies.clone()),
            ..self.clone()
        }
    }

    /// Bullet count per experience entry, in order.
    pub fn bullet_counts(&self) -> Vec<usize> {
        self.professional_experience
            .iter()
            .map(|exp| exp.job_bullets.len())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job listing analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobKeywords {
    #[serde(deserialize_with = "nullable_list")]
    pub key_skills: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSummary {
    pub company_name: String,
    pub job_title: String,
    pub summary: String,
    #[serde(deserialize_with = "nullable_list")]
    pub key_skills: Vec<String>,
    #[serde(deserialize_with = "nullable_list")]
    pub key_requirements: Vec<String>,
}

impl JobSummary {
    /// Fills blank company and title with their placeholders.
    pub fn with_placeholders(mut self) -> Self {
        if self.company_name.trim().is_empty() {
            self.company_name = UNKNOWN_COMPANY.to_string();
        }
        if self.job_title.trim().is_empty() {
            self.job_title = UNKNOWN_POSITION.to_string();
        }
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Boundary coercion
// ────────────────────────────────────────────────────────────────────────────

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `3.7`, `"3.7"`, or `null`. Anything unparseable reads as absent.
fn lenient_gpa<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
