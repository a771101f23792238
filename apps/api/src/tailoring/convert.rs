//! Profile → `ResumeDocument` conversion for the document assembler.

use crate::document::model::{
    Education, Experience, Extracurricular, PersonalInfo, ResumeDocument, Skills,
};
use crate::tailoring::models::ResumeProfile;

/// End date used when a date range has no second half.
pub const OPEN_ENDED: &str = "Present";
const LIST_SEPARATOR: &str = ", ";

/// Converts a (possibly rewritten) profile into assembler input.
///
/// A non-blank `job_title` replaces the profile's own role in the header.
pub fn to_resume_document(profile: &ResumeProfile, job_title: &str) -> ResumeDocument {
    let title = if job_title.trim().is_empty() {
        profile.job_role.clone()
    } else {
        job_title.to_string()
    };

    ResumeDocument {
        personal_info: PersonalInfo {
            name: profile.name.clone(),
            title,
            location: profile.address.clone(),
            email: profile.email_address.clone(),
            phone: profile.phone_number.clone(),
        },
        experience: profile
            .professional_experience
            .iter()
            .map(|exp| {
                let (start_date, end_date) = split_date_range(&exp.job_date_range);
                Experience {
                    company: exp.company_name.clone(),
                    title: exp.job_title.clone(),
                    location: exp.job_location.clone(),
                    start_date,
                    end_date,
                    responsibilities: exp.job_bullets.clone(),
                }
            })
            .collect(),
        extracurricular: profile
            .extra_curriculars
            .iter()
            .map(|activity| Extracurricular {
                title: activity.activity_name.clone(),
                description: vec![activity.description.clone()],
            })
            .collect(),
        education: Education {
            institution: profile.education.college_name.clone(),
            degree: profile.education.degree.clone(),
            gpa: profile
                .education
                .gpa
                .map(|gpa| gpa.to_string())
                .unwrap_or_default(),
            dates: profile.education.date_range.clone(),
        },
        skills: Skills {
            technical_skills: profile.technical_skills.join(LIST_SEPARATOR),
            interests: profile.tools_and_technologies.join(LIST_SEPARATOR),
        },
    }
}

/// Splits `"Jan 2020 - Mar 2022"` on the first `-`. A missing or blank end is open-ended.
pub fn split_date_range(range: &str) -> (String, String) {
    let (start, end) = match range.split_once('-') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (range.trim(), ""),
    };
    let end = if end.is_empty() { OPEN_ENDED } else { end };
    (start.to_string(), end.to_string())
}
