use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const DEFAULT_TEMPLATE_ID: &str = "professional";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl BasicInfo {
    /// Labels of the five required fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("title", &self.title),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(label, _)| label)
        .collect()
    }

    /// Number of fields (required and optional) carrying a non-blank value.
    pub fn filled_field_count(&self) -> usize {
        let required = [
            &self.name,
            &self.title,
            &self.email,
            &self.phone,
            &self.location,
        ]
        .into_iter()
        .filter(|v| !is_blank(v))
        .count();
        let optional = [&self.linkedin, &self.website]
            .into_iter()
            .filter(|v| v.as_deref().is_some_and(|s| !is_blank(s)))
            .count();
        required + optional
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        require(&mut problems, &self.name, "Name is required");
        require(&mut problems, &self.title, "Title is required");
        if !looks_like_email(&self.email) {
            problems.push("Invalid email address");
        }
        require(&mut problems, &self.phone, "Phone number is required");
        require(&mut problems, &self.location, "Location is required");
        finish(problems)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: String,
    pub company_name: String,
    pub job_title: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_job: Option<bool>,
    pub description: String,
    #[serde(default)]
    pub key_skills: Vec<String>,
    #[serde(default)]
    pub is_simulated: bool,
}

impl Experience {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        require(&mut problems, &self.company_name, "Company name is required");
        require(&mut problems, &self.job_title, "Job title is required");
        require(&mut problems, &self.start_date, "Start date is required");
        require(&mut problems, &self.description, "Description is required");
        finish(problems)
    }

    pub fn ensure_id(&mut self) {
        if is_blank(&self.id) {
            self.id = Uuid::new_v4().to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: String,
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Education {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        require(&mut problems, &self.institution, "Institution is required");
        require(&mut problems, &self.degree, "Degree is required");
        require(&mut problems, &self.start_date, "Start date is required");
        require(&mut problems, &self.end_date, "End date is required");
        finish(problems)
    }

    pub fn ensure_id(&mut self) {
        if is_blank(&self.id) {
            self.id = Uuid::new_v4().to_string();
        }
    }
}

/// A stored resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: u64,
    pub user_id: Option<u64>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_public: bool,
    pub template_id: String,
    pub basic_info: BasicInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub summary: Option<String>,
}

impl Resume {
    /// Skills with a non-blank value; blank entries don't count anywhere.
    pub fn filled_skill_count(&self) -> usize {
        self.skills.iter().filter(|s| !is_blank(s)).count()
    }
}

/// Body of `POST /api/resumes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResume {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default = "default_template_id")]
    pub template_id: String,
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl NewResume {
    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.title) {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        for experience in &self.experiences {
            experience.validate()?;
        }
        for education in &self.education {
            education.validate()?;
        }
        Ok(())
    }
}

/// Body of `PUT /api/resumes/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePatch {
    pub user_id: Option<u64>,
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub template_id: Option<String>,
    pub basic_info: Option<BasicInfo>,
    pub experiences: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub skills: Option<Vec<String>>,
    pub summary: Option<String>,
}

impl ResumePatch {
    pub fn apply(self, resume: &mut Resume) {
        if let Some(user_id) = self.user_id {
            resume.user_id = Some(user_id);
        }
        if let Some(title) = self.title {
            resume.title = title;
        }
        if let Some(is_public) = self.is_public {
            resume.is_public = is_public;
        }
        if let Some(template_id) = self.template_id {
            resume.template_id = template_id;
        }
        if let Some(basic_info) = self.basic_info {
            resume.basic_info = basic_info;
        }
        if let Some(mut experiences) = self.experiences {
            experiences.iter_mut().for_each(Experience::ensure_id);
            resume.experiences = experiences;
        }
        if let Some(mut education) = self.education {
            education.iter_mut().for_each(Education::ensure_id);
            resume.education = education;
        }
        if let Some(skills) = self.skills {
            resume.skills = skills;
        }
        if let Some(summary) = self.summary {
            resume.summary = Some(summary);
        }
    }
}

fn default_template_id() -> String {
    DEFAULT_TEMPLATE_ID.to_string()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(problems: &mut Vec<&'static str>, value: &str, message: &'static str) {
    if is_blank(value) {
        problems.push(message);
    }
}

fn finish(problems: Vec<&'static str>) -> Result<(), AppError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
