//! Resume and job description storage.
//!
//! Handlers only see `Arc<dyn ResumeStore>` from `AppState`; the in-memory
//! backend is the one wired up at startup.

pub mod memory;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::job_description::{JobDescription, NewJobDescription};
use crate::models::resume::{BasicInfo, Education, Experience, NewResume, Resume, ResumePatch};

pub use memory::MemStore;

/// Storage operations. Every mutation returns the updated resume, or `None`
/// when the resume (or the nested entry being edited) does not exist.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get_resume(&self, id: u64) -> Result<Option<Resume>, AppError>;
    async fn list_resumes(&self, user_id: u64) -> Result<Vec<Resume>, AppError>;
    async fn create_resume(&self, new: NewResume) -> Result<Resume, AppError>;
    async fn update_resume(&self, id: u64, patch: ResumePatch) -> Result<Option<Resume>, AppError>;
    async fn delete_resume(&self, id: u64) -> Result<bool, AppError>;

    async fn add_experience(
        &self,
        resume_id: u64,
        experience: Experience,
    ) -> Result<Option<Resume>, AppError>;
    async fn update_experience(
        &self,
        resume_id: u64,
        experience_id: &str,
        experience: Experience,
    ) -> Result<Option<Resume>, AppError>;
    async fn remove_experience(
        &self,
        resume_id: u64,
        experience_id: &str,
    ) -> Result<Option<Resume>, AppError>;

    async fn add_education(
        &self,
        resume_id: u64,
        education: Education,
    ) -> Result<Option<Resume>, AppError>;
    async fn update_education(
        &self,
        resume_id: u64,
        education_id: &str,
        education: Education,
    ) -> Result<Option<Resume>, AppError>;
    async fn remove_education(
        &self,
        resume_id: u64,
        education_id: &str,
    ) -> Result<Option<Resume>, AppError>;

    async fn update_skills(
        &self,
        resume_id: u64,
        skills: Vec<String>,
    ) -> Result<Option<Resume>, AppError>;
    async fn update_basic_info(
        &self,
        resume_id: u64,
        basic_info: BasicInfo,
    ) -> Result<Option<Resume>, AppError>;
    async fn update_summary(
        &self,
        resume_id: u64,
        summary: String,
    ) -> Result<Option<Resume>, AppError>;

    /// Stores a job description with its already-extracted keywords.
    async fn create_job_description(
        &self,
        new: NewJobDescription,
        analyzed_keywords: Vec<String>,
    ) -> Result<JobDescription, AppError>;
    async fn get_job_description(&self, id: u64) -> Result<Option<JobDescription>, AppError>;
    async fn list_job_descriptions(&self, user_id: u64) -> Result<Vec<JobDescription>, AppError>;
}
