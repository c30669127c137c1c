use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::job_description::{JobDescription, NewJobDescription};
use crate::models::resume::{BasicInfo, Education, Experience, NewResume, Resume, ResumePatch};
use crate::store::ResumeStore;

/// Process-local store. Records live in id-ordered maps behind one RwLock;
/// ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    resumes: BTreeMap<u64, Resume>,
    job_descriptions: BTreeMap<u64, JobDescription>,
    next_resume_id: u64,
    next_job_description_id: u64,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                resumes: BTreeMap::new(),
                job_descriptions: BTreeMap::new(),
                next_resume_id: 1,
                next_job_description_id: 1,
            }),
        }
    }

    /// Applies `edit` to a resume under the write lock. `edit` returns false
    /// when the nested entry it targets is missing; the resume is then left
    /// untouched and `None` is returned.
    async fn modify_resume<F>(&self, id: u64, edit: F) -> Option<Resume>
    where
        F: FnOnce(&mut Resume) -> bool + Send,
    {
        let mut inner = self.inner.write().await;
        let resume = inner.resumes.get_mut(&id)?;
        let mut updated = resume.clone();
        if !edit(&mut updated) {
            return None;
        }
        updated.updated_at = Utc::now();
        *resume = updated.clone();
        Some(updated)
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResumeStore for MemStore {
    async fn get_resume(&self, id: u64) -> Result<Option<Resume>, AppError> {
        Ok(self.inner.read().await.resumes.get(&id).cloned())
    }

    async fn list_resumes(&self, user_id: u64) -> Result<Vec<Resume>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .resumes
            .values()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_resume(&self, new: NewResume) -> Result<Resume, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_resume_id;
        inner.next_resume_id += 1;

        let now = Utc::now();
        let mut resume = Resume {
            id,
            user_id: new.user_id,
            title: new.title,
            created_at: now,
            updated_at: now,
            is_public: new.is_public,
            template_id: new.template_id,
            basic_info: new.basic_info,
            experiences: new.experiences,
            education: new.education,
            skills: new.skills,
            summary: new.summary,
        };
        resume.experiences.iter_mut().for_each(Experience::ensure_id);
        resume.education.iter_mut().for_each(Education::ensure_id);

        inner.resumes.insert(id, resume.clone());
        info!(resume_id = id, "Resume created");
        Ok(resume)
    }

    async fn update_resume(&self, id: u64, patch: ResumePatch) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(id, |resume| {
                patch.apply(resume);
                true
            })
            .await)
    }

    async fn delete_resume(&self, id: u64) -> Result<bool, AppError> {
        let removed = self.inner.write().await.resumes.remove(&id).is_some();
        if removed {
            info!(resume_id = id, "Resume deleted");
        }
        Ok(removed)
    }

    async fn add_experience(
        &self,
        resume_id: u64,
        mut experience: Experience,
    ) -> Result<Option<Resume>, AppError> {
        experience.ensure_id();
        Ok(self
            .modify_resume(resume_id, |resume| {
                resume.experiences.push(experience);
                true
            })
            .await)
    }

    async fn update_experience(
        &self,
        resume_id: u64,
        experience_id: &str,
        mut experience: Experience,
    ) -> Result<Option<Resume>, AppError> {
        experience.id = experience_id.to_string();
        Ok(self
            .modify_resume(resume_id, |resume| {
                match resume.experiences.iter_mut().find(|e| e.id == experience_id) {
                    Some(slot) => {
                        *slot = experience;
                        true
                    }
                    None => false,
                }
            })
            .await)
    }

    async fn remove_experience(
        &self,
        resume_id: u64,
        experience_id: &str,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(resume_id, |resume| {
                let before = resume.experiences.len();
                resume.experiences.retain(|e| e.id != experience_id);
                resume.experiences.len() != before
            })
            .await)
    }

    async fn add_education(
        &self,
        resume_id: u64,
        mut education: Education,
    ) -> Result<Option<Resume>, AppError> {
        education.ensure_id();
        Ok(self
            .modify_resume(resume_id, |resume| {
                resume.education.push(education);
                true
            })
            .await)
    }

    async fn update_education(
        &self,
        resume_id: u64,
        education_id: &str,
        mut education: Education,
    ) -> Result<Option<Resume>, AppError> {
        education.id = education_id.to_string();
        Ok(self
            .modify_resume(resume_id, |resume| {
                match resume.education.iter_mut().find(|e| e.id == education_id) {
                    Some(slot) => {
                        *slot = education;
                        true
                    }
                    None => false,
                }
            })
            .await)
    }

    async fn remove_education(
        &self,
        resume_id: u64,
        education_id: &str,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(resume_id, |resume| {
                let before = resume.education.len();
                resume.education.retain(|e| e.id != education_id);
                resume.education.len() != before
            })
            .await)
    }

    async fn update_skills(
        &self,
        resume_id: u64,
        skills: Vec<String>,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(resume_id, |resume| {
                resume.skills = skills;
                true
            })
            .await)
    }

    async fn update_basic_info(
        &self,
        resume_id: u64,
        basic_info: BasicInfo,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(resume_id, |resume| {
                resume.basic_info = basic_info;
                true
            })
            .await)
    }

    async fn update_summary(
        &self,
        resume_id: u64,
        summary: String,
    ) -> Result<Option<Resume>, AppError> {
        Ok(self
            .modify_resume(resume_id, |resume| {
                resume.summary = Some(summary);
                true
            })
            .await)
    }

    async fn create_job_description(
        &self,
        new: NewJobDescription,
        analyzed_keywords: Vec<String>,
    ) -> Result<JobDescription, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_job_description_id;
        inner.next_job_description_id += 1;

        let job_description = JobDescription {
            id,
            user_id: new.user_id,
            content: new.content,
            analyzed_keywords,
            created_at: Utc::now(),
        };
        inner.job_descriptions.insert(id, job_description.clone());
        info!(
            job_description_id = id,
            keywords = job_description.analyzed_keywords.len(),
            "Job description stored"
        );
        Ok(job_description)
    }

    async fn get_job_description(&self, id: u64) -> Result<Option<JobDescription>, AppError> {
        Ok(self.inner.read().await.job_descriptions.get(&id).cloned())
    }

    async fn list_job_descriptions(&self, user_id: u64) -> Result<Vec<JobDescription>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .job_descriptions
            .values()
            .filter(|jd| jd.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}
