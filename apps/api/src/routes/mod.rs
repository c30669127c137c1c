pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::job_descriptions::handlers as job_descriptions;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/resumes/:id/experiences",
            post(resumes::handle_add_experience),
        )
        .route(
            "/api/resumes/:id/experiences/:entry_id",
            put(resumes::handle_update_experience).delete(resumes::handle_remove_experience),
        )
        .route(
            "/api/resumes/:id/education",
            post(resumes::handle_add_education),
        )
        .route(
            "/api/resumes/:id/education/:entry_id",
            put(resumes::handle_update_education).delete(resumes::handle_remove_education),
        )
        .route(
            "/api/resumes/:id/basic-info",
            put(resumes::handle_update_basic_info),
        )
        .route("/api/resumes/:id/skills", put(resumes::handle_update_skills))
        .route(
            "/api/resumes/:id/summary",
            put(resumes::handle_update_summary),
        )
        // Analysis API
        .route(
            "/api/resumes/:id/analysis",
            post(analysis::handle_analyze_resume),
        )
        .route(
            "/api/analyze-job-description",
            post(analysis::handle_analyze_job_description),
        )
        // Job description API
        .route(
            "/api/job-descriptions",
            get(job_descriptions::handle_list_job_descriptions)
                .post(job_descriptions::handle_create_job_description),
        )
        .route(
            "/api/job-descriptions/:id",
            get(job_descriptions::handle_get_job_description),
        )
        // Documents
        .route(
            "/api/extract-pdf",
            post(documents::handle_extract_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::lexicon::Lexicon;
    use crate::config::Config;
    use crate::store::MemStore;

    fn app() -> Router {
        app_with(Config::default())
    }

    fn app_with(config: Config) -> Router {
        build_router(AppState {
            store: Arc::new(MemStore::new()),
            lexicon: Arc::new(Lexicon::default()),
            config,
        })
    }

    const BOUNDARY: &str = "XBOUNDARYX";

    /// Single-field multipart request to `/api/extract-pdf`.
    fn upload(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut payload = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        payload.extend_from_slice(data);
        payload.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/extract-pdf")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn resume_body() -> Value {
        json!({
            "userId": 1,
            "title": "Frontend resume",
            "basicInfo": {
                "name": "Grace Hopper",
                "title": "Frontend Engineer",
                "email": "grace@example.com",
                "phone": "555-0199",
                "location": "Arlington"
            },
            "skills": ["React", "AWS"]
        })
    }

    fn experience_body() -> Value {
        json!({
            "companyName": "Navy Labs",
            "jobTitle": "Engineer",
            "startDate": "2019-04",
            "description": "Built React dashboards on AWS, increasing conversion 20%",
            "keySkills": ["React"]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_job_description_returns_keywords() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/analyze-job-description",
            Some(json!({ "content": "We need React and Docker. React experience preferred." })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let keywords: Vec<String> = serde_json::from_value(body["keywords"].clone()).unwrap();
        assert!(keywords.contains(&"react".to_string()));
        assert!(keywords.contains(&"docker".to_string()));
    }

    #[tokio::test]
    async fn test_analyze_job_description_rejects_bad_content() {
        let app = app();
        for body in [json!({}), json!({ "content": 42 }), json!({ "content": "" })] {
            let (status, resp) =
                send(&app, Method::POST, "/api/analyze-job-description", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp["message"], "Job description content is required");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_with_message() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/analyze-job-description")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_resume_crud_flow() {
        let app = app();

        let (status, created) = send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["templateId"], "professional");

        let (status, fetched) = send(&app, Method::GET, "/api/resumes/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Frontend resume");

        let (status, listed) = send(&app, Method::GET, "/api/resumes?userId=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/resumes/1",
            Some(json!({ "title": "Renamed", "isPublic": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Renamed");
        assert_eq!(updated["isPublic"], true);
        assert_eq!(updated["basicInfo"]["name"], "Grace Hopper");

        let (status, _) = send(&app, Method::DELETE, "/api/resumes/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, "/api/resumes/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resume not found");
    }

    #[tokio::test]
    async fn test_bad_ids_are_400() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/resumes/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid resume ID");

        let (status, body) = send(&app, Method::GET, "/api/resumes", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid userId");

        let (status, body) = send(&app, Method::GET, "/api/job-descriptions/x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid job description ID");
    }

    #[tokio::test]
    async fn test_create_resume_requires_title() {
        let mut body = resume_body();
        body["title"] = json!("");
        let (status, resp) = send(&app(), Method::POST, "/api/resumes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["message"], "Title is required");
    }

    #[tokio::test]
    async fn test_experience_routes() {
        let app = app();
        send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;

        let (status, resume) = send(
            &app,
            Method::POST,
            "/api/resumes/1/experiences",
            Some(experience_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let exp_id = resume["experiences"][0]["id"].as_str().unwrap().to_string();

        let mut changed = experience_body();
        changed["companyName"] = json!("Univac");
        let (status, resume) = send(
            &app,
            Method::PUT,
            &format!("/api/resumes/1/experiences/{exp_id}"),
            Some(changed.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resume["experiences"][0]["companyName"], "Univac");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/experiences/unknown",
            Some(changed),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resume or experience not found");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/resumes/1/experiences",
            Some(json!({ "companyName": "", "jobTitle": "", "startDate": "", "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("Company name is required"));

        let (status, resume) = send(
            &app,
            Method::DELETE,
            &format!("/api/resumes/1/experiences/{exp_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resume["experiences"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_education_routes() {
        let app = app();
        send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;

        let education = json!({
            "institution": "Yale",
            "degree": "PhD",
            "fieldOfStudy": "Mathematics",
            "startDate": "1930",
            "endDate": "1934"
        });
        let (status, resume) = send(
            &app,
            Method::POST,
            "/api/resumes/1/education",
            Some(education),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let edu_id = resume["education"][0]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/resumes/1/education/{edu_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/resumes/1/education/{edu_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resume or education not found");
    }

    #[tokio::test]
    async fn test_section_updates() {
        let app = app();
        send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;

        let (status, resume) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/skills",
            Some(json!({ "skills": ["Rust", "Go"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resume["skills"], json!(["Rust", "Go"]));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/skills",
            Some(json!({ "skills": "Rust" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Skills must be an array");

        let (status, resume) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/summary",
            Some(json!({ "summary": "Compiler pioneer." })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resume["summary"], "Compiler pioneer.");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/summary",
            Some(json!({ "summary": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Summary must be a string");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/resumes/1/basic-info",
            Some(json!({
                "name": "Grace", "title": "Admiral", "email": "nope",
                "phone": "1", "location": "DC"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email address");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/resumes/9/summary",
            Some(json!({ "summary": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resume not found");
    }

    #[tokio::test]
    async fn test_job_description_routes() {
        let app = app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/job-descriptions",
            Some(json!({ "userId": 4, "content": "Kubernetes and AWS. Kubernetes daily." })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        let keywords: Vec<String> =
            serde_json::from_value(created["analyzedKeywords"].clone()).unwrap();
        assert!(keywords.contains(&"kubernetes".to_string()));
        assert!(keywords.contains(&"aws".to_string()));

        let (status, listed) = send(&app, Method::GET, "/api/job-descriptions?userId=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/job-descriptions/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Job description not found");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/job-descriptions",
            Some(json!({ "content": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_analysis_with_inline_keywords() {
        let app = app();
        send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;
        send(
            &app,
            Method::POST,
            "/api/resumes/1/experiences",
            Some(experience_body()),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/resumes/1/analysis",
            Some(json!({ "keywords": ["react", "aws", "docker"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["match"]["matchedKeywords"], json!(["react", "aws"]));
        assert_eq!(body["match"]["missedKeywords"], json!(["docker"]));
        assert_eq!(body["match"]["score"], 67);
        // 50 + 10 + 5 + round(20 * 2/3)
        assert_eq!(body["atsScore"], 78);
        let suggestions = body["suggestions"].as_array().unwrap();
        assert!(suggestions
            .iter()
            .any(|s| s.as_str().unwrap().contains("docker")));
    }

    #[tokio::test]
    async fn test_resume_analysis_from_stored_job_description() {
        let app = app();
        send(&app, Method::POST, "/api/resumes", Some(resume_body())).await;
        send(
            &app,
            Method::POST,
            "/api/job-descriptions",
            Some(json!({ "content": "React developer" })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/resumes/1/analysis",
            Some(json!({ "jobDescriptionId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("react")));
        // No experience entries: score is forced to zero.
        assert_eq!(body["atsScore"], 0);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/resumes/1/analysis",
            Some(json!({ "jobDescriptionId": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_extract_pdf_without_file_field() {
        let response = app()
            .oneshot(upload("note", "note.txt", b"hello"))
            .await
            .unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No PDF file uploaded");
    }

    #[tokio::test]
    async fn test_extract_pdf_returns_text_and_info() {
        let pdf = crate::documents::handlers::tests::sample_pdf("Hello Resume World");
        let response = app()
            .oneshot(upload("pdf", "resume.pdf", &pdf))
            .await
            .unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);

        let text = body["text"].as_str().unwrap();
        assert!(text.contains("Hello Resume World"), "got {text:?}");
        assert_eq!(body["info"]["filename"], "resume.pdf");
        assert_eq!(body["info"]["sizeBytes"], pdf.len());
        assert_eq!(body["info"]["wordCount"], text.split_whitespace().count());
        assert!(body["info"]["wordCount"].as_u64().unwrap() >= 3);
    }

    #[tokio::test]
    async fn test_extract_pdf_over_upload_limit_is_413() {
        let app = app_with(Config {
            max_upload_bytes: 16,
            ..Config::default()
        });
        let pdf = crate::documents::handlers::tests::sample_pdf("Hello Resume World");
        let response = app.oneshot(upload("pdf", "resume.pdf", &pdf)).await.unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_extract_pdf_wrong_content_type_is_json_message() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/extract-pdf")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_bad_query_string_is_json_message() {
        let app = app();
        for uri in [
            "/api/resumes?userId=1&userId=2",
            "/api/job-descriptions?userId=1&userId=2",
        ] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["message"].is_string(), "{uri}: {body}");
        }
    }
}
