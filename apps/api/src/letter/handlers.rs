//! POST /generate-cover-letter — the full request pipeline.
//!
//! Sections, skills, bullets, render, compile, serve. Everything inside one
//! request runs sequentially; the per-request scratch directory is dropped
//! on every exit path, so nothing leaks on failure.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::letter::bullets::generate_bullets;
use crate::letter::sections::extract_sections;
use crate::letter::skills::extract_skills;
use crate::letter::template::{render_cover_letter, sanitize_filename_part, LetterFields};
use crate::state::AppState;

/// Parsed multipart form for a generation request.
struct GenerateForm {
    resume_filename: String,
    resume_bytes: Vec<u8>,
    job_description: String,
    fields: LetterFields,
}

/// POST /generate-cover-letter
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_form(multipart).await?;

    if !form.resume_filename.ends_with(".tex") {
        return Err(AppError::Validation("Resume must be a .tex file".to_string()));
    }

    // Scratch directory unique to this request; removed on drop.
    let scratch = tempfile::TempDir::new_in(&state.config.temp_root)
        .context("Failed to create request temp directory")?;

    let resume_path = scratch.path().join(&form.resume_filename);
    tokio::fs::write(&resume_path, &form.resume_bytes)
        .await
        .context("Failed to save uploaded resume")?;
    let resume_source = tokio::fs::read_to_string(&resume_path)
        .await
        .context("Resume file is not valid UTF-8")?;

    let resume_content = extract_sections(&resume_source);

    let extraction = extract_skills(&state.llm, &resume_content, &form.job_description).await;
    info!(
        "Extracted {} skills (source: {:?})",
        extraction.skills.len(),
        extraction.source
    );

    let generation = generate_bullets(
        &state.llm,
        &resume_content,
        &extraction.skills,
        &form.job_description,
    )
    .await;
    info!(
        "Generated {} bullets (source: {:?})",
        generation.bullets.len(),
        generation.source
    );

    let latex = render_cover_letter(&form.fields, &extraction.skills, &generation.bullets);

    let pdf_path = state
        .compiler
        .compile(&latex, scratch.path(), &form.fields.company, &form.fields.role)
        .await?;

    // Copy out of the scratch dir under a randomized name, then buffer the
    // body; the served copy is deleted by the cleanup worker afterwards.
    let serving_id = Uuid::new_v4().simple().to_string();
    let serving_path = state
        .config
        .temp_root
        .join(format!("cover_letter_{}.pdf", &serving_id[..8]));
    tokio::fs::copy(&pdf_path, &serving_path)
        .await
        .context("Failed to stage compiled PDF for serving")?;
    let pdf_bytes = tokio::fs::read(&serving_path)
        .await
        .context("Failed to read compiled PDF")?;
    state.cleanup.schedule(serving_path);

    let download_name = format!(
        "Cover_Letter_{}_{}.pdf",
        sanitize_filename_part(&form.fields.company),
        sanitize_filename_part(&form.fields.role)
    );
    info!("Serving cover letter as {download_name}");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        ),
    ];
    Ok((headers, pdf_bytes).into_response())
}

/// Drains the multipart stream into a validated form.
async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut resume_filename = None;
    let mut resume_bytes = None;
    let mut job_description = None;
    let mut your_email = None;
    let mut your_phone = None;
    let mut company = None;
    let mut role = None;
    let mut source = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart form: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "resume" {
            resume_filename = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
            resume_bytes = Some(bytes.to_vec());
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid form field '{name}': {e}")))?;
        match name.as_str() {
            "job_description" => job_description = Some(value),
            "your_email" => your_email = Some(value),
            "your_phone" => your_phone = Some(value),
            "company" => company = Some(value),
            "role" => role = Some(value),
            "source" => source = Some(value),
            _ => {}
        }
    }

    Ok(GenerateForm {
        resume_filename: require(resume_filename, "resume filename")?,
        resume_bytes: require(resume_bytes, "resume")?,
        job_description: require(job_description, "job_description")?,
        fields: LetterFields {
            your_email: require(your_email, "your_email")?,
            your_phone: require(your_phone, "your_phone")?,
            company: require(company, "company")?,
            role: require(role, "role")?,
            source: require(source, "source")?,
        },
    })
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing required field '{name}'")))
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::cleanup::CleanupQueue;
    use crate::config::Config;
    use crate::letter::compiler::TexCompiler;
    use crate::llm_client::LlmClient;
    use crate::routes::build_router;
    use crate::state::AppState;

    const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

    const RESUME_TEX: &str = r"\begin{rSection}{EMPLOYMENT HISTORY}
\textbf{Engineer} Built data pipelines in Python.
\end{rSection}";

    /// Stand-in for pdflatex: derives the expected PDF name from the tex
    /// file it was handed and writes a marker body there.
    fn fake_compiler(dir: &Path) -> PathBuf {
        let path = dir.join("fake_pdflatex.sh");
        std::fs::write(
            &path,
            "#!/bin/sh\nprintf '%%PDF-fake' > \"$3/$(basename \"$4\" .tex).pdf\"\n",
        )
        .unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn test_app(temp_root: &Path, compiler: TexCompiler) -> Router {
        build_router(AppState {
            llm: LlmClient::new(None),
            config: Config {
                openai_api_key: None,
                port: 0,
                temp_root: temp_root.to_path_buf(),
                frontend_index: temp_root.join("no-such-index.html"),
                rust_log: "info".to_string(),
            },
            compiler,
            cleanup: CleanupQueue::start(),
        })
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(filename: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
        )
    }

    fn form_body(filename: &str, skip_field: Option<&str>) -> String {
        let mut body = file_part(filename, RESUME_TEX);
        for (name, value) in [
            ("job_description", "We need Python and Kubernetes experience."),
            ("your_email", "a@b.com"),
            ("your_phone", "555-0100"),
            ("company", "Acme, Inc."),
            ("role", "Data Engineer"),
            ("source", "LinkedIn"),
        ] {
            if Some(name) != skip_field {
                body.push_str(&text_part(name, value));
            }
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    async fn post_generate(app: Router, body: String) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-cover-letter")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_tex_upload_is_rejected_with_400() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path(), TexCompiler::default());

        let response = post_generate(app, form_body("resume.pdf", None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "Resume must be a .tex file");

        // Rejected before any scratch dir was created.
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_with_400() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path(), TexCompiler::default());

        let response = post_generate(app, form_body("resume.tex", Some("company"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mock_mode_end_to_end_returns_pdf_download() {
        let tools = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let program = fake_compiler(tools.path());
        let compiler =
            TexCompiler::with_program(program.to_str().unwrap(), Duration::from_secs(5));
        let app = test_app(root.path(), compiler);

        let response = post_generate(app, form_body("resume.tex", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Cover_Letter_Acme_Inc_"), "{disposition}");
        assert!(disposition.contains("Data_Engineer"), "{disposition}");

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        assert_eq!(&body[..], b"%PDF-fake");

        // Scratch dir is gone; only the randomized serving copy remains
        // until the cleanup worker removes it.
        let entries: Vec<_> = std::fs::read_dir(root.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries.len(), 1, "leftover artifacts: {entries:?}");
        assert!(entries[0].starts_with("cover_letter_"));
        assert!(entries[0].ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_compiler_failure_is_surfaced_as_500() {
        let root = tempfile::tempdir().unwrap();
        let compiler = TexCompiler::with_program(
            "/nonexistent/definitely-not-pdflatex",
            Duration::from_secs(5),
        );
        let app = test_app(root.path(), compiler);

        let response = post_generate(app, form_body("resume.tex", None)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "COMPILE_ERROR");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("pdflatex not found"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_resume_is_surfaced_as_500() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path(), TexCompiler::default());

        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.tex\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        body.extend_from_slice(b"\r\n");
        for (name, value) in [
            ("job_description", "jd"),
            ("your_email", "a@b.com"),
            ("your_phone", "555"),
            ("company", "Acme"),
            ("role", "Eng"),
            ("source", "web"),
        ] {
            body.extend_from_slice(text_part(name, value).as_bytes());
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-cover-letter")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_index_without_frontend_is_404_with_fixed_body() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path(), TexCompiler::default());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"<h1>Frontend not found</h1>");
    }

    /// Full pipeline against a real TeX distribution.
    /// Run with `cargo test -- --ignored` on a machine with pdflatex installed.
    #[tokio::test]
    #[ignore]
    async fn test_mock_mode_end_to_end_with_real_pdflatex() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path(), TexCompiler::default());

        let response = post_generate(app, form_body("resume.tex", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024).await.unwrap();
        assert!(body.starts_with(b"%PDF"), "response is not a PDF");
    }
}
