//! Signed document handler.

use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    UndersignError,
    content::Locale,
    input::{FormValues, SignatureBitmap},
};

use super::super::state::AppState;

/// Header carrying one advisory code per value.
pub const ADVISORY_HEADER: &str = "x-advisory";

/// Advisory code for a submission whose signature box was left empty.
pub const BLANK_SIGNATURE: &str = "blank-signature";

/// Raw multipart fields, before validation.
#[derive(Debug, Default)]
struct Submission {
    locale: Option<String>,
    name: String,
    organization: String,
    date: Option<String>,
    signature: Option<Vec<u8>>,
}

/// POST /api/documents - compose a signed agreement.
///
/// Multipart fields: `locale`, `name`, `organization`, `date` (YYYY-MM-DD,
/// defaults to today) and `signature` (PNG). Responds with the PNG as an
/// attachment; advisories ride along in `X-Advisory` headers.
pub async fn create(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let submission = read_submission(multipart).await?;

    let locale = match submission.locale.as_deref() {
        Some(tag) => tag
            .parse::<Locale>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => Locale::English,
    };
    let bundle = state.content.bundle(locale).map_err(|e| match e {
        UndersignError::UnknownLocale(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    let date = match submission.date.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid date '{}': {}", s, e)))?,
        _ => chrono::Local::now().date_naive(),
    };

    let form = FormValues::new(submission.name, submission.organization, date);
    if !form.is_complete() {
        return Err((StatusCode::BAD_REQUEST, bundle.incomplete_warning.clone()));
    }

    let signature_bytes = submission
        .signature
        .ok_or((StatusCode::BAD_REQUEST, "No signature field found".to_string()))?;

    // Decoding, the blank scan and composition are CPU-bound; keep them off
    // the async workers
    let task_state = state.clone();
    let (document, blank_signature) = tokio::task::spawn_blocking(move || {
        let signature = SignatureBitmap::from_encoded(&signature_bytes)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let blank = signature.is_blank();
        let document = task_state
            .composer
            .compose(&bundle, &form, &signature, &task_state.assets)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
        Ok::<_, (StatusCode, String)>((document, blank))
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Processing error: {}", e),
        )
    })??;

    tracing::info!(
        locale = %locale,
        filename = %document.filename,
        height = document.image.height(),
        blank_signature,
        "document composed"
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    let disposition = HeaderValue::from_str(&content_disposition(&document.filename))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    let codes = document
        .advisories
        .iter()
        .map(|a| a.code())
        .chain(blank_signature.then_some(BLANK_SIGNATURE));
    for code in codes {
        headers.append(ADVISORY_HEADER, HeaderValue::from_static(code));
    }

    Ok((StatusCode::OK, headers, document.png).into_response())
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, (StatusCode, String)> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        let bad_field = |e: MultipartError| {
            (StatusCode::BAD_REQUEST, format!("Failed to read {}: {}", name, e))
        };
        match name.as_str() {
            "locale" => submission.locale = Some(field.text().await.map_err(bad_field)?),
            "name" => submission.name = field.text().await.map_err(bad_field)?,
            "organization" => submission.organization = field.text().await.map_err(bad_field)?,
            "date" => submission.date = Some(field.text().await.map_err(bad_field)?),
            "signature" => {
                submission.signature = Some(field.bytes().await.map_err(bad_field)?.to_vec())
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8
/// name in `filename*` (RFC 6266).
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::AssetPaths;
    use crate::server::{ServerConfig, router};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tower::ServiceExt;

    const BOUNDARY: &str = "undersign-test-boundary";

    fn app() -> axum::Router {
        let config = ServerConfig::new("127.0.0.1:0", AssetPaths::none());
        router(Arc::new(AppState::new(config).unwrap()))
    }

    fn signature_png(drawn: bool) -> Vec<u8> {
        let mut image = RgbaImage::from_pixel(120, 40, Rgba([0, 0, 0, 0]));
        if drawn {
            for x in 10..110 {
                image.put_pixel(x, 20, Rgba([0, 0, 0, 255]));
            }
        }
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    fn multipart_body(fields: &[(&str, &str)], signature: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some(png) = signature {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"signature\"; filename=\"signature.png\"\r\nContent-Type: image/png\r\n\r\n",
                    BOUNDARY
                )
                .as_bytes(),
            );
            body.extend_from_slice(png);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn post(body: Vec<u8>) -> Response {
        app()
            .oneshot(
                Request::post("/api/documents")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn advisories(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(ADVISORY_HEADER)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_create_document() {
        let png = signature_png(true);
        let body = multipart_body(
            &[
                ("locale", "en"),
                ("name", "Jane Doe"),
                ("organization", "Acme"),
                ("date", "2024-01-15"),
            ],
            Some(&png),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("filename=\"Signed_Jane_Doe_2024-01-15.png\""));
        assert!(advisories(&response).is_empty());

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 800);
    }

    #[tokio::test]
    async fn test_incomplete_form_is_rejected_with_localized_message() {
        let png = signature_png(true);
        let body = multipart_body(
            &[("locale", "zh-TW"), ("name", "王小明"), ("organization", " ")],
            Some(&png),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            String::from_utf8(bytes.to_vec()).unwrap(),
            "簽名前請先填寫姓名及班級／單位。"
        );
    }

    #[tokio::test]
    async fn test_blank_signature_is_accepted_with_advisory() {
        let png = signature_png(false);
        let body = multipart_body(
            &[("name", "Jane Doe"), ("organization", "Acme"), ("date", "2024-01-15")],
            Some(&png),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(advisories(&response), vec![BLANK_SIGNATURE]);
    }

    #[tokio::test]
    async fn test_chinese_without_font_raises_font_advisory() {
        let png = signature_png(true);
        let body = multipart_body(
            &[
                ("locale", "zh-TW"),
                ("name", "王小明"),
                ("organization", "三年二班"),
                ("date", "2024-01-15"),
            ],
            Some(&png),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(advisories(&response), vec!["font-fallback"]);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains(
            "filename*=UTF-8''Signed_%E7%8E%8B%E5%B0%8F%E6%98%8E_2024-01-15.png"
        ));
    }

    #[tokio::test]
    async fn test_missing_signature_is_rejected() {
        let body = multipart_body(&[("name", "Jane Doe"), ("organization", "Acme")], None);
        assert_eq!(post(body).await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_undecodable_signature_is_rejected() {
        let body = multipart_body(
            &[("name", "Jane Doe"), ("organization", "Acme"), ("date", "2024-01-15")],
            Some(b"not a png".as_slice()),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("Invalid signature"));
    }

    #[tokio::test]
    async fn test_cjk_name_under_english_raises_font_advisory() {
        let png = signature_png(true);
        let body = multipart_body(
            &[
                ("locale", "en"),
                ("name", "王小明"),
                ("organization", "Acme"),
                ("date", "2024-01-15"),
            ],
            Some(&png),
        );
        let response = post(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(advisories(&response), vec!["font-fallback"]);
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected() {
        let png = signature_png(true);
        let body = multipart_body(
            &[("name", "Jane Doe"), ("organization", "Acme"), ("date", "15/01/2024")],
            Some(&png),
        );
        assert_eq!(post(body).await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_locale_is_rejected() {
        let png = signature_png(true);
        let body = multipart_body(
            &[("locale", "fr"), ("name", "Jane Doe"), ("organization", "Acme")],
            Some(&png),
        );
        assert_eq!(post(body).await.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("Signed_Jane_Doe_2024-01-15.png"),
            "attachment; filename=\"Signed_Jane_Doe_2024-01-15.png\"; \
             filename*=UTF-8''Signed_Jane_Doe_2024-01-15.png"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii_fallback() {
        let value = content_disposition("Signed_王_2024-01-15.png");
        assert!(value.starts_with("attachment; filename=\"Signed___2024-01-15.png\""));
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
