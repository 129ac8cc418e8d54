//! Locale listing and content bundle handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{UndersignError, content::ContentBundle, content::Locale};

use super::super::state::AppState;

/// One entry of the locale picker.
#[derive(Debug, Serialize)]
pub struct LocaleInfo {
    pub tag: &'static str,
    pub name: &'static str,
}

/// GET /api/locales - list the locales the content table provides.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<LocaleInfo>> {
    Json(
        state
            .content
            .locales()
            .into_iter()
            .map(|locale| LocaleInfo {
                tag: locale.tag(),
                name: locale.display_name(),
            })
            .collect(),
    )
}

/// GET /api/locales/:tag - all strings the form needs for one locale.
pub async fn bundle(
    State(state): State<Arc<AppState>>,
    Path(tag): Path<String>,
) -> Result<Json<ContentBundle>, (StatusCode, String)> {
    let locale: Locale = tag
        .parse()
        .map_err(|e: UndersignError| (StatusCode::NOT_FOUND, e.to_string()))?;

    state
        .content
        .bundle(locale)
        .map(Json)
        .map_err(|e| match e {
            UndersignError::UnknownLocale(_) => (StatusCode::NOT_FOUND, e.to_string()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use crate::compose::AssetPaths;
    use crate::server::{AppState, ServerConfig, router};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        let config = ServerConfig::new("127.0.0.1:0", AssetPaths::none());
        router(Arc::new(AppState::new(config).unwrap()))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_list_locales() {
        let (status, json) = get("/api/locales").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                { "tag": "en", "name": "English" },
                { "tag": "zh-TW", "name": "繁體中文" },
            ])
        );
    }

    #[tokio::test]
    async fn test_bundle_for_locale() {
        let (status, json) = get("/api/locales/zh-TW").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["locale"], "zh-TW");
        assert_eq!(json["submit_label"], "簽署並下載");
    }

    #[tokio::test]
    async fn test_bundle_for_unknown_locale() {
        let (status, _) = get("/api/locales/fr").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
