//! Typed endpoints of the literature backend.
//!
//! Every call goes through [`ApiClient`], so the content-type and
//! string-body interceptors apply. The `{code, msg, data}` envelope is
//! unwrapped here.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::core::error::ApiError;
use crate::core::http::{ApiClient, BrowserTransport, HttpRequest, Transport};
use crate::models::{
    ApiEnvelope, ArticleInfo, ArticleSummary, CustomConcept, PageInfo, ProcessingStatus,
};

/// Backend endpoints on top of a shared [`ApiClient`].
#[derive(Clone)]
pub struct Api<T = BrowserTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> Api<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Service banner (`GET /`).
    pub async fn hello(&self) -> Result<String, ApiError> {
        self.data(HttpRequest::get("/")).await
    }

    /// Page `page_num` (1-based) of the articles matching `filter`.
    pub async fn search_articles(
        &self,
        filter: &ArticleInfo,
        page_num: u32,
        page_size: u32,
    ) -> Result<PageInfo<ArticleInfo>, ApiError> {
        let request = HttpRequest::post("/article/search")
            .query("pageNum", page_num.max(1).to_string())
            .query("pageSize", page_size.to_string())
            .json(filter)?;
        self.data(request).await
    }

    /// Summaries generated for the article titled `title`.
    pub async fn article_summaries(&self, title: &str) -> Result<Vec<ArticleSummary>, ApiError> {
        let request = HttpRequest::post("/article/summary").segment(title);
        Ok(self.call(request).await?.unwrap_or_default())
    }

    /// Stored file locations of an article, keyed by field name.
    pub async fn file_paths(&self, title: &str) -> Result<BTreeMap<String, String>, ApiError> {
        let request = HttpRequest::get("/article/file-paths").segment(title);
        Ok(self.call(request).await?.unwrap_or_default())
    }

    /// Progress of an upload task.
    pub async fn processing_status(&self, task_id: &str) -> Result<ProcessingStatus, ApiError> {
        self.data(HttpRequest::get("/article/processing-status").segment(task_id))
            .await
    }

    /// Accept an extracted paper, storing `article` as its reviewed metadata.
    ///
    /// Only tasks in [`TaskStatus::PendingApproval`](crate::models::TaskStatus)
    /// are accepted by the backend.
    pub async fn approve_task(
        &self,
        task_id: &str,
        article: &ArticleInfo,
    ) -> Result<String, ApiError> {
        let request = HttpRequest::post("/article/approve")
            .segment(task_id)
            .json(article)?;
        self.data(request).await
    }

    /// Reject an extracted paper and discard its upload.
    pub async fn reject_task(&self, task_id: &str) -> Result<String, ApiError> {
        self.data(HttpRequest::post("/article/reject").segment(task_id))
            .await
    }

    /// Rebuild the knowledge graph from the stored articles.
    pub async fn rebuild_graph(&self) -> Result<String, ApiError> {
        self.data(HttpRequest::post("/article/rebuild")).await
    }

    pub async fn custom_concepts(&self) -> Result<Vec<CustomConcept>, ApiError> {
        Ok(self
            .call(HttpRequest::get("/custom-concepts/list"))
            .await?
            .unwrap_or_default())
    }

    /// Concept combination in slot `display_order`, if one is saved.
    pub async fn custom_concept(&self, display_order: u8) -> Result<Option<CustomConcept>, ApiError> {
        self.call(HttpRequest::get("/custom-concepts").segment(&display_order.to_string()))
            .await
    }

    /// Create or replace a concept combination.
    pub async fn save_custom_concept(&self, concept: &CustomConcept) -> Result<String, ApiError> {
        concept.validate()?;
        self.data(HttpRequest::post("/custom-concepts/save").json(concept)?)
            .await
    }

    pub async fn delete_custom_concept(&self, display_order: u8) -> Result<String, ApiError> {
        self.data(HttpRequest::delete("/custom-concepts").segment(&display_order.to_string()))
            .await
    }

    async fn call<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<Option<R>, ApiError> {
        let envelope: ApiEnvelope<R> = self.client.send_typed(request).await?;
        envelope.into_result()
    }

    async fn data<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        self.call(request).await?.ok_or(ApiError::MissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use serde_json::{Value, json};

    use crate::config::{ClientConfig, SEARCH_PAGE_SIZE};
    use crate::core::error::HttpError;
    use crate::core::http::{HttpResponse, Method, PreparedRequest};
    use crate::models::TaskStatus;

    struct Backend {
        body: Value,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl Backend {
        fn new(body: Value) -> Self {
            Self {
                body,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> PreparedRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for &Backend {
        async fn send(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    fn api(backend: &Backend) -> Api<&Backend> {
        let config = ClientConfig {
            base_url: "http://localhost:9090".to_string(),
            timeout: Duration::from_secs(30),
            headers: Vec::new(),
        };
        Api::new(ApiClient::with_defaults(config, backend))
    }

    #[tokio::test]
    async fn test_processing_status() {
        let backend = Backend::new(json!({
            "code": "200",
            "msg": "成功",
            "data": {"taskId": "t-1", "status": "ANALYZING", "progress": 60}
        }));
        let status = api(&backend).processing_status("t-1").await.unwrap();
        assert_eq!(status.status, TaskStatus::Analyzing);
        assert_eq!(status.progress, 60);

        let sent = backend.last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "http://localhost:9090/article/processing-status/t-1");
    }

    #[tokio::test]
    async fn test_string_encoded_envelope() {
        let backend = Backend::new(Value::String(
            r#"{"code":"200","msg":"成功","data":"Literature Manager API"}"#.to_string(),
        ));
        assert_eq!(api(&backend).hello().await.unwrap(), "Literature Manager API");
    }

    #[tokio::test]
    async fn test_rejected_envelope() {
        let backend = Backend::new(json!({"code": "404", "msg": "任务不存在", "data": null}));
        assert_eq!(
            api(&backend).processing_status("missing").await,
            Err(ApiError::Rejected {
                code: "404".to_string(),
                msg: "任务不存在".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_missing_data() {
        let backend = Backend::new(json!({"code": "200", "msg": "成功", "data": null}));
        assert_eq!(api(&backend).rebuild_graph().await, Err(ApiError::MissingData));
        assert_eq!(api(&backend).custom_concept(2).await, Ok(None));
        assert_eq!(api(&backend).custom_concepts().await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_title_is_encoded_in_path() {
        let backend = Backend::new(json!({"code": "200", "data": []}));
        let summaries = api(&backend)
            .article_summaries("Graph Neural Nets / Survey")
            .await
            .unwrap();
        assert!(summaries.is_empty());
        assert_eq!(
            backend.last().url,
            "http://localhost:9090/article/summary/Graph%20Neural%20Nets%20%2F%20Survey"
        );
        assert_eq!(backend.last().method, Method::Post);
    }

    #[tokio::test]
    async fn test_save_custom_concept_validates_first() {
        let backend = Backend::new(json!({"code": "200", "data": "保存成功"}));
        let api = api(&backend);

        let invalid = CustomConcept {
            relationship_name: "method".to_string(),
            concepts: "RCT".to_string(),
            display_order: 9,
            ..Default::default()
        };
        assert!(matches!(
            api.save_custom_concept(&invalid).await,
            Err(ApiError::Invalid(_))
        ));
        assert!(backend.seen.lock().unwrap().is_empty());

        let valid = CustomConcept {
            display_order: 1,
            ..invalid
        };
        assert_eq!(api.save_custom_concept(&valid).await.unwrap(), "保存成功");
        let sent = backend.last();
        assert_eq!(sent.url, "http://localhost:9090/custom-concepts/save");
        assert_eq!(
            sent.body.as_deref(),
            Some(r#"{"relationshipName":"method","concepts":"RCT","displayOrder":1}"#)
        );
    }

    #[tokio::test]
    async fn test_search_articles_sends_filter_and_paging() {
        let backend = Backend::new(json!({
            "code": "200",
            "msg": "成功",
            "data": {
                "pageNum": 1,
                "pageSize": 10,
                "total": 1,
                "pages": 1,
                "list": [{"id": 4, "title": "知识图谱综述"}]
            }
        }));
        let page = api(&backend)
            .search_articles(&ArticleInfo::titled("知识图谱"), 1, SEARCH_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].title.as_deref(), Some("知识图谱综述"));

        let sent = backend.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.url,
            "http://localhost:9090/article/search?pageNum=1&pageSize=10"
        );
        assert_eq!(sent.body.as_deref(), Some(r#"{"title":"知识图谱"}"#));
    }

    #[tokio::test]
    async fn test_search_page_numbers_start_at_one() {
        let backend = Backend::new(json!({"code": "200", "data": {"list": []}}));
        let page = api(&backend)
            .search_articles(&ArticleInfo::default(), 0, 5)
            .await
            .unwrap();
        assert!(page.list.is_empty());
        assert_eq!(
            backend.last().url,
            "http://localhost:9090/article/search?pageNum=1&pageSize=5"
        );
        assert_eq!(backend.last().body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_approve_task_posts_reviewed_article() {
        let backend = Backend::new(json!({"code": "200", "msg": "成功", "data": "保存成功"}));
        let article = ArticleInfo {
            title: Some("Graph Methods".to_string()),
            keyword: Some("graph".to_string()),
            ..Default::default()
        };
        assert_eq!(
            api(&backend).approve_task("t-1", &article).await.unwrap(),
            "保存成功"
        );

        let sent = backend.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "http://localhost:9090/article/approve/t-1");
        assert_eq!(
            sent.body.as_deref(),
            Some(r#"{"title":"Graph Methods","keyword":"graph"}"#)
        );
    }

    #[tokio::test]
    async fn test_approve_task_in_wrong_state_is_rejected() {
        let backend = Backend::new(json!({"code": "400", "msg": "任务状态不正确", "data": null}));
        assert_eq!(
            api(&backend).approve_task("t-1", &ArticleInfo::default()).await,
            Err(ApiError::Rejected {
                code: "400".to_string(),
                msg: "任务状态不正确".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_delete_custom_concept() {
        let backend = Backend::new(json!({"code": "200", "data": "删除成功"}));
        api(&backend).delete_custom_concept(3).await.unwrap();
        let sent = backend.last();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "http://localhost:9090/custom-concepts/3");
    }
}
