use anyhow::ensure;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Method,
};
use serde::{Deserialize, Serialize};

use entity::post::Post;

pub mod implementation;

static POSTS_PATH: &str = "/api/posts";
static DETAIL_PATH: &str = "/api/posts/detail";
static REACTION_PATH: &str = "/api/posts/reaction";
static ANONYMIZE_PATH: &str = "/api/posts/anonymize";

/// The backend surface the feed engine consumes. The engine is generic over
/// this trait so tests can script responses without a server.
pub trait PostsApi {
    fn get_posts(
        &self,
    ) -> impl std::future::Future<Output = anyhow::Result<GetPostsResponse>>
           + Send;
    fn get_post_detail(
        &self,
        post_id: i64,
    ) -> impl std::future::Future<Output = anyhow::Result<PostDetailResponse>>
           + Send;
    fn toggle_reaction(
        &self,
        post_id: i64,
    ) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
    fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<CreatePostResponse>>
           + Send;
    fn anonymize_post(
        &self,
        post_id: i64,
    ) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Deserialize)]
pub struct GetPostsResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: Post,
    #[serde(default)]
    pub is_reacted: bool,
    #[serde(default)]
    pub posts_at_location: Vec<Post>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdRequest {
    pub post_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub text: String,
    pub genre: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post_id: i64,
}

impl From<PostIdRequest> for Body {
    fn from(val: PostIdRequest) -> Self {
        let body = serde_json::to_string(&val).unwrap();
        Body::from(body)
    }
}

impl From<CreatePostRequest> for Body {
    fn from(val: CreatePostRequest) -> Self {
        let body = serde_json::to_string(&val).unwrap();
        Body::from(body)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    client: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_str("*/*")?);
        headers.insert(
            "Content-Type",
            HeaderValue::from_str("application/json")?,
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_response(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }

    async fn send_response<R: Into<Body>>(
        &self,
        method: Method,
        path: &str,
        request: R,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .body(request)
            .send()
            .await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}
