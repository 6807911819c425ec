use anyhow::Context;
use reqwest::Method;

use super::{
    Client, CreatePostRequest, CreatePostResponse, GetPostsResponse,
    PostDetailResponse, PostIdRequest, PostsApi, ANONYMIZE_PATH, DETAIL_PATH,
    POSTS_PATH, REACTION_PATH,
};

impl PostsApi for Client {
    async fn get_posts(&self) -> anyhow::Result<GetPostsResponse> {
        let text = self.get_response(POSTS_PATH, &[]).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }

    async fn get_post_detail(
        &self,
        post_id: i64,
    ) -> anyhow::Result<PostDetailResponse> {
        let text = self
            .get_response(DETAIL_PATH, &[("postId", post_id.to_string())])
            .await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }

    async fn toggle_reaction(&self, post_id: i64) -> anyhow::Result<()> {
        self.send_response(
            Method::POST,
            REACTION_PATH,
            PostIdRequest { post_id },
        )
        .await?;

        Ok(())
    }

    async fn create_post(
        &self,
        request: CreatePostRequest,
    ) -> anyhow::Result<CreatePostResponse> {
        let text =
            self.send_response(Method::POST, POSTS_PATH, request).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }

    async fn anonymize_post(&self, post_id: i64) -> anyhow::Result<()> {
        self.send_response(
            Method::PUT,
            ANONYMIZE_PATH,
            PostIdRequest { post_id },
        )
        .await?;

        Ok(())
    }
}
