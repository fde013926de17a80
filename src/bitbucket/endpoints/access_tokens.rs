//! HTTP access tokens, served by the `access-tokens` API. Tokens belong either to a repository or
//! to a user; both flavours share the same shape.

use reqwest::Method;

use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::ACCESS_TOKENS_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::access_token::AccessToken;
use crate::bitbucket::json::page::PagedList;
use crate::error::StashError;

pub struct AccessTokensHandler<'c> {
    client: &'c Client,
}

impl<'c> AccessTokensHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        AccessTokensHandler { client }
    }

    pub async fn list_repository_tokens(
        &self, project_key: &str, repository_slug: &str,
    ) -> Result<(Vec<AccessToken>, Response), StashError> {
        self.list(&repository_path(project_key, repository_slug)).await
    }

    pub async fn get_repository_token(
        &self, project_key: &str, repository_slug: &str, token_id: &str,
    ) -> Result<(AccessToken, Response), StashError> {
        let path = format!("{}/{}", repository_path(project_key, repository_slug), token_id);
        self.client.get(ACCESS_TOKENS_API, &path).await
    }

    /// Creates a token; the answer is the only place its secret (`token`) is ever shown.
    pub async fn create_repository_token(
        &self, project_key: &str, repository_slug: &str, token: &AccessToken,
    ) -> Result<(AccessToken, Response), StashError> {
        self.client
            .send_json(Method::PUT, ACCESS_TOKENS_API, &repository_path(project_key, repository_slug), token)
            .await
    }

    pub async fn delete_repository_token(
        &self, project_key: &str, repository_slug: &str, token_id: &str,
    ) -> Result<Response, StashError> {
        let path = format!("{}/{}", repository_path(project_key, repository_slug), token_id);
        self.client.delete(ACCESS_TOKENS_API, &path).await
    }

    pub async fn list_user_tokens(&self, user_slug: &str) -> Result<(Vec<AccessToken>, Response), StashError> {
        self.list(&user_path(user_slug)).await
    }

    pub async fn get_user_token(
        &self, user_slug: &str, token_id: &str,
    ) -> Result<(AccessToken, Response), StashError> {
        let path = format!("{}/{}", user_path(user_slug), token_id);
        self.client.get(ACCESS_TOKENS_API, &path).await
    }

    pub async fn create_user_token(
        &self, user_slug: &str, token: &AccessToken,
    ) -> Result<(AccessToken, Response), StashError> {
        self.client.send_json(Method::PUT, ACCESS_TOKENS_API, &user_path(user_slug), token).await
    }

    pub async fn delete_user_token(&self, user_slug: &str, token_id: &str) -> Result<Response, StashError> {
        let path = format!("{}/{}", user_path(user_slug), token_id);
        self.client.delete(ACCESS_TOKENS_API, &path).await
    }

    async fn list(&self, path: &str) -> Result<(Vec<AccessToken>, Response), StashError> {
        let (list, response): (PagedList<AccessToken>, Response) = self.client.get(ACCESS_TOKENS_API, path).await?;
        Ok((list.values, response))
    }
}

fn user_path(user_slug: &str) -> String {
    format!("users/{}", user_slug)
}
