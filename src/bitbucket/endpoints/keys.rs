//! Repository SSH access keys, served by the `keys` API.
//!
//! The server nests every key as `{ "key": {...}, "permission": ... }`; this handler flattens
//! that envelope into [`SshKey`]s both ways.

use reqwest::Method;

use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::KEYS_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::page::{ListOptions, PagedList};
use crate::bitbucket::json::ssh_key::{SshKey, SshKeyEnvelope};
use crate::error::StashError;

pub struct KeysHandler<'c> {
    client: &'c Client,
}

impl<'c> KeysHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        KeysHandler { client }
    }

    pub async fn list_repository_keys(
        &self, project_key: &str, repository_slug: &str, opts: Option<&ListOptions>,
    ) -> Result<(Vec<SshKey>, Response), StashError> {
        let (list, response): (PagedList<SshKeyEnvelope>, Response) =
            self.client.get_paged(KEYS_API, &keys_path(project_key, repository_slug), opts).await?;

        Ok((list.values.into_iter().map(SshKey::from).collect(), response))
    }

    pub async fn get_repository_key(
        &self, project_key: &str, repository_slug: &str, key_id: u64,
    ) -> Result<(SshKey, Response), StashError> {
        let path = format!("{}/{}", keys_path(project_key, repository_slug), key_id);
        let (key, response): (SshKeyEnvelope, Response) = self.client.get(KEYS_API, &path).await?;

        Ok((key.into(), response))
    }

    /// Grants `key` on the repository. Its `id` is ignored; the server assigns one.
    pub async fn create_repository_key(
        &self, project_key: &str, repository_slug: &str, key: &SshKey,
    ) -> Result<(SshKey, Response), StashError> {
        let (created, response): (SshKeyEnvelope, Response) = self
            .client
            .send_json(Method::POST, KEYS_API, &keys_path(project_key, repository_slug), &SshKeyEnvelope::from(key))
            .await?;

        Ok((created.into(), response))
    }

    pub async fn delete_repository_key(
        &self, project_key: &str, repository_slug: &str, key_id: u64,
    ) -> Result<Response, StashError> {
        let path = format!("{}/{}", keys_path(project_key, repository_slug), key_id);
        self.client.delete(KEYS_API, &path).await
    }
}

fn keys_path(project_key: &str, repository_slug: &str) -> String {
    format!("{}/ssh", repository_path(project_key, repository_slug))
}
