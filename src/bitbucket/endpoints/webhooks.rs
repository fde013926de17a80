use reqwest::Method;

use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::page::{ListOptions, PagedList};
use crate::bitbucket::json::webhook::Webhook;
use crate::error::StashError;

pub struct WebhooksHandler<'c> {
    client: &'c Client,
}

impl<'c> WebhooksHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        WebhooksHandler { client }
    }

    pub async fn list_webhooks(
        &self, project_key: &str, repository_slug: &str, opts: Option<&ListOptions>,
    ) -> Result<(Vec<Webhook>, Response), StashError> {
        let (list, response): (PagedList<Webhook>, Response) = self
            .client
            .get_paged(CORE_API, &webhooks_path(project_key, repository_slug), opts)
            .await?;
        Ok((list.values, response))
    }

    pub async fn get_webhook(
        &self, project_key: &str, repository_slug: &str, webhook_id: u64,
    ) -> Result<(Webhook, Response), StashError> {
        let path = format!("{}/{}", webhooks_path(project_key, repository_slug), webhook_id);
        self.client.get(CORE_API, &path).await
    }

    pub async fn create_webhook(
        &self, project_key: &str, repository_slug: &str, webhook: &Webhook,
    ) -> Result<(Webhook, Response), StashError> {
        self.client
            .send_json(Method::POST, CORE_API, &webhooks_path(project_key, repository_slug), webhook)
            .await
    }

    pub async fn delete_webhook(
        &self, project_key: &str, repository_slug: &str, webhook_id: u64,
    ) -> Result<Response, StashError> {
        let path = format!("{}/{}", webhooks_path(project_key, repository_slug), webhook_id);
        self.client.delete(CORE_API, &path).await
    }
}

fn webhooks_path(project_key: &str, repository_slug: &str) -> String {
    format!("{}/webhooks", repository_path(project_key, repository_slug))
}
