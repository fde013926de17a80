use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::commit::Change;
use crate::bitbucket::json::page::{ListOptions, PagedList};
use crate::bitbucket::json::pull_request::{PullRequest, PullRequestSearchOptions};
use crate::error::StashError;

pub struct PullRequestsHandler<'c> {
    client: &'c Client,
}

impl<'c> PullRequestsHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        PullRequestsHandler { client }
    }

    pub async fn search_pull_requests(
        &self, project_key: &str, repository_slug: &str, opts: Option<&PullRequestSearchOptions>,
    ) -> Result<(Vec<PullRequest>, Response), StashError> {
        let path = format!("{}/pull-requests", repository_path(project_key, repository_slug));
        let (list, response): (PagedList<PullRequest>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    pub async fn get_pull_request(
        &self, project_key: &str, repository_slug: &str, pull_request_id: u64,
    ) -> Result<(PullRequest, Response), StashError> {
        let path = format!("{}/pull-requests/{}", repository_path(project_key, repository_slug), pull_request_id);
        self.client.get(CORE_API, &path).await
    }

    /// Files changed by the pull request, source tip against the merge base with its target.
    pub async fn list_pull_request_changes(
        &self, project_key: &str, repository_slug: &str, pull_request_id: u64, opts: Option<&ListOptions>,
    ) -> Result<(Vec<Change>, Response), StashError> {
        let path = format!(
            "{}/pull-requests/{}/changes",
            repository_path(project_key, repository_slug),
            pull_request_id
        );
        let (list, response): (PagedList<Change>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }
}
