use reqwest::Method;

use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::build_status::BuildStatus;
use crate::bitbucket::json::commit::{Change, Commit, CommitSearchOptions, CompareChangesOptions};
use crate::bitbucket::json::page::{ListOptions, PageQuery, PagedList};
use crate::error::StashError;

pub struct CommitsHandler<'c> {
    client: &'c Client,
}

impl<'c> CommitsHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        CommitsHandler { client }
    }

    /// Commit history, newest first.
    pub async fn search_commits(
        &self, project_key: &str, repository_slug: &str, opts: Option<&CommitSearchOptions>,
    ) -> Result<(Vec<Commit>, Response), StashError> {
        let path = format!("{}/commits", repository_path(project_key, repository_slug));
        let (list, response): (PagedList<Commit>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    pub async fn get_commit(
        &self, project_key: &str, repository_slug: &str, commit_id: &str,
    ) -> Result<(Commit, Response), StashError> {
        let path = format!("{}/commits/{}", repository_path(project_key, repository_slug), commit_id);
        self.client.get(CORE_API, &path).await
    }

    /// Files changed by `commit_id` relative to its first parent.
    pub async fn list_changes(
        &self, project_key: &str, repository_slug: &str, commit_id: &str, opts: Option<&ListOptions>,
    ) -> Result<(Vec<Change>, Response), StashError> {
        let path = format!("{}/commits/{}/changes", repository_path(project_key, repository_slug), commit_id);
        let (list, response): (PagedList<Change>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    /// Files that differ between the `from` and `to` commits or refs.
    pub async fn compare_changes(
        &self, project_key: &str, repository_slug: &str, from: &str, to: &str, opts: Option<&CompareChangesOptions>,
    ) -> Result<(Vec<Change>, Response), StashError> {
        let path = format!("{}/compare/changes", repository_path(project_key, repository_slug));
        let query = CompareQuery { from, to, opts };
        let (list, response): (PagedList<Change>, Response) =
            self.client.get_paged(CORE_API, &path, Some(&query)).await?;
        Ok((list.values, response))
    }

    /// Records the status of a CI build against `commit_id`. The server echoes nothing useful back,
    /// so the body is not read.
    pub async fn create_build_status(
        &self, project_key: &str, repository_slug: &str, commit_id: &str, status: &BuildStatus,
    ) -> Result<Response, StashError> {
        let path = format!("{}/commits/{}/builds", repository_path(project_key, repository_slug), commit_id);
        let request = self.client.build_request(Method::POST, CORE_API, &path, Some(status))?;
        self.client.execute_empty(request).await
    }
}

/// `from`/`to` always travel with a comparison, on top of whatever the caller asked for.
struct CompareQuery<'a> {
    from: &'a str,
    to: &'a str,
    opts: Option<&'a CompareChangesOptions>,
}

impl PageQuery for CompareQuery<'_> {
    fn list_options(&self) -> ListOptions {
        self.opts.map(|opts| opts.list).unwrap_or_default()
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("from", self.from.to_string()), ("to", self.to.to_string())];
        if let Some(opts) = self.opts {
            pairs.extend(opts.query_pairs());
        }
        pairs
    }
}
