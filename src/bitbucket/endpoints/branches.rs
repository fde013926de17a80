use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::branch::{Branch, BranchSearchOptions};
use crate::bitbucket::json::page::PagedList;
use crate::error::StashError;

pub struct BranchesHandler<'c> {
    client: &'c Client,
}

impl<'c> BranchesHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        BranchesHandler { client }
    }

    pub async fn search_branches(
        &self, project_key: &str, repository_slug: &str, opts: Option<&BranchSearchOptions>,
    ) -> Result<(Vec<Branch>, Response), StashError> {
        let path = format!("{}/branches", repository_path(project_key, repository_slug));
        let (list, response): (PagedList<Branch>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    pub async fn get_default_branch(
        &self, project_key: &str, repository_slug: &str,
    ) -> Result<(Branch, Response), StashError> {
        let path = format!("{}/branches/default", repository_path(project_key, repository_slug));
        self.client.get(CORE_API, &path).await
    }
}
