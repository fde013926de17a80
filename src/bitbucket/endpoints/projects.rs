use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::json::page::{ListOptions, PagedList};
use crate::bitbucket::json::project::{Project, ProjectPermission, ProjectPermissionSearchOptions};
use crate::error::StashError;

pub struct ProjectsHandler<'c> {
    client: &'c Client,
}

impl<'c> ProjectsHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        ProjectsHandler { client }
    }

    pub async fn list_projects(&self, opts: Option<&ListOptions>) -> Result<(Vec<Project>, Response), StashError> {
        let (list, response): (PagedList<Project>, Response) = self.client.get_paged(CORE_API, "projects", opts).await?;
        Ok((list.values, response))
    }

    /// Users and groups holding a permission on the project, optionally narrowed down by
    /// permission, grantee type or name.
    pub async fn search_project_permissions(
        &self, project_key: &str, opts: Option<&ProjectPermissionSearchOptions>,
    ) -> Result<(Vec<ProjectPermission>, Response), StashError> {
        let path = format!("projects/{}/permissions/search", project_key);
        let (list, response): (PagedList<ProjectPermission>, Response) =
            self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }
}
