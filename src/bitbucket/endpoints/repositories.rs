use log::{trace, warn};
use reqwest::Method;
use stashcrab_macros::stash_trace_time;

use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::endpoints::repository_path;
use crate::bitbucket::json::page::{ListOptions, PagedList};
use crate::bitbucket::json::repository::{FileContent, FileOptions, Repository, RepositorySearchOptions};
use crate::error::{ContentKind, StashError};

pub struct RepositoriesHandler<'c> {
    client: &'c Client,
}

impl<'c> RepositoriesHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        RepositoriesHandler { client }
    }

    /// Repositories across all projects, filtered by `opts`.
    pub async fn search_repositories(
        &self, opts: Option<&RepositorySearchOptions>,
    ) -> Result<(Vec<Repository>, Response), StashError> {
        let (list, response): (PagedList<Repository>, Response) = self.client.get_paged(CORE_API, "repos", opts).await?;
        Ok((list.values, response))
    }

    pub async fn list_repositories(
        &self, project_key: &str, opts: Option<&ListOptions>,
    ) -> Result<(Vec<Repository>, Response), StashError> {
        let path = format!("projects/{}/repos", project_key);
        let (list, response): (PagedList<Repository>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    pub async fn get_repository(
        &self, project_key: &str, repository_slug: &str,
    ) -> Result<(Repository, Response), StashError> {
        self.client.get(CORE_API, &repository_path(project_key, repository_slug)).await
    }

    /// Creates `repository` under the project; only `name` and `scm_id` are mandatory.
    pub async fn create_repository(
        &self, project_key: &str, repository: &Repository,
    ) -> Result<(Repository, Response), StashError> {
        let path = format!("projects/{}/repos", project_key);
        self.client.send_json(Method::POST, CORE_API, &path, repository).await
    }

    /// Schedules the repository for deletion; the server answers `202 Accepted`.
    pub async fn delete_repository(&self, project_key: &str, repository_slug: &str) -> Result<Response, StashError> {
        self.client.delete(CORE_API, &repository_path(project_key, repository_slug)).await
    }

    /// Paths of all files below `path` (recursively), relative to it.
    pub async fn list_files(
        &self, project_key: &str, repository_slug: &str, path: &str, opts: Option<&FileOptions>,
    ) -> Result<(Vec<String>, Response), StashError> {
        let path = format!("{}/files/{}", repository_path(project_key, repository_slug), path);
        let (list, response): (PagedList<String>, Response) = self.client.get_paged(CORE_API, &path, opts).await?;
        Ok((list.values, response))
    }

    /// Full text of the file at `path` (as of `at`, when given), fetching as many pages of lines as
    /// it takes. Lines are joined with `\n`.
    ///
    /// Binary files and directories fail with [`StashError::UnsupportedContentError`]. The returned
    /// [`Response`] is the one of the last page fetched.
    #[stash_trace_time]
    pub async fn get_text_file_content(
        &self, project_key: &str, repository_slug: &str, path: &str, at: Option<&str>,
    ) -> Result<(String, Response), StashError> {
        let browse_path = format!("{}/browse/{}", repository_path(project_key, repository_slug), path);
        let mut opts = FileOptions {
            list: ListOptions::default(),
            at: at.map(str::to_string),
        };

        let (mut content, mut response): (FileContent, Response) =
            self.client.get_paged(CORE_API, &browse_path, Some(&opts)).await?;

        if content.binary {
            return Err(StashError::UnsupportedContentError {
                path: path.to_string(),
                kind: ContentKind::Binary,
            });
        }
        if content.path.is_some() {
            return Err(StashError::UnsupportedContentError {
                path: path.to_string(),
                kind: ContentKind::Directory,
            });
        }

        let mut lines: Vec<String> = Vec::new();
        loop {
            lines.extend(content.lines.drain(..).map(|line| line.text));

            if content.page.is_last_page {
                break;
            }
            match ListOptions::resume(&content.page) {
                Some(next) if next.start <= content.page.start => {
                    warn!(
                        "Page of [{}] starting at {} points back to {}; returning the {} lines read so far.",
                        browse_path,
                        content.page.start,
                        next.start,
                        lines.len()
                    );
                    break;
                }
                Some(next) => opts.list = next,
                None => {
                    warn!(
                        "Page of [{}] has no next page start; returning the {} lines read so far.",
                        browse_path,
                        lines.len()
                    );
                    break;
                }
            }

            trace!("Fetching [{}] from line {}...", browse_path, opts.list.start);
            let (next_content, next_response): (FileContent, Response) =
                self.client.get_paged(CORE_API, &browse_path, Some(&opts)).await?;
            content = next_content;
            response = next_response;
        }

        Ok((lines.join("\n"), response))
    }
}
