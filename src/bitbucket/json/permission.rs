use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Global, project and repository permissions, as spelled on the wire (`REPO_READ`, ...).
///
/// Access tokens may only carry the `PROJECT_*` and `REPO_*` ones.
#[derive(Display, EnumString, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    LicensedUser,
    ProjectView,
    ProjectRead,
    ProjectWrite,
    ProjectAdmin,
    ProjectCreate,
    Admin,
    SysAdmin,
    RepoRead,
    RepoWrite,
    RepoAdmin,
    RepoCreate,
    UserAdmin,
}
