use crate::bitbucket::client::transport::{Client, Response};
use crate::bitbucket::client::CORE_API;
use crate::bitbucket::json::user::User;
use crate::error::StashError;

pub struct UsersHandler<'c> {
    client: &'c Client,
}

impl<'c> UsersHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        UsersHandler { client }
    }

    pub async fn get_user(&self, user_slug: &str) -> Result<(User, Response), StashError> {
        self.client.get(CORE_API, &format!("users/{}", user_slug)).await
    }
}
