use tracing::debug;

use super::collections::BLOGS;
use crate::client::ApiClient;
use crate::error::Error;
use crate::forms::BlogPostForm;
use crate::models::{MutationAck, RawBlogPost};

impl ApiClient {
    /// List every blog post, newest first as the backend sends them.
    ///
    /// `GET {prefix}/blogs`
    pub async fn list_blogs(&self) -> Result<Vec<RawBlogPost>, Error> {
        self.list_collection(BLOGS).await
    }

    /// Fetch one post by slug or id.
    ///
    /// `GET {prefix}/blogs/{key}`
    pub async fn get_blog(&self, key: &str) -> Result<RawBlogPost, Error> {
        debug!(key, "fetching blog post");
        self.find_record(BLOGS, key).await
    }

    pub async fn create_blog(&self, form: &BlogPostForm) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.create_record(BLOGS, form, file).await
    }

    pub async fn update_blog(&self, id: &str, form: &BlogPostForm) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.update_record(BLOGS, id, form, file).await
    }

    pub async fn delete_blog(&self, id: &str) -> Result<MutationAck, Error> {
        self.delete_record(BLOGS, id).await
    }
}
