// Job applications: careers page submission plus admin review.

use super::collections::APPLICATIONS;
use crate::client::ApiClient;
use crate::error::Error;
use crate::forms::ApplicationSubmission;
use crate::models::{MutationAck, RawJobApplication};

impl ApiClient {
    /// `GET {prefix}/applications` (admin)
    pub async fn list_applications(&self) -> Result<Vec<RawJobApplication>, Error> {
        self.list_collection(APPLICATIONS).await
    }

    /// `POST {prefix}/applications`, multipart with the `resume` file.
    pub async fn submit_application(
        &self,
        form: &ApplicationSubmission,
    ) -> Result<MutationAck, Error> {
        let file = form.resume.as_deref().map(|p| ("resume", p));
        self.create_record(APPLICATIONS, form, file).await
    }

    /// `PATCH {prefix}/applications/{id}/status`
    pub async fn set_application_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<RawJobApplication>, Error> {
        self.patch_status(APPLICATIONS, id, status).await
    }

    pub async fn delete_application(&self, id: &str) -> Result<MutationAck, Error> {
        self.delete_record(APPLICATIONS, id).await
    }
}
