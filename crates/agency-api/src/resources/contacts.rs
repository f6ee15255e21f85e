// Contact messages: public submission plus admin review.

use super::collections::CONTACTS;
use crate::client::ApiClient;
use crate::error::Error;
use crate::forms::ContactSubmission;
use crate::models::{MutationAck, RawContactMessage};

impl ApiClient {
    /// `GET {prefix}/contacts` (admin)
    pub async fn list_contacts(&self) -> Result<Vec<RawContactMessage>, Error> {
        self.list_collection(CONTACTS).await
    }

    /// `POST {prefix}/contacts` from the public contact form.
    pub async fn submit_contact(&self, form: &ContactSubmission) -> Result<MutationAck, Error> {
        self.create_record(CONTACTS, form, None).await
    }

    /// `PATCH {prefix}/contacts/{id}/status` with `read` or `unread`.
    pub async fn set_contact_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<RawContactMessage>, Error> {
        self.patch_status(CONTACTS, id, status).await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<MutationAck, Error> {
        self.delete_record(CONTACTS, id).await
    }
}
