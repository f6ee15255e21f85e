use super::collections::SERVICES;
use crate::client::ApiClient;
use crate::error::Error;
use crate::forms::ServiceForm;
use crate::models::{MutationAck, RawService};

impl ApiClient {
    /// `GET {prefix}/services`
    pub async fn list_services(&self) -> Result<Vec<RawService>, Error> {
        self.list_collection(SERVICES).await
    }

    pub async fn create_service(&self, form: &ServiceForm) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.create_record(SERVICES, form, file).await
    }

    pub async fn update_service(&self, id: &str, form: &ServiceForm) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.update_record(SERVICES, id, form, file).await
    }

    pub async fn delete_service(&self, id: &str) -> Result<MutationAck, Error> {
        self.delete_record(SERVICES, id).await
    }
}
