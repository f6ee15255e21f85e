// Endpoint methods, one file per collection.
//
// Shared plumbing for the uniform `{prefix}/{collection}[/{id}[/status]]`
// layout lives here; the per-collection files only pick paths and types.

mod applications;
mod blogs;
mod contacts;
mod portfolio;
mod services;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::client::{ApiClient, ack, decode_records, unwrap_list, unwrap_record};
use crate::error::Error;
use crate::models::MutationAck;
use crate::multipart::build_form;

/// Collection path segments.
pub mod collections {
    pub const BLOGS: &str = "blogs";
    pub const PORTFOLIO: &str = "portfolio";
    pub const SERVICES: &str = "services";
    pub const CONTACTS: &str = "contacts";
    pub const APPLICATIONS: &str = "applications";

    pub(crate) const STATUS: &str = "status";
}

impl ApiClient {
    /// `GET {prefix}/{collection}`, tolerating per-record garbage.
    pub(crate) async fn list_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, Error> {
        let body = self.get(self.url(&[collection])).await?;
        let items = unwrap_list(body)?;
        let total = items.len();
        let records: Vec<T> = decode_records(collection, items);
        tracing::debug!(collection, total, kept = records.len(), "listed collection");
        Ok(records)
    }

    /// `GET {prefix}/{collection}/{key}`; the record is required.
    pub(crate) async fn find_record<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<T, Error> {
        let body = self.get(self.url(&[collection, key])).await?;
        let raw = body.to_string();
        let record = unwrap_record(body).ok_or_else(|| Error::Deserialization {
            message: format!("expected a {collection} record"),
            body: raw.clone(),
        })?;
        serde_json::from_value(record).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: raw,
        })
    }

    /// `POST {prefix}/{collection}`, multipart when a file is attached.
    pub(crate) async fn create_record<F: Serialize + Sync>(
        &self,
        collection: &str,
        form: &F,
        file: Option<(&str, &Path)>,
    ) -> Result<MutationAck, Error> {
        let url = self.url(&[collection]);
        let body = match file {
            Some((field, path)) => {
                self.post_multipart(url, build_form(form, field, path).await?)
                    .await?
            }
            None => self.post_json(url, form).await?,
        };
        Ok(ack(body))
    }

    /// `PUT {prefix}/{collection}/{id}`, multipart when a file is attached.
    pub(crate) async fn update_record<F: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        form: &F,
        file: Option<(&str, &Path)>,
    ) -> Result<MutationAck, Error> {
        let url = self.url(&[collection, id]);
        let body = match file {
            Some((field, path)) => {
                self.put_multipart(url, build_form(form, field, path).await?)
                    .await?
            }
            None => self.put_json(url, form).await?,
        };
        Ok(ack(body))
    }

    /// `DELETE {prefix}/{collection}/{id}`.
    pub(crate) async fn delete_record(&self, collection: &str, id: &str) -> Result<MutationAck, Error> {
        let body = self.delete(self.url(&[collection, id])).await?;
        Ok(ack(body))
    }

    /// `PATCH {prefix}/{collection}/{id}/status` with `{"status": ..}`.
    ///
    /// Returns the updated record when the body carries one (bare or in
    /// `data`), `None` otherwise.
    pub(crate) async fn patch_status<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        status: &str,
    ) -> Result<Option<T>, Error> {
        let url = self.url(&[collection, id, collections::STATUS]);
        let body = self.patch_json(url, &json!({ "status": status })).await?;
        Ok(unwrap_record(body).and_then(|record: Value| serde_json::from_value(record).ok()))
    }
}
