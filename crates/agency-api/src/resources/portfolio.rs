use super::collections::PORTFOLIO;
use crate::client::ApiClient;
use crate::error::Error;
use crate::forms::PortfolioForm;
use crate::models::{MutationAck, RawPortfolioItem};

impl ApiClient {
    /// `GET {prefix}/portfolio`
    pub async fn list_portfolio(&self) -> Result<Vec<RawPortfolioItem>, Error> {
        self.list_collection(PORTFOLIO).await
    }

    pub async fn create_portfolio_item(&self, form: &PortfolioForm) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.create_record(PORTFOLIO, form, file).await
    }

    pub async fn update_portfolio_item(
        &self,
        id: &str,
        form: &PortfolioForm,
    ) -> Result<MutationAck, Error> {
        let file = form.image.as_deref().map(|p| ("image", p));
        self.update_record(PORTFOLIO, id, form, file).await
    }

    pub async fn delete_portfolio_item(&self, id: &str) -> Result<MutationAck, Error> {
        self.delete_record(PORTFOLIO, id).await
    }
}
