use crate::domain::model::{ExportOutcome, MunicipalityRecord, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body text. Transport errors and non-success
    /// statuses are both failures.
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn index_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn detail_url_template(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn discover(&self) -> Result<Vec<MunicipalityRecord>>;
    async fn aggregate(&self, records: Vec<MunicipalityRecord>) -> Result<Vec<MunicipalityRecord>>;
    async fn export(&self, records: Vec<MunicipalityRecord>) -> Result<ExportOutcome>;
}
