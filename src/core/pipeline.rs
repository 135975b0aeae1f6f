use crate::core::export::{party_columns, render_table};
use crate::core::extract::{extract_numbers, extract_parties, parse_municipalities};
use crate::core::{ConfigProvider, Fetcher, Pipeline, Storage};
use crate::domain::model::{ExportOutcome, MunicipalityRecord};
use crate::utils::error::Result;

pub struct ElectionPipeline<F: Fetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
}

impl<F: Fetcher, S: Storage, C: ConfigProvider> ElectionPipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self {
            fetcher,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage, C: ConfigProvider> Pipeline for ElectionPipeline<F, S, C> {
    async fn discover(&self) -> Result<Vec<MunicipalityRecord>> {
        let index_url = self.config.index_url();
        tracing::debug!("Downloading index page: {}", index_url);
        let html = self.fetcher.fetch(index_url).await?;

        let records = parse_municipalities(&html, index_url, self.config.detail_url_template())?;
        tracing::debug!("Index page lists {} municipalities", records.len());
        Ok(records)
    }

    async fn aggregate(&self, records: Vec<MunicipalityRecord>) -> Result<Vec<MunicipalityRecord>> {
        let mut processed = Vec::with_capacity(records.len());

        for mut record in records {
            tracing::info!("Processing municipality: {}", record.name);

            let html = match self.fetcher.fetch(&record.detail_url).await {
                Ok(html) => html,
                Err(_) => {
                    tracing::warn!("Skipping {} ({})", record.name, record.code);
                    continue;
                }
            };

            record.apply_results(extract_numbers(&html), extract_parties(&html));
            tracing::debug!(
                "{}: voters={}, envelopes={}, valid={}, parties={}",
                record.name,
                record.voters,
                record.ballot_envelopes,
                record.valid_votes,
                record.parties.len()
            );
            processed.push(record);
        }

        Ok(processed)
    }

    async fn export(&self, records: Vec<MunicipalityRecord>) -> Result<ExportOutcome> {
        if records.is_empty() {
            tracing::info!("No data to save");
            return Ok(ExportOutcome::NoData);
        }

        let parties = party_columns(&records);
        let table = render_table(&records, &parties, self.config.output_format())?;

        let path = self.config.output_path();
        tracing::debug!("Writing {} bytes to {}", table.len(), path);
        if let Err(e) = self.storage.write_file(path, &table).await {
            tracing::error!("Failed to save {}: {}", path, e);
            return Err(e);
        }

        tracing::info!("File saved as {}", path);
        Ok(ExportOutcome::Written {
            path: path.to_string(),
            rows: records.len(),
            party_columns: parties.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::DEFAULT_DETAIL_URL_TEMPLATE;
    use crate::domain::model::OutputFormat;
    use crate::utils::error::ScrapeError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const INDEX_URL: &str = "http://volby.test/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103";

    struct MockFetcher {
        pages: HashMap<String, String>,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl MockFetcher {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.clone()))
                    .collect(),
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().await.push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| {
                ScrapeError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("No page for {}", url),
                ))
            })
        }
    }

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        fail: bool,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.fail {
                return Err(ScrapeError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        index_url: String,
        output_path: String,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                index_url: INDEX_URL.to_string(),
                output_path: "vysledky.csv".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn index_url(&self) -> &str {
            &self.index_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn detail_url_template(&self) -> &str {
            DEFAULT_DETAIL_URL_TEMPLATE
        }

        fn output_format(&self) -> OutputFormat {
            OutputFormat::Csv
        }
    }

    fn detail_page(voters: &str, parties: &[(&str, &str)]) -> String {
        let mut html = format!(
            "<td class=\"cislo\" headers=\"sa2\">{voters}</td>\n\
             <td class=\"cislo\" headers=\"sa3\">50</td>\n\
             <td class=\"cislo\" headers=\"sa6\">49</td>\n"
        );
        for (i, (name, votes)) in parties.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td class=\"cislo\" headers=\"t1sa1 t1sb1\">{}</td>\n\
                 <td class=\"overflow_name\" headers=\"t1sa1 t1sb2\">{name}</td>\n\
                 <td class=\"cislo\" headers=\"t1sa2 t1sb3\">{votes}</td></tr>\n",
                i + 1
            ));
        }
        html
    }

    fn records(codes: &[&str]) -> Vec<MunicipalityRecord> {
        codes
            .iter()
            .map(|code| {
                MunicipalityRecord::new(*code, format!("Obec {code}"), format!("http://volby.test/{code}"))
            })
            .collect()
    }

    #[tokio::test]
    async fn test_discover_builds_records_from_index() {
        let index = "<td class=\"overflow_name\" headers=\"t1sa1 t1sb2\">Adamov</td>\n\
                     <a href=\"ps311?xjazyk=CZ&amp;xkraj=12&amp;xobec=581291&amp;xvyber=7103\">581291</a>\n"
            .to_string();
        let fetcher = MockFetcher::new(&[(INDEX_URL, index)]);
        let pipeline = ElectionPipeline::new(fetcher, MockStorage::new(), MockConfig::new());

        let result = pipeline.discover().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Adamov");
        assert_eq!(
            result[0].detail_url,
            "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=12&xobec=581291&xvyber=7103"
        );
    }

    #[tokio::test]
    async fn test_discover_index_failure_propagates() {
        let fetcher = MockFetcher::new(&[]);
        let pipeline = ElectionPipeline::new(fetcher, MockStorage::new(), MockConfig::new());

        assert!(pipeline.discover().await.is_err());
    }

    #[tokio::test]
    async fn test_aggregate_skips_failed_fetch_and_keeps_order() {
        let fetcher = MockFetcher::new(&[
            ("http://volby.test/1", detail_page("1&nbsp;234", &[("Party X", "500")])),
            ("http://volby.test/3", detail_page("80", &[("Party Y", "10 000")])),
        ]);
        let requested = fetcher.requested.clone();
        let pipeline = ElectionPipeline::new(fetcher, MockStorage::new(), MockConfig::new());

        let result = pipeline.aggregate(records(&["1", "2", "3"])).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].code, "1");
        assert_eq!(result[0].voters, 1234);
        assert_eq!(result[0].ballot_envelopes, 50);
        assert_eq!(result[0].valid_votes, 49);
        assert_eq!(result[0].parties["Party X"], 500);
        assert_eq!(result[1].code, "3");
        assert_eq!(result[1].parties["Party Y"], 10000);

        assert_eq!(
            *requested.lock().await,
            vec!["http://volby.test/1", "http://volby.test/2", "http://volby.test/3"]
        );
    }

    #[tokio::test]
    async fn test_aggregate_all_failed_is_empty() {
        let pipeline = ElectionPipeline::new(MockFetcher::new(&[]), MockStorage::new(), MockConfig::new());
        let result = pipeline.aggregate(records(&["1", "2"])).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_export_empty_writes_nothing() {
        let storage = MockStorage::new();
        let pipeline = ElectionPipeline::new(MockFetcher::new(&[]), storage.clone(), MockConfig::new());

        let outcome = pipeline.export(Vec::new()).await.unwrap();

        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(storage.get_file("vysledky.csv").await.is_none());
    }

    #[tokio::test]
    async fn test_export_writes_table() {
        let storage = MockStorage::new();
        let pipeline = ElectionPipeline::new(MockFetcher::new(&[]), storage.clone(), MockConfig::new());

        let mut data = records(&["1", "2"]);
        data[0].parties.insert("A".to_string(), 3);
        data[1].parties.insert("B".to_string(), 4);

        let outcome = pipeline.export(data).await.unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: "vysledky.csv".to_string(),
                rows: 2,
                party_columns: 2,
            }
        );

        let text = String::from_utf8(storage.get_file("vysledky.csv").await.unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "code,name,voters,ballot_envelopes,valid_votes,A,B");
        assert_eq!(lines[1], "1,Obec 1,0,0,0,3,0");
        assert_eq!(lines[2], "2,Obec 2,0,0,0,0,4");
    }

    #[tokio::test]
    async fn test_export_write_failure_surfaces() {
        let pipeline =
            ElectionPipeline::new(MockFetcher::new(&[]), MockStorage::failing(), MockConfig::new());

        let result = pipeline.export(records(&["1"])).await;
        assert!(matches!(result, Err(ScrapeError::Io(_))));
    }
}
