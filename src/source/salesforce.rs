use super::soap;
use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use crate::core::types::{ComponentRecord, DependencyEdge, Direction, TypeDescription};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Live org over HTTP: metadata SOAP for describe/list, tooling REST for edges.
///
/// The access token is used as-is; obtaining or refreshing it is the caller's
/// business.
pub struct SalesforceSource {
    client: reqwest::Client,
    instance_url: String,
    access_token: String,
    api_version: String,
}

#[derive(Debug, Deserialize)]
struct ToolingQueryResponse {
    done: bool,
    #[serde(rename = "nextRecordsUrl")]
    next_records_url: Option<String>,
    records: Vec<DependencyRow>,
}

#[derive(Debug, Deserialize)]
struct DependencyRow {
    #[serde(rename = "MetadataComponentId")]
    metadata_component_id: String,
    #[serde(rename = "MetadataComponentType")]
    metadata_component_type: String,
    #[serde(rename = "RefMetadataComponentId")]
    ref_metadata_component_id: String,
    #[serde(rename = "RefMetadataComponentType")]
    ref_metadata_component_type: String,
}

impl From<DependencyRow> for DependencyEdge {
    fn from(row: DependencyRow) -> Self {
        DependencyEdge {
            source_id: row.metadata_component_id,
            source_type: row.metadata_component_type,
            target_id: row.ref_metadata_component_id,
            target_type: row.ref_metadata_component_type,
        }
    }
}

impl SalesforceSource {
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::remote_with_source("client setup", e))?;

        Ok(Self {
            client,
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: api_version.into(),
        })
    }

    async fn soap_call(&self, operation: &str, body: String) -> Result<String, MetadataError> {
        let url = format!("{}/services/Soap/m/{}", self.instance_url, self.api_version);
        debug!("SOAP {} -> {}", operation, url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "\"\"")
            .body(soap::envelope(&self.access_token, &body))
            .send()
            .await
            .map_err(|e| MetadataError::remote_with_source(operation, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MetadataError::remote_with_source(operation, e))?;

        if let Some(fault) = soap::fault_message(&text) {
            return Err(MetadataError::remote(operation, fault));
        }
        if !status.is_success() {
            return Err(MetadataError::remote(operation, format!("HTTP {}", status)));
        }
        Ok(text)
    }

    async fn tooling_page(
        &self,
        url: &str,
        soql: Option<&str>,
    ) -> Result<ToolingQueryResponse, MetadataError> {
        let mut request = self.client.get(url).bearer_auth(&self.access_token);
        if let Some(q) = soql {
            request = request.query(&[("q", q)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetadataError::remote_with_source("tooling query", e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::remote(
                "tooling query",
                format!("HTTP {}: {}", status, body),
            ));
        }

        response
            .json::<ToolingQueryResponse>()
            .await
            .map_err(|e| MetadataError::decode("tooling query response", e))
    }
}

#[async_trait]
impl MetadataSource for SalesforceSource {
    async fn describe_types(&self) -> Result<Vec<TypeDescription>, MetadataError> {
        let xml = self
            .soap_call(
                "describeMetadata",
                soap::describe_metadata_body(&self.api_version),
            )
            .await?;
        soap::parse_describe_metadata(&xml)
    }

    async fn list_components_of_type(
        &self,
        component_type: &str,
    ) -> Result<Vec<ComponentRecord>, MetadataError> {
        let xml = self
            .soap_call(
                "listMetadata",
                soap::list_metadata_body(component_type, &self.api_version),
            )
            .await?;
        soap::parse_list_metadata(&xml)
    }

    async fn query_dependency_edges(
        &self,
        ids: &[String],
        direction: Direction,
    ) -> Result<Vec<DependencyEdge>, MetadataError> {
        let soql = soap::dependency_soql(ids, direction);
        let first_url = format!(
            "{}/services/data/v{}/tooling/query",
            self.instance_url, self.api_version
        );

        let mut page = self.tooling_page(&first_url, Some(&soql)).await?;
        let mut edges: Vec<DependencyEdge> = Vec::new();
        loop {
            edges.extend(page.records.into_iter().map(DependencyEdge::from));
            match (page.done, page.next_records_url) {
                (false, Some(next)) => {
                    let url = format!("{}{}", self.instance_url, next);
                    page = self.tooling_page(&url, None).await?;
                }
                _ => break,
            }
        }

        debug!("Tooling query returned {} dependency rows", edges.len());
        Ok(edges)
    }
}
