//! Metadata sources the resolver can run against
pub mod snapshot;
pub mod soap;

#[cfg(feature = "network")]
pub mod salesforce;

pub use snapshot::{OrgSnapshot, SnapshotSource};

#[cfg(feature = "network")]
pub use salesforce::SalesforceSource;

use crate::config::SourceSelection;
use crate::core::errors::MetadataError;
use crate::core::traits::MetadataSource;
use tracing::info;

/// Build the source a run was configured for.
pub async fn open_source(
    selection: &SourceSelection,
    api_version: &str,
) -> Result<Box<dyn MetadataSource>, MetadataError> {
    match selection {
        SourceSelection::Snapshot(path) => {
            let source = SnapshotSource::from_path(path).await?;
            info!("Using org snapshot {}", path.display());
            Ok(Box::new(source))
        }
        #[cfg(feature = "network")]
        SourceSelection::Remote {
            instance_url,
            access_token,
            timeout,
        } => {
            let source = SalesforceSource::new(
                instance_url.as_str(),
                access_token.as_str(),
                api_version,
                *timeout,
            )?;
            info!("Using live org {} (API {})", instance_url, api_version);
            Ok(Box::new(source))
        }
        #[cfg(not(feature = "network"))]
        SourceSelection::Remote { instance_url, .. } => {
            let _ = api_version;
            Err(MetadataError::remote(
                "connect",
                format!(
                    "cannot reach {}: built without the `network` feature",
                    instance_url
                ),
            ))
        }
    }
}
