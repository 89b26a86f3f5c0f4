//! Spec loading from inline payloads, files and URLs

use std::fs;
use std::path::{Path, PathBuf};
use swagger_import_common::{FetchConfig, ImportDescriptor, ImportError, Result, SourceKind};
use tracing::debug;
use url::Url;

/// Reads the raw content an [`ImportDescriptor`] refers to
///
/// `http://` and `https://` locations are fetched with a blocking client whose
/// timeout comes from [`FetchConfig`]; `file://` URLs and bare paths are read
/// from the filesystem.
pub struct SpecLoader {
    agent: ureq::Agent,
}

impl Default for SpecLoader {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

impl SpecLoader {
    pub fn new(config: &FetchConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();
        Self { agent }
    }

    /// Return the document content for a descriptor
    pub fn load(&self, descriptor: &ImportDescriptor) -> Result<String> {
        let content = match descriptor.source_kind {
            SourceKind::Inline => descriptor.payload.clone(),
            SourceKind::Url => self.read_location(descriptor.payload.trim())?,
        };

        if content.trim().is_empty() {
            return Err(ImportError::EmptyPayload);
        }

        Ok(content)
    }

    /// Read a URL or filesystem location
    pub fn read_location(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            debug!(location, "fetching API description");
            let response = self.agent.get(location).call().map_err(|e| unreachable(location, e))?;
            return response.into_string().map_err(|e| unreachable(location, e));
        }

        let path = local_path(location)?;
        debug!(path = %path.display(), "reading API description");
        fs::read_to_string(&path).map_err(|e| unreachable(location, e))
    }

    /// Resolve `relative` against the location of a document
    ///
    /// ```
    /// use swagger_import_parser::SpecLoader;
    ///
    /// assert_eq!(
    ///     SpecLoader::resolve_relative("https://example.com/api/listing.json", "pets.json"),
    ///     "https://example.com/api/pets.json"
    /// );
    /// ```
    pub fn resolve_relative(base: &str, relative: &str) -> String {
        if is_remote(relative) || relative.starts_with("file:") {
            return relative.to_string();
        }

        if let Ok(joined) = Url::parse(base).and_then(|base_url| base_url.join(relative)) {
            return joined.to_string();
        }

        let parent = Path::new(base).parent().unwrap_or_else(|| Path::new(""));
        parent
            .join(relative.trim_start_matches('/'))
            .to_string_lossy()
            .into_owned()
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn local_path(location: &str) -> Result<PathBuf> {
    if location.starts_with("file:") {
        let url = Url::parse(location).map_err(|e| unreachable(location, e))?;
        return url
            .to_file_path()
            .map_err(|_| unreachable(location, "not a local file URL"));
    }
    Ok(PathBuf::from(location))
}

fn unreachable(location: &str, reason: impl std::fmt::Display) -> ImportError {
    ImportError::UnreachableSource {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}
