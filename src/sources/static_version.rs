use crate::monitor::error::SourceError;
use crate::monitor::source::VersionSource;
use crate::monitor::types::SourceSpec;

/// Returns the `version` parameter as is
pub struct StaticSource;

impl StaticSource {
    pub const TYPE: &'static str = "static";
}

#[async_trait::async_trait]
impl VersionSource for StaticSource {
    async fn fetch(&self, spec: &SourceSpec) -> Result<String, SourceError> {
        spec.param("version")
            .map(str::to_string)
            .ok_or(SourceError::MissingParam("version"))
    }
}
