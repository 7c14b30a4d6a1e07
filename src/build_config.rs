use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    config::BaseName,
    error::{Error, Result},
};

/// the metadata for a single page, read from one file in the content directory
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub post_date: String,
    #[serde(deserialize_with = "scalar_string")]
    pub publish_date: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub category: String,
    /// relative to the includes directory, empty until discovered
    #[serde(deserialize_with = "scalar_string")]
    pub content_path: String,
    /// the file the record came from, always set by the loader
    #[serde(skip_deserializing)]
    pub config_name: String,
}

impl BuildConfig {
    /// parse the raw bytes of a config file, `name` is only used for errors
    ///
    /// only the first yaml document is read, anything after a `---` separator is ignored
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let Some(document) = serde_yml::Deserializer::from_str(&text).next() else {
            return Ok(Self::default());
        };
        let config =
            Option::<Self>::deserialize(document).map_err(|source| Error::SerdeError {
                name: name.into(),
                source,
            })?;
        Ok(config.unwrap_or_default())
    }

    /// the name of the directory the page is written to
    pub fn output_name(&self, rule: BaseName) -> &str {
        base_name(&self.config_name, rule)
    }
}

/// cut the extension(s) off a file name
///
/// a name without any `.` is returned whole
pub fn base_name(file_name: &str, rule: BaseName) -> &str {
    let cut = match rule {
        BaseName::FirstSegment => file_name.find('.'),
        BaseName::Stem => file_name.rfind('.'),
    };
    match cut {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

// dates and numbers are display strings here, so any scalar is kept exactly as written
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
