use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::{Error, Figment, Metadata, Provider};
use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

use crate::error::Result as DocgenResult;

/// default directory values
pub const IN_DIR: &str = "content";
pub const INCLUDES_DIR: &str = "includes";
pub const TEMPLATE_DIR: &str = "template";
pub const OUT_DIR: &str = "build";

/// the site config file looked up in the working directory
pub const CONFIG_FILE: &str = "docgen.toml";
/// prefix for environment overrides, nested keys are split on `__`
pub const ENV_PREFIX: &str = "DOCGEN_";

pub const TITLE_PLACEHOLDER: &str = "||PAGE_TITLE||";

/// config for managing the site
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub structure: ConfigStructure,
    pub options: ConfigOptions,
}

/// config for defining the layout of the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigStructure {
    /// one yaml record per page
    pub content: PathBuf,
    /// the markdown sources the records point at
    pub includes: PathBuf,
    /// header, footer and stylesheets shared by every page
    pub template: PathBuf,
    /// the output directory, wiped at the start of every build
    pub build: PathBuf,
}

/// how a base name is cut out of a config file name
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseName {
    /// everything before the first `.`
    #[default]
    FirstSegment,
    /// everything before the last `.`
    Stem,
}

/// config options for page generation and the markdown parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOptions {
    /// token in the header template replaced with the page title
    pub placeholder: String,
    pub base_name: BaseName,
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub smart_punctuation: bool,
    /// `{#id .class}` after a heading
    pub heading_attributes: bool,
}

impl Default for ConfigStructure {
    fn default() -> Self {
        Self {
            content: IN_DIR.into(),
            includes: INCLUDES_DIR.into(),
            template: TEMPLATE_DIR.into(),
            build: OUT_DIR.into(),
        }
    }
}

impl ConfigStructure {
    /// the default layout placed under `root` instead of the working directory
    pub fn rooted_at<T: AsRef<Path>>(root: T) -> Self {
        let root = root.as_ref();
        let defaults = Self::default();
        Self {
            content: root.join(defaults.content),
            includes: root.join(defaults.includes),
            template: root.join(defaults.template),
            build: root.join(defaults.build),
        }
    }
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            placeholder: TITLE_PLACEHOLDER.into(),
            base_name: BaseName::default(),
            tables: true,
            footnotes: false,
            strikethrough: true,
            tasklists: false,
            smart_punctuation: true,
            heading_attributes: true,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Self::default())
    }

    pub fn from<T: Provider>(provider: T) -> Result<Self, Error> {
        Figment::from(provider).extract()
    }

    /// defaults, then the toml file if it exists, then `DOCGEN_` variables
    pub fn load<T: AsRef<Path>>(path: T) -> DocgenResult<Self> {
        let config = Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Docgen config")
    }
    fn data(&self) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, Error> {
        figment::providers::Serialized::defaults(self).data()
    }
}

impl ConfigOptions {
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        if self.heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}
