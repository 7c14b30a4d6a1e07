use std::{fs, io, path::Path};

use crate::{
    build_config::{base_name, BuildConfig},
    config::BaseName,
    error::{Error, Result},
};

/// read every config record in `content_dir`, resolving missing content paths against
/// `includes_dir`
///
/// records whose content can't be discovered are dropped, a record that can't be read or
/// parsed fails the whole load
pub fn load_configs<C, I>(content_dir: C, includes_dir: I, rule: BaseName) -> Result<Vec<BuildConfig>>
where
    C: AsRef<Path>,
    I: AsRef<Path>,
{
    let content_dir = content_dir.as_ref();
    let includes_dir = includes_dir.as_ref();

    let mut entries = match fs::read_dir(content_dir) {
        Ok(entries) => entries.collect::<io::Result<Vec<_>>>()?,
        Err(err) => {
            log::warn!("Unable to read config directory `{content_dir:?}`: `{err}`");
            return Ok(Vec::new());
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    log::info!("Iterating configuration files...");
    let mut configs = Vec::new();
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = fs::read(entry.path()).map_err(|source| Error::ConfigReadError {
            path: entry.path(),
            source,
        })?;
        let mut config = BuildConfig::parse(&name, &bytes)?;

        if config.content_path.is_empty() {
            match discover(&name, includes_dir, rule) {
                Some(found) => config.content_path = found,
                None => continue,
            }
        }

        config.config_name = name;
        configs.push(config);
    }
    Ok(configs)
}

/// look for `<base name>.md` in the includes directory
fn discover(config_name: &str, includes_dir: &Path, rule: BaseName) -> Option<String> {
    log::info!("No content path defined in config file `{config_name}`, attempting auto discovery");
    let discover_name = format!("{}.md", base_name(config_name, rule));
    log::debug!("Searching includes for content file `{discover_name}`");

    match fs::metadata(includes_dir.join(&discover_name)) {
        Ok(_) => {
            log::info!(
                "Content auto-discover successful for config file `{config_name}`, located include `{discover_name}`"
            );
            Some(discover_name)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("Unable to auto discover content for config file `{config_name}`, skipping");
            None
        }
        Err(err) => {
            log::warn!(
                "Error during content discovery for config file `{config_name}`: `{err}`, skipping"
            );
            None
        }
    }
}
