//
// A build runs in four steps, always in this order:
//
// the build directory is wiped and recreated, nothing from a previous run survives
//
// every record in the content directory is parsed, records without a content path get one
// discovered from their file name or are dropped
//
// the shared templates are read once
//
// each page is written to build/<name>/index.html with build/<name>/style.css next to it.
// a page whose markdown can't be read is skipped, anything else that goes wrong stops the run
//
use std::{fs, io, path::Path};

use crate::{
    build_config::BuildConfig,
    config::Config,
    error::{Error, Result},
    loader::load_configs,
    page::{PageBuilder, PageOutcome},
    templates::Templates,
};

/// the tally of a finished build
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Site {
    config: Config,
}

impl Site {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load_configs(&self) -> Result<Vec<BuildConfig>> {
        load_configs(
            &self.config.structure.content,
            &self.config.structure.includes,
            self.config.options.base_name,
        )
    }

    pub fn run(&self) -> Result<BuildSummary> {
        reset_output(&self.config.structure.build)?;
        let configs = self.load_configs()?;
        let templates = Templates::load(&self.config.structure.template)?;
        let summary = self.build_pages(&configs, &templates)?;
        log::info!(
            "Built {} page(s), skipped {}",
            summary.built,
            summary.skipped
        );
        Ok(summary)
    }

    fn build_pages(&self, configs: &[BuildConfig], templates: &Templates) -> Result<BuildSummary> {
        let builder = PageBuilder::new(&self.config, templates);
        let mut summary = BuildSummary::default();
        for config in configs {
            match builder.build(config)? {
                PageOutcome::Built(_) => summary.built += 1,
                PageOutcome::Skipped => summary.skipped += 1,
            }
        }
        Ok(summary)
    }
}

/// remove the output directory if it exists and create it again, empty
pub fn reset_output<T: AsRef<Path>>(out_dir: T) -> Result<()> {
    let path = out_dir.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(Error::ResetError {
                path: path.into(),
                source,
            })
        }
    }
    fs::create_dir_all(path).map_err(|source| Error::ResetError {
        path: path.into(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reset_clears_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build");
        fs::create_dir_all(out.join("stale")).unwrap();
        fs::write(out.join("stale/index.html"), "old").unwrap();

        reset_output(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn reset_creates_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/build");
        reset_output(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn reset_fails_when_a_file_is_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build");
        fs::write(&out, "not a directory").unwrap();
        assert!(matches!(
            reset_output(&out),
            Err(Error::ResetError { .. })
        ));
    }
}
