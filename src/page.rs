use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use pulldown_cmark::{Options, Parser};

use crate::{
    build_config::BuildConfig,
    config::{Config, ConfigOptions},
    error::{Error, Result},
    templates::Templates,
};

pub const INDEX_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "style.css";

/// what happened to a single page
#[derive(Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// written to the contained directory
    Built(PathBuf),
    /// content could not be loaded, nothing was written
    Skipped,
}

/// writes pages into the build directory using the shared templates
pub struct PageBuilder<'a> {
    templates: &'a Templates,
    includes: &'a Path,
    build: &'a Path,
    options: &'a ConfigOptions,
    parser_options: Options,
}

impl<'a> PageBuilder<'a> {
    pub fn new(config: &'a Config, templates: &'a Templates) -> Self {
        Self {
            templates,
            includes: &config.structure.includes,
            build: &config.structure.build,
            options: &config.options,
            parser_options: config.options.options(),
        }
    }

    pub fn build(&self, page: &BuildConfig) -> Result<PageOutcome> {
        log::info!("Preparing to build config `{}`", page.config_name);
        let content_path = under_root(self.includes, &page.content_path);
        let content = match fs::read(&content_path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!(
                    "Failed to load include `{}` for config `{}`: `{err}`, skipping",
                    page.content_path,
                    page.config_name
                );
                return Ok(PageOutcome::Skipped);
            }
        };

        let header = self
            .templates
            .header_for(&self.options.placeholder, &page.title);
        let html = render_markdown(&content, self.parser_options);

        let out_dir = self.build.join(page.output_name(self.options.base_name));
        fs::create_dir(&out_dir).map_err(|source| Error::PageDirError {
            config: page.config_name.clone(),
            path: out_dir.clone(),
            source,
        })?;

        let index = [header.as_slice(), html.as_bytes(), self.templates.footer.as_slice()].concat();
        write(out_dir.join(INDEX_FILE), index)?;
        write(out_dir.join(STYLE_FILE), self.templates.stylesheet())?;

        log::info!("Successfully built config `{}`", page.config_name);
        Ok(PageOutcome::Built(out_dir))
    }
}

/// markdown bytes to an html fragment, invalid utf-8 is replaced rather than rejected
pub fn render_markdown(content: &[u8], options: Options) -> String {
    let text = String::from_utf8_lossy(content);
    let parser = Parser::new_ext(&text, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// join `rel` onto `root` keeping only its plain components, so the result can't leave `root`
pub fn under_root<T: AsRef<Path>>(root: &Path, rel: T) -> PathBuf {
    let mut path = root.to_path_buf();
    for component in rel.as_ref().components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}

fn write(path: PathBuf, contents: Vec<u8>) -> Result<()> {
    fs::write(&path, contents).map_err(|source| Error::WriteError { path, source })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ConfigStructure;

    fn site() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            structure: ConfigStructure::rooted_at(dir.path()),
            ..Default::default()
        };
        fs::create_dir(&config.structure.includes).unwrap();
        fs::create_dir(&config.structure.build).unwrap();
        (dir, config)
    }

    fn page(name: &str, title: &str, content: &str) -> BuildConfig {
        BuildConfig {
            title: title.into(),
            content_path: content.into(),
            config_name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_rendering_enables_common_extensions() {
        let markdown = b"| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~ -- \"q\"\n";
        let html = render_markdown(markdown, ConfigOptions::default().options());
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("\u{2013}"));
        assert!(html.contains("\u{201c}q\u{201d}"));
    }

    #[test]
    fn plain_rendering_without_extensions() {
        let html = render_markdown(b"# Title\n\n~~old~~ | a |\n", Options::empty());
        assert!(html.starts_with("<h1>Title</h1>"));
        assert!(html.contains("~~old~~"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn content_paths_stay_under_the_root() {
        let root = Path::new("site/includes");
        assert_eq!(under_root(root, "a/b.md"), root.join("a/b.md"));
        assert_eq!(under_root(root, "/etc/b.md"), root.join("etc/b.md"));
        assert_eq!(under_root(root, "../../b.md"), root.join("b.md"));
        assert_eq!(under_root(root, "./b.md"), root.join("b.md"));
    }

    #[test]
    fn builds_index_and_stylesheet() {
        let (_dir, config) = site();
        fs::write(config.structure.includes.join("hello.md"), "Some *text*").unwrap();
        let templates = Templates {
            header: b"<title>||PAGE_TITLE||</title><h1>||PAGE_TITLE||</h1>".to_vec(),
            footer: b"<footer/>".to_vec(),
            normalize: b"a{}".to_vec(),
            style: b"b{}".to_vec(),
        };
        let builder = PageBuilder::new(&config, &templates);

        let outcome = builder
            .build(&page("hello.page.yaml", "Hello", "hello.md"))
            .unwrap();

        let out = config.structure.build.join("hello");
        assert_eq!(outcome, PageOutcome::Built(out.clone()));
        assert_eq!(
            fs::read_to_string(out.join(INDEX_FILE)).unwrap(),
            "<title>Hello</title><h1>Hello</h1><p>Some <em>text</em></p>\n<footer/>"
        );
        assert_eq!(fs::read_to_string(out.join(STYLE_FILE)).unwrap(), "a{}b{}");
    }

    #[test]
    fn missing_content_is_skipped() {
        let (_dir, config) = site();
        let templates = Templates::default();
        let builder = PageBuilder::new(&config, &templates);
        let outcome = builder.build(&page("gone.yaml", "Gone", "gone.md")).unwrap();
        assert_eq!(outcome, PageOutcome::Skipped);
        assert!(!config.structure.build.join("gone").exists());
    }

    #[test]
    fn occupied_output_directory_is_an_error() {
        let (_dir, config) = site();
        fs::write(config.structure.includes.join("x.md"), "x").unwrap();
        fs::write(config.structure.build.join("x"), "in the way").unwrap();
        let templates = Templates::default();
        let builder = PageBuilder::new(&config, &templates);
        let err = builder.build(&page("x.yaml", "X", "x.md")).unwrap_err();
        match err {
            Error::PageDirError { config, path, .. } => {
                assert_eq!(config, "x.yaml");
                assert!(path.ends_with("x"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
