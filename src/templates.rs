use std::{fs, io, path::Path};

use crate::error::{Error, Result};

pub const HEADER: &str = "header.html";
pub const FOOTER: &str = "footer.html";
pub const NORMALIZE: &str = "normalize.css";
pub const STYLE: &str = "style.css";

/// the shared pieces every page is assembled from, read once per build
#[derive(Debug, Default, Clone)]
pub struct Templates {
    pub header: Vec<u8>,
    pub footer: Vec<u8>,
    pub normalize: Vec<u8>,
    pub style: Vec<u8>,
}

impl Templates {
    pub fn load<T: AsRef<Path>>(template_dir: T) -> Result<Self> {
        let dir = template_dir.as_ref();
        Ok(Self {
            header: read_template(dir, HEADER)?,
            footer: read_template(dir, FOOTER)?,
            normalize: read_template(dir, NORMALIZE)?,
            style: read_template(dir, STYLE)?,
        })
    }

    /// a fresh copy of the header with every `placeholder` replaced by `title`
    pub fn header_for(&self, placeholder: &str, title: &str) -> Vec<u8> {
        replace_all(&self.header, placeholder.as_bytes(), title.as_bytes())
    }

    /// the stylesheet written next to every page
    pub fn stylesheet(&self) -> Vec<u8> {
        [self.normalize.as_slice(), self.style.as_slice()].concat()
    }
}

// a missing template is treated as empty
fn read_template(dir: &Path, name: &str) -> Result<Vec<u8>> {
    let path = dir.join(name);
    match fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("Template `{path:?}` not found, using an empty one");
            Ok(Vec::new())
        }
        Err(source) => Err(Error::TemplateError { path, source }),
    }
}

/// replace every non-overlapping occurrence of `from`, left to right
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    if from.is_empty() {
        return haystack.to_vec();
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(idx) = rest.windows(from.len()).position(|w| w == from) {
        out.extend_from_slice(&rest[..idx]);
        out.extend_from_slice(to);
        rest = &rest[idx + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}

#[cfg(test)]
mod test {
    use super::*;

    const TOKEN: &str = "||PAGE_TITLE||";

    #[test]
    fn replaces_every_occurrence() {
        let templates = Templates {
            header: b"<title>||PAGE_TITLE||</title><h1>||PAGE_TITLE||</h1>".to_vec(),
            ..Default::default()
        };
        assert_eq!(
            templates.header_for(TOKEN, "Hello"),
            b"<title>Hello</title><h1>Hello</h1>"
        );
        // the shared header is left untouched
        assert!(templates.header.starts_with(b"<title>||PAGE_TITLE||"));
    }

    #[test]
    fn header_without_placeholder() {
        let templates = Templates {
            header: b"<header></header>".to_vec(),
            ..Default::default()
        };
        assert_eq!(templates.header_for(TOKEN, "Hello"), b"<header></header>");
    }

    #[test]
    fn empty_placeholder_disables_substitution() {
        let templates = Templates {
            header: b"abc".to_vec(),
            ..Default::default()
        };
        assert_eq!(templates.header_for("", "x"), b"abc");
    }

    #[test]
    fn title_containing_the_token_is_not_rescanned() {
        assert_eq!(replace_all(b"[T][T]", b"[T]", b"[T]!"), b"[T]![T]!");
        assert_eq!(replace_all(b"aaaa", b"aa", b"b"), b"bb");
    }

    #[test]
    fn stylesheet_concatenates_without_separator() {
        let templates = Templates {
            normalize: b"html{}".to_vec(),
            style: b"body{}".to_vec(),
            ..Default::default()
        };
        assert_eq!(templates.stylesheet(), b"html{}body{}");
    }

    #[test]
    fn load_reads_all_parts_and_tolerates_missing_ones() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HEADER), "<h>").unwrap();
        fs::write(dir.path().join(FOOTER), "<f>").unwrap();
        fs::write(dir.path().join(STYLE), "s{}").unwrap();
        let templates = Templates::load(dir.path()).unwrap();
        assert_eq!(templates.header, b"<h>");
        assert_eq!(templates.footer, b"<f>");
        assert!(templates.normalize.is_empty());
        assert_eq!(templates.style, b"s{}");
    }
}
