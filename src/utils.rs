use std::{fs, io, path::Path};

use crate::{
    config::{ConfigStructure, CONFIG_FILE},
    templates::{FOOTER, HEADER, NORMALIZE, STYLE},
};

const SAMPLE_CONFIG: &str = "title: Hello\ncategory: general\npostDate: 2024-01-01\npublishDate: 2024-01-01\n";
const SAMPLE_PAGE: &str = "# Hello\n\nThis page was built from `includes/hello.md`.\n";
const SAMPLE_HEADER: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>||PAGE_TITLE||</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<h1>||PAGE_TITLE||</h1>
"#;
const SAMPLE_FOOTER: &str = "</body>\n</html>\n";
const SAMPLE_NORMALIZE: &str = "html { line-height: 1.15; }\nbody { margin: 0; }\n";
const SAMPLE_STYLE: &str = "body { max-width: 48rem; margin: 0 auto; font-family: sans-serif; }\n";
const SAMPLE_SITE_CONFIG: &str = r#"[structure]
content = "content"
includes = "includes"
template = "template"
build = "build"

[options]
placeholder = "||PAGE_TITLE||"
base_name = "first_segment"
"#;

/// create a new minimal site in a new directory `name`
pub fn create_new<T: AsRef<Path>>(name: T) -> io::Result<()> {
    let root = name.as_ref();
    fs::create_dir(root)?;
    let structure = ConfigStructure::rooted_at(root);
    fs::create_dir(&structure.content)?;
    fs::create_dir(&structure.includes)?;
    fs::create_dir(&structure.template)?;

    fs::write(root.join(CONFIG_FILE), SAMPLE_SITE_CONFIG)?;
    fs::write(structure.content.join("hello.yaml"), SAMPLE_CONFIG)?;
    fs::write(structure.includes.join("hello.md"), SAMPLE_PAGE)?;
    fs::write(structure.template.join(HEADER), SAMPLE_HEADER)?;
    fs::write(structure.template.join(FOOTER), SAMPLE_FOOTER)?;
    fs::write(structure.template.join(NORMALIZE), SAMPLE_NORMALIZE)?;
    fs::write(structure.template.join(STYLE), SAMPLE_STYLE)?;
    log::info!("Created new site in `{root:?}`");
    Ok(())
}
