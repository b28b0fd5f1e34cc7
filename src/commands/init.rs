//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: Anonymous

# Directory
content_dir: content/posts
public_dir: public
static_dir: static

# Writing
render_drafts: false
excerpt_length: 140
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Post index order: date (newest first) or source
order: date

# Preview server
server:
  ip: localhost
  port: 4000
"#;

const SAMPLE_POST: &str = r#"---
path: "/hello-world"
date: "2020-01-01"
title: "Hello World"
author: "Anonymous"
---

Welcome to your new blog. Edit or delete this post, then run `postbook generate`.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a blog", target_dir);
    }

    let defaults = SiteConfig::default();
    let content_dir = target_dir.join(&defaults.content_dir);
    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(target_dir.join(&defaults.static_dir))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(content_dir.join("hello-world.md"), SAMPLE_POST)?;

    tracing::info!("Initialized blog in {:?}", target_dir);
    Ok(())
}
