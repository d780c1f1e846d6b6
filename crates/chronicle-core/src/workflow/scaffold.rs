//! Changeset directory scaffolding

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;

/// Name of the reserved README inside the changeset directory
pub const RECORDS_README: &str = "README.md";

/// Contents of the generated changeset README
pub const RECORDS_README_TEMPLATE: &str = r#"# Changesets

This directory holds changeset records. Each record is a Markdown file that
describes one change and how it affects the next version:

```
---
type: minor
---

Add a new option for users.
```

`type` must be one of `major`, `minor` or `patch`. The file name (without
`.md`) identifies the record. Records are never deleted: once a version tag
includes a record it is attributed to that version and no longer pending.

Create a record with `chronicle add`.
"#;

/// What scaffolding created
#[derive(Debug, Clone, Default)]
pub struct ScaffoldResult {
    /// Paths that were written
    pub created: Vec<PathBuf>,
    /// Paths that already existed and were left untouched
    pub skipped: Vec<PathBuf>,
}

/// Create the changeset directory and its README under `root`
pub fn scaffold_changeset_dir(root: &Path, config: &Config, force: bool) -> Result<ScaffoldResult> {
    let dir = root.join(&config.changeset.directory);
    let mut result = ScaffoldResult::default();

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        info!(path = %dir.display(), "created changeset directory");
        result.created.push(dir.clone());
    }

    let readme = dir.join(RECORDS_README);
    if readme.exists() && !force {
        debug!(path = %readme.display(), "changeset README already present");
        result.skipped.push(readme);
    } else {
        std::fs::write(&readme, RECORDS_README_TEMPLATE)?;
        info!(path = %readme.display(), "wrote changeset README");
        result.created.push(readme);
    }

    Ok(result)
}
