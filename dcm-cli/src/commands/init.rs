//! `dcm init [--force]` — write a starter descriptor in the current directory.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

const TEMPLATE: &str = r#"{
  "version": "1.0",
  "projects": {
    "api": {
      "path": "./api",
      "description": "Backend API"
    },
    "web": {
      "path": "./web",
      "description": "Web frontend"
    }
  },
  "groups": {
    "dev": {
      "services": ["api", "web"]
    }
  }
}
"#;

/// Arguments for `dcm init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing workspace.json.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let path = cwd.join("workspace.json");
        if path.exists() && !self.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }

        std::fs::write(&path, TEMPLATE)
            .with_context(|| format!("failed to write {}", path.display()))?;

        println!("{} Created {}", "✓".green().bold(), path.display());
        println!("  Edit the projects, then run: dcm up dev");
        Ok(())
    }
}
