//! YAML form definitions to self-contained HTML documents.
//!
//! [`generate_form`] runs the whole pipeline: load and validate the schema,
//! render each section, embed the theme stylesheet and form scripts, and
//! write the document.

pub mod config;
pub mod document;
pub mod error;
pub mod fields;
pub mod markup;
pub mod schema;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub use document::{render_document, Assets, Theme};
pub use error::FormError;
pub use schema::{load_schema, parse_schema, FormSchema};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub theme: Theme,
    pub templates_dir: PathBuf,
    /// Date stamped into the export filename.
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub output: PathBuf,
    /// Theme actually applied, after any stylesheet fallback.
    pub theme: Theme,
}

pub fn generate_form(opts: &GenerateOptions) -> Result<Generated, FormError> {
    let schema = load_schema(&opts.input)?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&opts.input));

    let assets = Assets::load(&opts.templates_dir, opts.theme)?;
    let html = render_document(&schema, &assets, opts.today);

    let write_err = |source| FormError::Write {
        path: output.clone(),
        source,
    };
    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    std::fs::write(&output, html).map_err(write_err)?;

    tracing::debug!(output = %output.display(), theme = %assets.theme, "form written");
    Ok(Generated {
        output,
        theme: assets.theme,
    })
}

/// `forms/intake.yaml` becomes `forms/intake.html`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SCHEMA: &str = r#"
title: Deploy Review
description: Pick a target
sections:
  - name: Basics
    questions:
      - id: target
        title: Where should it run?
        type: radio
        options:
          - { value: cloud, label: Cloud }
          - { value: local, label: Local }
"#;

    fn templates(dir: &Path) -> PathBuf {
        let forms = dir.join("forms");
        fs::create_dir_all(&forms).unwrap();
        fs::write(forms.join("terminal-theme.css"), "body { color: green; }").unwrap();
        fs::write(forms.join("form-logic.js"), "const KEY = '{{STORAGE_KEY}}';").unwrap();
        forms
    }

    fn options(dir: &Path, theme: Theme) -> GenerateOptions {
        let input = dir.join("deploy.yaml");
        fs::write(&input, SCHEMA).unwrap();
        GenerateOptions {
            input,
            output: None,
            theme,
            templates_dir: templates(dir),
            today: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
        }
    }

    #[test]
    fn writes_next_to_input_by_default() {
        let tmp = tempfile::tempdir().unwrap();
        let generated = generate_form(&options(tmp.path(), Theme::Terminal)).unwrap();
        assert_eq!(generated.output, tmp.path().join("deploy.html"));
        let html = fs::read_to_string(&generated.output).unwrap();
        assert!(html.contains("<title>Deploy Review</title>"));
        assert!(html.contains("const KEY = 'formgen-deploy-review';"));
    }

    #[test]
    fn creates_output_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path(), Theme::Terminal);
        opts.output = Some(tmp.path().join("out/nested/form.html"));
        let generated = generate_form(&opts).unwrap();
        assert!(generated.output.is_file());
    }

    #[test]
    fn reports_fallback_theme() {
        let tmp = tempfile::tempdir().unwrap();
        let generated = generate_form(&options(tmp.path(), Theme::Artdeco)).unwrap();
        assert_eq!(generated.theme, Theme::Terminal);
    }

    #[test]
    fn invalid_schema_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = options(tmp.path(), Theme::Terminal);
        fs::write(&opts.input, "title: Broken\nsections:\n  - name: Empty\n    questions: []\n")
            .unwrap();
        let err = generate_form(&opts).unwrap_err();
        assert_eq!(err.to_string(), "Section 'Empty' has no questions");
        assert!(!tmp.path().join("deploy.html").exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let mut opts = options(tmp.path(), Theme::Terminal);
        opts.input = tmp.path().join("nope.yaml");
        assert!(matches!(
            generate_form(&opts).unwrap_err(),
            FormError::NotFound(_)
        ));
    }

    #[test]
    fn default_output_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("forms/intake.yaml")),
            PathBuf::from("forms/intake.html")
        );
        assert_eq!(
            default_output_path(Path::new("intake")),
            PathBuf::from("intake.html")
        );
    }
}
