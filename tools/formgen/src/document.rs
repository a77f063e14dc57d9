use crate::error::FormError;
use crate::fields::render_section;
use crate::schema::FormSchema;
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Compiled-in stylesheet used when no theme file can be read.
const BUNDLED_STYLE: &str = include_str!("../templates/forms/terminal-theme.css");

/// Client scripts in load order, with whether each is required.
const SCRIPTS: [(&str, bool); 3] = [
    ("validation.js", false),
    ("conditional-logic.js", false),
    ("form-logic.js", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Terminal,
    Biopunk,
    Artdeco,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Terminal => "terminal",
            Theme::Biopunk => "biopunk",
            Theme::Artdeco => "artdeco",
        }
    }

    pub fn stylesheet(self) -> String {
        format!("{}-theme.css", self.name())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stylesheet and script text read from a templates directory.
#[derive(Debug, Clone)]
pub struct Assets {
    pub theme: Theme,
    pub css: String,
    pub scripts: String,
}

impl Assets {
    pub fn load(dir: &Path, requested: Theme) -> Result<Self, FormError> {
        let (theme, css) = load_style(dir, requested);
        let scripts = load_scripts(dir)?;
        Ok(Self {
            theme,
            css,
            scripts,
        })
    }
}

fn load_style(dir: &Path, requested: Theme) -> (Theme, String) {
    let mut candidates = vec![requested];
    if requested != Theme::Terminal {
        candidates.push(Theme::Terminal);
    }
    for theme in candidates {
        let path = dir.join(theme.stylesheet());
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                if theme != requested {
                    warn!(requested = %requested, "theme stylesheet missing, using terminal");
                }
                return (theme, css);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "could not read stylesheet"),
        }
    }
    warn!("no stylesheet in templates dir, using bundled terminal theme");
    (Theme::Terminal, BUNDLED_STYLE.to_string())
}

fn load_scripts(dir: &Path) -> Result<String, FormError> {
    let mut parts = Vec::with_capacity(SCRIPTS.len());
    for (name, required) in SCRIPTS {
        let path = dir.join(name);
        match std::fs::read_to_string(&path) {
            Ok(js) => parts.push(js),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    return Err(FormError::MissingAsset(path));
                }
                warn!(path = %path.display(), "optional script missing, skipping");
            }
            Err(source) => return Err(FormError::Read { path, source }),
        }
    }
    Ok(parts.join("\n\n"))
}

/// Placeholders the client scripts expect to be filled at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSlot {
    TotalQuestions,
    StorageKey,
    ExportFilename,
    ValidationPresets,
}

impl ScriptSlot {
    /// Fill order; presets last.
    pub const ALL: [ScriptSlot; 4] = [
        ScriptSlot::TotalQuestions,
        ScriptSlot::StorageKey,
        ScriptSlot::ExportFilename,
        ScriptSlot::ValidationPresets,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            ScriptSlot::TotalQuestions => "{{TOTAL_QUESTIONS}}",
            ScriptSlot::StorageKey => "{{STORAGE_KEY}}",
            ScriptSlot::ExportFilename => "{{EXPORT_FILENAME}}",
            ScriptSlot::ValidationPresets => "{{VALIDATION_PRESETS}}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptValues {
    total_questions: String,
    storage_key: String,
    export_filename: String,
    validation_presets: String,
}

impl ScriptValues {
    pub fn for_schema(schema: &FormSchema, today: NaiveDate) -> Self {
        let slug = title_slug(&schema.title);
        let validation_presets = schema
            .validation_presets
            .as_ref()
            .filter(|p| !p.is_null())
            .and_then(|p| serde_json::to_string(p).ok())
            .unwrap_or_else(|| "{}".to_string());
        Self {
            total_questions: schema.total_questions().to_string(),
            storage_key: format!("formgen-{slug}"),
            export_filename: format!("{}-{slug}.json", today.format("%Y-%m-%d")),
            validation_presets,
        }
    }

    pub fn value(&self, slot: ScriptSlot) -> &str {
        match slot {
            ScriptSlot::TotalQuestions => &self.total_questions,
            ScriptSlot::StorageKey => &self.storage_key,
            ScriptSlot::ExportFilename => &self.export_filename,
            ScriptSlot::ValidationPresets => &self.validation_presets,
        }
    }
}

pub fn title_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

pub fn fill_scripts(scripts: &str, values: &ScriptValues) -> String {
    ScriptSlot::ALL
        .iter()
        .fold(scripts.to_string(), |text, slot| {
            text.replace(slot.marker(), values.value(*slot))
        })
}

pub fn render_document(schema: &FormSchema, assets: &Assets, today: NaiveDate) -> String {
    let body = schema
        .sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n");
    let values = ScriptValues::for_schema(schema, today);
    let scripts = fill_scripts(&assets.scripts, &values);
    let description = schema.description.as_deref().unwrap_or("");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body>
  <div class="container">
    <header class="form-header">
      <h1>{title}</h1>
      <p class="subtitle">{description}</p>
      <p class="subtitle">Progress auto-saves. Export to JSON when done.</p>
      <div class="progress-bar" role="progressbar" aria-label="Form progress">
        <div class="progress-fill" id="progressFill"></div>
      </div>
      <div class="stats">
        <span><span id="progressPercent">0</span>% complete</span>
        <span><span id="answeredCount">0</span> / {total} answered</span>
        <span id="savedIndicator" class="saved-indicator"></span>
      </div>
    </header>

    <form id="form">
{body}
    </form>

    <div class="actions">
      <button type="button" id="saveBtn">Save Progress</button>
      <button type="button" id="exportBtn">Export JSON</button>
      <button type="button" id="clearBtn" class="danger">Clear All</button>
      <button type="button" id="printBtn">Print</button>
    </div>
  </div>

  <script>
{scripts}
  </script>
</body>
</html>
"#,
        title = schema.title,
        css = assets.css,
        total = values.value(ScriptSlot::TotalQuestions),
    )
}
