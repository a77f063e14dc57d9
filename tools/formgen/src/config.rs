use std::path::{Path, PathBuf};

pub const TEMPLATES_DIR_ENV: &str = "FORMGEN_TEMPLATES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormgenConfig {
    pub templates_dir: PathBuf,
}

impl FormgenConfig {
    /// Resolve the templates directory: explicit flag, then
    /// `FORMGEN_TEMPLATES_DIR`, then `templates/forms` beside the executable,
    /// then the crate's bundled copy.
    pub fn from_env(flag: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self {
            templates_dir: resolve_templates_dir(
                flag,
                std::env::var(TEMPLATES_DIR_ENV).ok(),
                exe_dir.as_deref(),
            ),
        }
    }
}

pub fn resolve_templates_dir(
    flag: Option<PathBuf>,
    env_value: Option<String>,
    exe_dir: Option<&Path>,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = env_value.filter(|v| !v.trim().is_empty()) {
        return expand_tilde(dir.trim());
    }
    exe_dir
        .map(|dir| dir.join("templates").join("forms"))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(bundled_templates_dir)
}

pub fn bundled_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates").join("forms")
}

fn expand_tilde(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}
