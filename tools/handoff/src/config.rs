use std::env;
use std::path::{Path, PathBuf};

/// File name of the handoff template, looked up next to the executable.
const TEMPLATE_FILE: &str = "handoff.md.template";

/// Overrides the template location.
const TEMPLATE_ENV: &str = "HANDOFF_TEMPLATE";

#[derive(Clone, Debug)]
pub struct HandoffConfig {
    pub template_path: PathBuf,
}

impl HandoffConfig {
    pub fn from_env() -> Self {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self {
            template_path: resolve_template_path(env::var(TEMPLATE_ENV).ok(), exe_dir.as_deref()),
        }
    }
}

/// Env override first, then a template installed beside the binary, then the
/// one bundled with the crate sources.
pub fn resolve_template_path(env_value: Option<String>, exe_dir: Option<&Path>) -> PathBuf {
    if let Some(val) = env_value.filter(|v| !v.trim().is_empty()) {
        return expand_tilde(&val);
    }
    if let Some(candidate) = exe_dir.map(|dir| dir.join(TEMPLATE_FILE)) {
        if candidate.is_file() {
            return candidate;
        }
    }
    bundled_template_path()
}

pub fn bundled_template_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(TEMPLATE_FILE)
}

fn expand_tilde(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}
