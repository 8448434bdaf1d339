//! Network parameter resolution.
//!
//! Precedence: explicit path → `HEREDITY_PARAMS` → XDG config dir →
//! embedded defaults.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::params::NetworkParams;
use crate::validate::ValidationError;

/// Environment variable naming a params.json file.
pub const PARAMS_ENV_VAR: &str = "HEREDITY_PARAMS";

/// Where the effective parameters came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    UserConfig(PathBuf),
    Embedded,
}

impl std::fmt::Display for ParamsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsSource::Explicit(p) => write!(f, "file {}", p.display()),
            ParamsSource::Environment(p) => write!(f, "${} ({})", PARAMS_ENV_VAR, p.display()),
            ParamsSource::UserConfig(p) => write!(f, "user config {}", p.display()),
            ParamsSource::Embedded => write!(f, "embedded defaults"),
        }
    }
}

/// Default location of a user-level params file.
pub fn user_params_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("heredity").join("params.json"))
}

/// Resolve and load the effective network parameters.
pub fn resolve_params(
    explicit: Option<&Path>,
) -> Result<(NetworkParams, ParamsSource), ValidationError> {
    let env_path = std::env::var_os(PARAMS_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    resolve_with(explicit, env_path, user_params_path())
}

fn resolve_with(
    explicit: Option<&Path>,
    env_path: Option<PathBuf>,
    user_path: Option<PathBuf>,
) -> Result<(NetworkParams, ParamsSource), ValidationError> {
    let source = if let Some(path) = explicit {
        ParamsSource::Explicit(path.to_path_buf())
    } else if let Some(path) = env_path {
        ParamsSource::Environment(path)
    } else if let Some(path) = user_path.filter(|p| p.exists()) {
        ParamsSource::UserConfig(path)
    } else {
        ParamsSource::Embedded
    };

    debug!(source = %source, "resolving network parameters");
    let params = match &source {
        ParamsSource::Explicit(p) | ParamsSource::Environment(p) | ParamsSource::UserConfig(p) => {
            NetworkParams::from_file(p)?
        }
        ParamsSource::Embedded => NetworkParams::default(),
    };
    Ok((params, source))
}
