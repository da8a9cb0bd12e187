use std::path::PathBuf;

pub(crate) const APP_DOTDIR_NAME: &str = ".bracket-hub";
pub(crate) const HOME_ENV_OVERRIDE: &str = "BRACKET_HUB_HOME";

pub(crate) fn app_data_dir() -> Result<PathBuf, String> {
    let dir = match std::env::var_os(HOME_ENV_OVERRIDE) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var_os("HOME")
                .ok_or_else(|| "failed to resolve home dir: HOME is not set".to_string())?;
            PathBuf::from(home).join(APP_DOTDIR_NAME)
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}
