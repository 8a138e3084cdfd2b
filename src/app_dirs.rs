use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "unscramble";

/// Where the config file and the log live. Falls back to the working
/// directory when the platform has no home to resolve against.
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}_config.json")))
    }

    /// Prefers the XDG state dir (Linux) and otherwise the local data dir.
    pub fn log_path() -> PathBuf {
        Self::project()
            .map(|pd| {
                pd.state_dir()
                    .unwrap_or_else(|| pd.data_local_dir())
                    .join(format!("{APP_NAME}.log"))
            })
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}.log")))
    }
}
