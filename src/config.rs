use crate::device::DeviceState;
use anyhow::{Context, Result};
use ini::Ini;
use std::{env, path::Path, sync::OnceLock};

/// Static page configuration.
#[derive(Clone, Debug)]
pub struct PageConfig {
    /// Title shown when the page is (re)built.
    pub title: String,
    /// State the simulated device starts out in.
    pub initial_state: DeviceState,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            title: "Device Provisioning".to_string(),
            initial_state: DeviceState::Unknown,
        }
    }
}

impl PageConfig {
    /// Get or load the page configuration.
    ///
    /// Loaded once from the INI file named by the `PAGE_CONFIG` environment
    /// variable, defaults otherwise. Subsequent calls return the cached
    /// instance.
    ///
    /// # Panics
    /// Panics if the configured file cannot be loaded; the page cannot come
    /// up without its configuration.
    pub fn get() -> &'static Self {
        static PAGE_CONFIG: OnceLock<PageConfig> = OnceLock::new();
        PAGE_CONFIG
            .get_or_init(|| Self::load_internal().expect("failed to load page configuration"))
    }

    fn load_internal() -> Result<Self> {
        match env::var("PAGE_CONFIG") {
            Ok(path) => Self::from_ini_file(Path::new(&path)),
            Err(_) => Ok(PageConfig::default()),
        }
    }

    fn from_ini_file(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to load page config {path:?}"))?;

        let mut config = PageConfig::default();

        if let Some(section) = ini.section(Some("page")) {
            if let Some(title) = section.get("Title") {
                config.title = title.to_string();
            }
        }

        if let Some(section) = ini.section(Some("device")) {
            if let Some(state) = section.get("InitialState") {
                config.initial_state = DeviceState::from(state);
            }
        }

        Ok(config)
    }
}
