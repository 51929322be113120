//! App registry backed by configuration.

use std::collections::HashMap;

use promocast_common::models::{AppInfo, AppLookup};
use promocast_common::services::AppRegistry;
use promocast_config::InstalledApp;

/// Answers app lookups from the `apps` section of the configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredAppRegistry {
    apps: HashMap<String, AppInfo>,
}

impl ConfiguredAppRegistry {
    pub fn new(apps: &[InstalledApp]) -> Self {
        let apps = apps
            .iter()
            .map(|app| {
                (
                    app.package.clone(),
                    AppInfo {
                        package: app.package.clone(),
                        enabled: app.enabled,
                        launch_activity: app.launch_activity.clone(),
                    },
                )
            })
            .collect();

        Self { apps }
    }
}

impl AppRegistry for ConfiguredAppRegistry {
    fn lookup(&self, package: &str) -> AppLookup {
        self.apps
            .get(package)
            .cloned()
            .map(AppLookup::Found)
            .unwrap_or(AppLookup::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_reflects_configuration() {
        let registry = ConfiguredAppRegistry::new(&[InstalledApp {
            package: "com.example.app".to_string(),
            enabled: false,
            launch_activity: Some("com.example.app/.Main".to_string()),
        }]);

        match registry.lookup("com.example.app") {
            AppLookup::Found(info) => assert!(!info.enabled),
            AppLookup::NotFound => panic!("configured app not found"),
        }
        assert_eq!(registry.lookup("com.other.app"), AppLookup::NotFound);
    }
}
