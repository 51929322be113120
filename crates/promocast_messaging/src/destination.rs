//! Click-through destination resolution.

use promocast_common::models::{AppLookup, ClickAction, LaunchTarget};
use promocast_common::services::AppRegistry;
use tracing::debug;

/// Placeholder replaced with the app identifier in store URL templates.
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Decides whether a tap opens the target app or its store listing.
pub struct DestinationResolver<'a> {
    registry: &'a dyn AppRegistry,
    store_url_template: &'a str,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(registry: &'a dyn AppRegistry, store_url_template: &'a str) -> Self {
        Self {
            registry,
            store_url_template,
        }
    }

    /// `OpenApp` when the registry reports the app installed, enabled and
    /// launchable; `OpenStoreListing` in every other case.
    pub fn resolve(&self, target_app: &str) -> LaunchTarget {
        self.lookup(target_app).0
    }

    /// Resolve and turn the target into the click action attached to the
    /// notification. The registry is consulted once.
    pub fn click_action(&self, target_app: &str) -> ClickAction {
        let (target, launch_activity) = self.lookup(target_app);
        let uri = match (&target, launch_activity) {
            (LaunchTarget::OpenApp(_), Some(activity)) => activity,
            (LaunchTarget::OpenApp(package), None) => package.clone(),
            (LaunchTarget::OpenStoreListing(package), _) => {
                store_listing_url(self.store_url_template, package)
            }
        };

        ClickAction { target, uri }
    }

    fn lookup(&self, target_app: &str) -> (LaunchTarget, Option<String>) {
        match self.registry.lookup(target_app) {
            AppLookup::Found(info) if info.enabled && info.launch_activity.is_some() => (
                LaunchTarget::OpenApp(target_app.to_string()),
                info.launch_activity,
            ),
            AppLookup::Found(info) => {
                debug!(
                    "App {} installed but not launchable (enabled: {})",
                    target_app, info.enabled
                );
                (LaunchTarget::OpenStoreListing(target_app.to_string()), None)
            }
            AppLookup::NotFound => (LaunchTarget::OpenStoreListing(target_app.to_string()), None),
        }
    }
}

/// Render the store listing URL for `package`.
pub fn store_listing_url(template: &str, package: &str) -> String {
    template.replace(PACKAGE_PLACEHOLDER, package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promocast_common::models::AppInfo;
    use std::collections::HashMap;

    struct MapRegistry(HashMap<&'static str, AppInfo>);

    impl AppRegistry for MapRegistry {
        fn lookup(&self, package: &str) -> AppLookup {
            self.0
                .get(package)
                .cloned()
                .map(AppLookup::Found)
                .unwrap_or(AppLookup::NotFound)
        }
    }

    fn registry() -> MapRegistry {
        let mut apps = HashMap::new();
        apps.insert(
            "installed.app",
            AppInfo {
                package: "installed.app".to_string(),
                enabled: true,
                launch_activity: Some("installed.app/.Main".to_string()),
            },
        );
        apps.insert(
            "disabled.app",
            AppInfo {
                package: "disabled.app".to_string(),
                enabled: false,
                launch_activity: Some("disabled.app/.Main".to_string()),
            },
        );
        apps.insert(
            "headless.app",
            AppInfo {
                package: "headless.app".to_string(),
                enabled: true,
                launch_activity: None,
            },
        );
        MapRegistry(apps)
    }

    const TEMPLATE: &str = "https://play.google.com/store/apps/details?id={package}";

    #[test]
    fn test_installed_app_opens_app() {
        let registry = registry();
        let resolver = DestinationResolver::new(&registry, TEMPLATE);

        assert_eq!(
            resolver.resolve("installed.app"),
            LaunchTarget::OpenApp("installed.app".to_string())
        );
    }

    #[test]
    fn test_missing_app_opens_store_listing() {
        let registry = registry();
        let resolver = DestinationResolver::new(&registry, TEMPLATE);

        assert_eq!(
            resolver.resolve("missing.app"),
            LaunchTarget::OpenStoreListing("missing.app".to_string())
        );
    }

    #[test]
    fn test_disabled_or_unlaunchable_app_opens_store_listing() {
        let registry = registry();
        let resolver = DestinationResolver::new(&registry, TEMPLATE);

        for package in ["disabled.app", "headless.app"] {
            assert_eq!(
                resolver.resolve(package),
                LaunchTarget::OpenStoreListing(package.to_string())
            );
        }
    }

    #[test]
    fn test_click_action_uris() {
        let registry = registry();
        let resolver = DestinationResolver::new(&registry, TEMPLATE);

        assert_eq!(resolver.click_action("installed.app").uri, "installed.app/.Main");
        assert_eq!(
            resolver.click_action("missing.app").uri,
            "https://play.google.com/store/apps/details?id=missing.app"
        );
    }
}
