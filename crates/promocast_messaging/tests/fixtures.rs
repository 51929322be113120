//! Test fixtures for the messaging tests
//!
//! Fake platform ports that record what the pipeline does, plus helpers to
//! build payloads.

#![allow(dead_code)]

use promocast_common::models::{
    AppInfo, AppLookup, Bitmap, NotificationChannel, NotificationContent,
};
use promocast_common::services::{
    AppRegistry, BoxFuture, BoxedError, ImageFetcher, MessagingTransport, NotificationPort,
};
use promocast_config::ChannelImportance;
use promocast_messaging::composer::Composer;
use promocast_messaging::dispatcher::NotificationDispatcher;
use promocast_messaging::identity::NotificationIds;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};

pub const STORE_TEMPLATE: &str = "https://play.google.com/store/apps/details?id={package}";
pub const ICON_URL: &str = "http://x/i.png";
pub const FEATURE_URL: &str = "http://x/f.png";

/// Builds a raw payload map from key/value pairs
pub fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A complete payload; `feature` adds a feature image URL
pub fn payload_map(cross_promotion: bool, feature: bool) -> HashMap<String, String> {
    let mut map = raw(&[
        ("icon", ICON_URL),
        ("title", "Sale"),
        ("short_desc", "50% off"),
        ("package", "com.example.app"),
        ("crossPromotion", if cross_promotion { "true" } else { "false" }),
    ]);
    if feature {
        map.insert("feature".to_string(), FEATURE_URL.to_string());
    }
    map
}

pub fn png() -> Bitmap {
    Bitmap::new(vec![0x89, b'P', b'N', b'G'], "image/png")
}

pub fn channel() -> NotificationChannel {
    NotificationChannel {
        id: "promos".to_string(),
        name: "Promotions".to_string(),
        importance: ChannelImportance::Default,
    }
}

/// Notification port that records every call
pub struct RecordingNotifier {
    displays: Mutex<Vec<(i32, NotificationContent)>>,
    channels: Mutex<Vec<NotificationChannel>>,
    display_count: watch::Sender<usize>,
    fail_channels: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(false))
    }

    pub fn failing_channels() -> Arc<Self> {
        Arc::new(Self::build(true))
    }

    fn build(fail_channels: bool) -> Self {
        let (display_count, _) = watch::channel(0);
        Self {
            displays: Mutex::new(Vec::new()),
            channels: Mutex::new(Vec::new()),
            display_count,
            fail_channels,
        }
    }

    pub fn displays(&self) -> Vec<(i32, NotificationContent)> {
        self.displays.lock().unwrap().clone()
    }

    pub fn display_count(&self) -> usize {
        self.displays.lock().unwrap().len()
    }

    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.channels.lock().unwrap().clone()
    }

    /// Waits until at least `count` display calls happened
    pub async fn wait_for_displays(&self, count: usize) {
        let mut rx = self.display_count.subscribe();
        tokio::time::timeout(Duration::from_secs(5), async {
            while *rx.borrow_and_update() < count {
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await
        .expect("timed out waiting for display calls");
    }
}

impl NotificationPort for RecordingNotifier {
    fn display(&self, id: i32, content: &NotificationContent) {
        let count = {
            let mut displays = self.displays.lock().unwrap();
            displays.push((id, content.clone()));
            displays.len()
        };
        self.display_count.send_replace(count);
    }

    fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), BoxedError> {
        if self.fail_channels {
            return Err("channels unsupported".into());
        }
        let mut channels = self.channels.lock().unwrap();
        if !channels.iter().any(|existing| existing.id == channel.id) {
            channels.push(channel.clone());
        }
        Ok(())
    }
}

/// Image fetcher whose results are released by the test
#[derive(Default)]
pub struct GatedImages {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<Bitmap, String>>>>,
    requested: Mutex<Vec<String>>,
}

impl GatedImages {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `url`; the returned sender completes its fetch
    pub fn gate(&self, url: &str) -> oneshot::Sender<Result<Bitmap, String>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(url.to_string(), rx);
        tx
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ImageFetcher for GatedImages {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Bitmap, BoxedError> {
        self.requested.lock().unwrap().push(url.to_string());
        let gate = self.gates.lock().unwrap().remove(url);
        Box::pin(async move {
            let gate = gate.ok_or_else(|| BoxedError::from(format!("no gate for {}", url)))?;
            match gate.await {
                Ok(result) => result.map_err(BoxedError::from),
                Err(_) => Err("gate dropped".into()),
            }
        })
    }
}

/// Image fetcher answering immediately from a fixed table; unknown URLs fail
#[derive(Default)]
pub struct ScriptedImages {
    images: HashMap<String, Bitmap>,
    calls: AtomicUsize,
}

impl ScriptedImages {
    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn serving(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            images: urls.iter().map(|url| (url.to_string(), png())).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageFetcher for ScriptedImages {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Bitmap, BoxedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .images
            .get(url)
            .cloned()
            .ok_or_else(|| BoxedError::from(format!("404 for {}", url)));
        Box::pin(async move { result })
    }
}

/// App registry over a fixed set of installed apps
#[derive(Default)]
pub struct FakeRegistry {
    apps: HashMap<String, AppInfo>,
}

impl FakeRegistry {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_installed(package: &str) -> Arc<Self> {
        let mut apps = HashMap::new();
        apps.insert(
            package.to_string(),
            AppInfo {
                package: package.to_string(),
                enabled: true,
                launch_activity: Some(format!("{}/.MainActivity", package)),
            },
        );
        Arc::new(Self { apps })
    }
}

impl AppRegistry for FakeRegistry {
    fn lookup(&self, package: &str) -> AppLookup {
        self.apps
            .get(package)
            .cloned()
            .map(AppLookup::Found)
            .unwrap_or(AppLookup::NotFound)
    }
}

/// Messaging transport that counts calls and can be told to fail
#[derive(Default)]
pub struct FakeTransport {
    pub init_failures_left: AtomicUsize,
    pub init_calls: AtomicUsize,
    pub fail_subscriptions: bool,
    pub subscribed: Mutex<Vec<String>>,
    pub unsubscribed: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_init(times: usize) -> Arc<Self> {
        Arc::new(Self {
            init_failures_left: AtomicUsize::new(times),
            ..Default::default()
        })
    }

    pub fn failing_subscriptions() -> Arc<Self> {
        Arc::new(Self {
            fail_subscriptions: true,
            ..Default::default()
        })
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn subscribed(&self) -> Vec<String> {
        self.subscribed.lock().unwrap().clone()
    }

    pub fn unsubscribed(&self) -> Vec<String> {
        self.unsubscribed.lock().unwrap().clone()
    }
}

impl MessagingTransport for FakeTransport {
    fn initialize(&self) -> BoxFuture<'_, (), BoxedError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .init_failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        Box::pin(async move {
            if failed {
                Err("firebase unavailable".into())
            } else {
                Ok(())
            }
        })
    }

    fn subscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async move {
            if self.fail_subscriptions {
                return Err("subscribe refused".into());
            }
            self.subscribed.lock().unwrap().push(topic.to_string());
            Ok(())
        })
    }

    fn unsubscribe<'a>(&'a self, topic: &'a str) -> BoxFuture<'a, (), BoxedError> {
        Box::pin(async move {
            if self.fail_subscriptions {
                return Err("unsubscribe refused".into());
            }
            self.unsubscribed.lock().unwrap().push(topic.to_string());
            Ok(())
        })
    }
}

/// Dispatcher wired to the given fakes
pub fn dispatcher(
    notifier: Arc<RecordingNotifier>,
    images: Arc<dyn ImageFetcher>,
    registry: Arc<FakeRegistry>,
) -> NotificationDispatcher {
    let composer = Composer::new(notifier, images, "promos");
    NotificationDispatcher::new(
        Arc::new(composer),
        registry,
        NotificationIds::time_seeded(),
        STORE_TEMPLATE,
    )
}
