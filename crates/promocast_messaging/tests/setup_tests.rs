use promocast_messaging::MessagingSetup;
mod fixtures;

use fixtures::{channel, FakeTransport, RecordingNotifier};

#[tokio::test]
async fn test_setup_twice_creates_one_channel_and_initializes_once() {
    let transport = FakeTransport::new();
    let notifier = RecordingNotifier::new();
    let setup = MessagingSetup::new(transport.clone(), notifier.clone(), channel());

    setup.setup("deals").await;
    setup.setup("deals").await;

    assert_eq!(notifier.channels().len(), 1);
    assert_eq!(transport.init_calls(), 1);
    assert!(setup.is_initialized());
    assert_eq!(transport.subscribed(), vec!["deals", "deals"]);
}

#[tokio::test]
async fn test_failed_initialization_does_not_stop_setup() {
    let transport = FakeTransport::failing_init(1);
    let notifier = RecordingNotifier::new();
    let setup = MessagingSetup::new(transport.clone(), notifier.clone(), channel());

    setup.setup("deals").await;

    assert!(!setup.is_initialized());
    assert_eq!(notifier.channels().len(), 1, "channel still created");
    assert_eq!(transport.subscribed(), vec!["deals"], "subscription still attempted");

    // The next setup retries initialization and then stops retrying.
    setup.setup("news").await;
    setup.setup("news").await;
    assert!(setup.is_initialized());
    assert_eq!(transport.init_calls(), 2);
}

#[tokio::test]
async fn test_channel_failure_does_not_stop_subscription() {
    let transport = FakeTransport::new();
    let setup = MessagingSetup::new(
        transport.clone(),
        RecordingNotifier::failing_channels(),
        channel(),
    );

    setup.setup("deals").await;

    assert_eq!(transport.subscribed(), vec!["deals"]);
}

#[tokio::test]
async fn test_subscription_failures_are_swallowed() {
    let transport = FakeTransport::failing_subscriptions();
    let setup = MessagingSetup::new(transport.clone(), RecordingNotifier::new(), channel());

    setup.setup("deals").await;
    setup.remove_subscription("deals").await;

    assert!(transport.subscribed().is_empty());
    assert!(transport.unsubscribed().is_empty());
}

#[tokio::test]
async fn test_remove_subscription() {
    let transport = FakeTransport::new();
    let setup = MessagingSetup::new(transport.clone(), RecordingNotifier::new(), channel());

    setup.remove_subscription("deals").await;

    assert_eq!(transport.unsubscribed(), vec!["deals"]);
    assert_eq!(transport.init_calls(), 0);
}
