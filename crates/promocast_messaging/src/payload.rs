//! Inbound payload validation.
//!
//! The push transport hands over a flat string map. [`validate`] turns it into
//! a [`NotificationPayload`] or says why no notification should be shown.

use std::collections::HashMap;

use crate::error::PayloadRejection;

/// Payload keys as sent by the push backend.
pub mod keys {
    pub const ICON: &str = "icon";
    pub const TITLE: &str = "title";
    pub const SHORT_DESC: &str = "short_desc";
    pub const FEATURE: &str = "feature";
    pub const LONG_DESC: &str = "long_desc";
    pub const PACKAGE: &str = "package";
    pub const CROSS_PROMOTION: &str = "crossPromotion";
}

/// A validated push payload. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub icon: String,
    pub title: String,
    pub short_desc: String,
    pub feature_image: Option<String>,
    pub long_desc: Option<String>,
    pub target_app: String,
    pub is_cross_promotion: bool,
}

/// How the notification is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Simple,
    CrossPromotion,
}

impl NotificationPayload {
    pub fn render_mode(&self) -> RenderMode {
        if self.is_cross_promotion {
            RenderMode::CrossPromotion
        } else {
            RenderMode::Simple
        }
    }
}

/// Validate a raw payload map.
///
/// `icon`, `title` and `short_desc` are required, and so is `package`: a
/// notification without a destination is never shown. Empty strings count as
/// absent. `crossPromotion` is true only for a case-insensitive `"true"`.
pub fn validate(raw: &HashMap<String, String>) -> Result<NotificationPayload, PayloadRejection> {
    let icon = required(raw, keys::ICON)?;
    let title = required(raw, keys::TITLE)?;
    let short_desc = required(raw, keys::SHORT_DESC)?;
    let target_app = non_empty(raw, keys::PACKAGE).ok_or(PayloadRejection::NoTargetApp)?;

    Ok(NotificationPayload {
        icon,
        title,
        short_desc,
        feature_image: non_empty(raw, keys::FEATURE),
        long_desc: non_empty(raw, keys::LONG_DESC),
        target_app,
        is_cross_promotion: raw
            .get(keys::CROSS_PROMOTION)
            .is_some_and(|value| parse_flag(value)),
    })
}

fn required(raw: &HashMap<String, String>, key: &'static str) -> Result<String, PayloadRejection> {
    non_empty(raw, key).ok_or(PayloadRejection::MissingRequiredField(key))
}

fn non_empty(raw: &HashMap<String, String>, key: &str) -> Option<String> {
    raw.get(key).filter(|value| !value.is_empty()).cloned()
}

fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
