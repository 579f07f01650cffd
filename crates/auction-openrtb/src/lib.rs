//! Slim OpenRTB bid-request model.
//!
//! Covers the subset of OpenRTB 2.x that the rule engine's schema and
//! action functions touch: the request with its impression list, the
//! site/app/device objects used for matcher extraction, and the
//! `ext.prebid` payloads that carry per-bidder configuration.
//!
//! All types round-trip through serde; unknown fields are dropped on
//! deserialization and absent fields are omitted on serialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bid request: one auction over one or more impressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidRequest {
    /// Unique request identifier.
    pub id: String,

    /// Impressions offered in this auction, in auction order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imp: Vec<Imp>,

    /// Website context (mutually exclusive with `app` by convention).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,

    /// Application context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,

    /// Device the request originated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    /// User of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// Request-level extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<RequestExt>,
}

impl BidRequest {
    /// Impression ids in list order.
    pub fn imp_ids(&self) -> Vec<String> {
        self.imp.iter().map(|imp| imp.id.clone()).collect()
    }

    /// Find an impression by id.
    pub fn find_imp(&self, id: &str) -> Option<&Imp> {
        self.imp.iter().find(|imp| imp.id == id)
    }
}

/// A single impression (ad slot) within a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Imp {
    /// Unique impression identifier within the request.
    pub id: String,

    /// Ad-server tag id for the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<Native>,

    /// Minimum bid price in `bidfloorcur` units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,

    /// Currency of `bidfloor` (ISO-4217).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidfloorcur: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<ImpExt>,
}

impl Imp {
    /// Names of the bidders configured for this impression, in sorted order.
    pub fn bidder_names(&self) -> Vec<String> {
        self.ext
            .as_ref()
            .and_then(|ext| ext.prebid.as_ref())
            .map(|prebid| prebid.bidder.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The impression's media type: the first of banner/video/audio/native
    /// present, or `None` for a malformed impression with no media object.
    pub fn media_type(&self) -> Option<&'static str> {
        if self.banner.is_some() {
            Some("banner")
        } else if self.video.is_some() {
            Some("video")
        } else if self.audio.is_some() {
            Some("audio")
        } else if self.native.is_some() {
            Some("native")
        } else {
            None
        }
    }
}

/// Banner media object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

/// Video media object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mimes: Vec<String>,
}

/// Audio media object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mimes: Vec<String>,
}

/// Native media object. The native request payload is an opaque string
/// per the OpenRTB Native spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Native {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
}

/// Website context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

/// Application context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

/// Device information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
}

/// Geographic location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    /// ISO 3166-1 alpha-3 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// User of the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Request-level `ext` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebid: Option<RequestExtPrebid>,
}

/// `ext.prebid` on the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestExtPrebid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

/// Channel the request arrived through (e.g. "web", "amp", "app").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
}

/// Impression-level `ext` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpExt {
    /// Global placement id, preferred over `tagid` as the ad-unit code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebid: Option<ImpExtPrebid>,
}

/// `ext.prebid` on an impression: per-bidder configuration keyed by
/// bidder name. Sorted map so removal diagnostics are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpExtPrebid {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bidder: BTreeMap<String, serde_json::Value>,
}
