//! Request-scoped schema functions.

use auction_openrtb::BidRequest;

use crate::request::context::RequestRuleContext;
use crate::schema::{SchemaFunction, SchemaFunctionArguments};

type Args<'a> = SchemaFunctionArguments<'a, BidRequest, RequestRuleContext>;

/// Extracts `device.geo.country`.
pub struct DeviceCountry;

impl SchemaFunction<BidRequest, RequestRuleContext> for DeviceCountry {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        args.value.device.as_ref()?.geo.as_ref()?.country.clone()
    }
}

/// Extracts `site.domain`.
pub struct Domain;

impl SchemaFunction<BidRequest, RequestRuleContext> for Domain {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        args.value.site.as_ref()?.domain.clone()
    }
}

/// Extracts `app.bundle`.
pub struct Bundle;

impl SchemaFunction<BidRequest, RequestRuleContext> for Bundle {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        args.value.app.as_ref()?.bundle.clone()
    }
}

/// Extracts `ext.prebid.channel.name`.
pub struct Channel;

impl SchemaFunction<BidRequest, RequestRuleContext> for Channel {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        args.value
            .ext
            .as_ref()?
            .prebid
            .as_ref()?
            .channel
            .as_ref()
            .map(|channel| channel.name.clone())
    }
}

/// Extracts the serving datacenter from the evaluation context.
pub struct DataCenter;

impl SchemaFunction<BidRequest, RequestRuleContext> for DataCenter {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        let datacenter = &args.context.datacenter;
        if datacenter.is_empty() {
            None
        } else {
            Some(datacenter.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auction_openrtb::{
        App, Channel as RtbChannel, Device, Geo, RequestExt, RequestExtPrebid, Site,
    };
    use serde_json::Value;

    use super::*;
    use crate::request::context::{AuctionContext, Granularity};

    fn context(datacenter: &str) -> RequestRuleContext {
        RequestRuleContext::new(
            Arc::new(AuctionContext::default()),
            Granularity::Request,
            datacenter,
        )
    }

    fn extract<F>(function: &F, request: &BidRequest, ctx: &RequestRuleContext) -> Option<String>
    where
        F: SchemaFunction<BidRequest, RequestRuleContext>,
    {
        function.extract(&SchemaFunctionArguments {
            value: request,
            config: &Value::Null,
            context: ctx,
        })
    }

    #[test]
    fn device_country() {
        let request = BidRequest {
            device: Some(Device {
                geo: Some(Geo {
                    country: Some("DEU".into()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            extract(&DeviceCountry, &request, &context("dc")),
            Some("DEU".into())
        );
        assert_eq!(extract(&DeviceCountry, &BidRequest::default(), &context("dc")), None);
    }

    #[test]
    fn site_domain_and_app_bundle() {
        let request = BidRequest {
            site: Some(Site {
                domain: Some("news.example.com".into()),
                ..Default::default()
            }),
            app: Some(App {
                bundle: Some("com.example.news".into()),
            }),
            ..Default::default()
        };
        assert_eq!(
            extract(&Domain, &request, &context("dc")),
            Some("news.example.com".into())
        );
        assert_eq!(
            extract(&Bundle, &request, &context("dc")),
            Some("com.example.news".into())
        );
    }

    #[test]
    fn channel_name() {
        let request = BidRequest {
            ext: Some(RequestExt {
                prebid: Some(RequestExtPrebid {
                    channel: Some(RtbChannel { name: "amp".into() }),
                }),
            }),
            ..Default::default()
        };
        assert_eq!(extract(&Channel, &request, &context("dc")), Some("amp".into()));
    }

    #[test]
    fn datacenter_from_context() {
        let request = BidRequest::default();
        assert_eq!(
            extract(&DataCenter, &request, &context("us-east-1")),
            Some("us-east-1".into())
        );
        assert_eq!(extract(&DataCenter, &request, &context("")), None);
    }
}
