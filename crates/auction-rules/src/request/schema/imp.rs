//! Impression-scoped schema functions.
//!
//! These extract nothing at request granularity; the factory wraps any
//! rule whose schema uses them in the per-impression variant so they are
//! only ever evaluated with `Granularity::Imp`.

use auction_openrtb::{BidRequest, Imp};

use crate::request::context::RequestRuleContext;
use crate::schema::{SchemaFunction, SchemaFunctionArguments};

type Args<'a> = SchemaFunctionArguments<'a, BidRequest, RequestRuleContext>;

/// The impression scoped by the context, if it is still present in the
/// (possibly already edited) request.
fn scoped_imp<'a>(args: &Args<'a>) -> Option<&'a Imp> {
    let imp_id = args.context.granularity.imp_id()?;
    args.value.find_imp(imp_id)
}

/// Extracts the scoped impression's id.
pub struct ImpId;

impl SchemaFunction<BidRequest, RequestRuleContext> for ImpId {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        scoped_imp(args).map(|imp| imp.id.clone())
    }
}

/// Extracts the scoped impression's ad-unit code: `ext.gpid` when
/// present, else `tagid`.
pub struct AdUnitCode;

impl SchemaFunction<BidRequest, RequestRuleContext> for AdUnitCode {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        let imp = scoped_imp(args)?;
        imp.ext
            .as_ref()
            .and_then(|ext| ext.gpid.clone())
            .or_else(|| imp.tagid.clone())
    }
}

/// Extracts the scoped impression's media type (banner/video/audio/native).
pub struct MediaType;

impl SchemaFunction<BidRequest, RequestRuleContext> for MediaType {
    fn extract(&self, args: &Args<'_>) -> Option<String> {
        scoped_imp(args)?.media_type().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auction_openrtb::{Banner, ImpExt, Video};
    use serde_json::Value;

    use super::*;
    use crate::request::context::{AuctionContext, Granularity};

    fn context(granularity: Granularity) -> RequestRuleContext {
        RequestRuleContext::new(Arc::new(AuctionContext::default()), granularity, "dc")
    }

    fn request() -> BidRequest {
        BidRequest {
            id: "r".into(),
            imp: vec![
                Imp {
                    id: "imp-1".into(),
                    tagid: Some("slot-top".into()),
                    banner: Some(Banner::default()),
                    ..Default::default()
                },
                Imp {
                    id: "imp-2".into(),
                    tagid: Some("slot-side".into()),
                    video: Some(Video::default()),
                    ext: Some(ImpExt {
                        gpid: Some("/pub/side".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
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
    fn imp_id_at_impression_scope() {
        let request = request();
        let ctx = context(Granularity::Imp("imp-2".into()));
        assert_eq!(extract(&ImpId, &request, &ctx), Some("imp-2".into()));
    }

    #[test]
    fn nothing_at_request_scope() {
        let request = request();
        let ctx = context(Granularity::Request);
        assert_eq!(extract(&ImpId, &request, &ctx), None);
        assert_eq!(extract(&AdUnitCode, &request, &ctx), None);
        assert_eq!(extract(&MediaType, &request, &ctx), None);
    }

    #[test]
    fn nothing_for_a_dropped_impression() {
        let request = request();
        let ctx = context(Granularity::Imp("gone".into()));
        assert_eq!(extract(&ImpId, &request, &ctx), None);
    }

    #[test]
    fn ad_unit_code_prefers_gpid_over_tagid() {
        let request = request();
        let ctx = context(Granularity::Imp("imp-2".into()));
        assert_eq!(extract(&AdUnitCode, &request, &ctx), Some("/pub/side".into()));

        let ctx = context(Granularity::Imp("imp-1".into()));
        assert_eq!(extract(&AdUnitCode, &request, &ctx), Some("slot-top".into()));
    }

    #[test]
    fn media_type_of_scoped_imp() {
        let request = request();
        assert_eq!(
            extract(&MediaType, &request, &context(Granularity::Imp("imp-1".into()))),
            Some("banner".into())
        );
        assert_eq!(
            extract(&MediaType, &request, &context(Granularity::Imp("imp-2".into()))),
            Some("video".into())
        );
    }
}
