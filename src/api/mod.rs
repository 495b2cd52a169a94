pub mod admin;
pub mod attendance;

use actix_web::{HttpResponse, web};
use futures_util::StreamExt;

use crate::model::attendance::AttendanceRecord;
use crate::store::Subscription;

/// Streams a subscription's snapshots as server-sent events, one `data:`
/// frame per snapshot, sorted with `sort` before encoding. The response
/// stream owns the subscription, so a client disconnect cancels it.
pub(crate) fn sse_response(
    subscription: Subscription,
    sort: fn(&mut [AttendanceRecord]),
) -> HttpResponse {
    let frames = subscription.map(move |mut records| {
        sort(&mut records);
        match serde_json::to_string(&records) {
            Ok(json) => Ok(web::Bytes::from(format!("data: {json}\n\n"))),
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode snapshot");
                Err(actix_web::error::ErrorInternalServerError("encode failure"))
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(frames)
}
