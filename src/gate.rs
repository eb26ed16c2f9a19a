// src/gate.rs
//
// Capability gate: decides whether this context may run an extraction cycle
// at all. Mobile contexts are excluded; the site serves them a layout the
// locators cannot rely on. Inspects environment signals only, never the
// fetched tree.

use crate::config::consts::MOBILE_MAX_WIDTH;
use crate::config::options::ClientContext;

const UA_MOBILE_MARKS: &[&str] = &["mobi", "android", "iphone", "ipad", "ipod", "mobile"];

pub fn is_eligible(ctx: &ClientContext) -> bool {
    !is_mobile(ctx)
}

/// Unknown signals fail open: no user agent and no viewport means "not
/// excluded", the same way the signal lookup failing would.
fn is_mobile(ctx: &ClientContext) -> bool {
    let ua_mobile = match &ctx.user_agent {
        Some(ua) => {
            let lc = ua.to_ascii_lowercase();
            UA_MOBILE_MARKS.iter().any(|m| lc.contains(m))
        }
        None => false,
    };
    let small_viewport = matches!(ctx.viewport_width, Some(w) if w <= MOBILE_MAX_WIDTH);
    ua_mobile || small_viewport
}
