//! Legacy endpoints for the `posts` feature.
use super::ForwardArgs;
use super::HttpMethod;
use super::LegacyEndpoint;
use super::ModernRequest;
use super::RequiredParam;

/// Legacy `(posts, delete_post)` call, mapped to the modern post delete route.
pub struct DeletePost;

impl LegacyEndpoint for DeletePost {
    fn required(&self) -> &'static [RequiredParam] {
        &[RequiredParam {
            name: "post_id",
            error_id: 5,
            error_text: "No post id sent.",
        }]
    }

    fn request(&self, call: ForwardArgs<'_>) -> ModernRequest {
        // Presence is validated by the bridge before this method is called.
        let post_id = call.request.param("post_id").unwrap_or_default();
        ModernRequest {
            bearer: call.session.hash.clone(),
            body: serde_json::json!({ "post_id": post_id }),
            method: HttpMethod::Post,
            path: "/v1/posts/delete".to_string(),
        }
    }
}
