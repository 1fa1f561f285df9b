use crate::routes::{health, past_papers};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "papertrack-server",
    description = "Past-paper progress tracker API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(past_papers::PastPapersApi::openapi());
    root
}
