use crate::api_underlying::Underlying;
use std::sync::Arc;

pub struct BasicApi {
    pub underlying: Arc<Underlying>,
}

impl BasicApi {
    pub async fn healthcheck(&self) -> String {
        self.underlying.get_text("healthcheck").await
    }
}
