use crate::api_underlying::Underlying;
use nutriscan_common::ApiResponse;
use nutriscan_common::analysis::{AnalyzeReport, AnalyzeRequest};
use std::sync::Arc;

pub struct AnalyzeApi {
    pub underlying: Arc<Underlying>,
}

impl AnalyzeApi {
    pub async fn analyze(&self, request: &AnalyzeRequest) -> ApiResponse<AnalyzeReport, String> {
        match self.underlying.post("analyze", request).await {
            Ok(response) => response,
            Err(err) => ApiResponse::Error(format!("通信エラー: {}", err)),
        }
    }
}
