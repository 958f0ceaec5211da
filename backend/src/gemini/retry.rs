use crate::logging::*;
use std::future::Future;
use std::result::Result;
use std::time::Duration;

/// `op`を最大`max_attempts`回まで実行する。k回目の失敗後は
/// `k × base_delay`だけ待ってから次を試す（線形バックオフ）。
///
/// すべてのエラーをリトライ対象として扱い、分類はしない。
/// 上限に達したら最後のエラーをそのまま返す。
pub async fn with_retry<T, E, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let log = DEFAULT.new(o!(
        "function" => "with_retry",
        "max_attempts" => max_attempts,
    ));
    let mut attempt: u32 = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts => {
                let delay = base_delay * attempt;
                warn!(log, "attempt failed, retrying";
                    "attempt" => attempt,
                    "delay" => %humantime::format_duration(delay),
                    "error" => %err,
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(log, "giving up"; "attempt" => attempt, "error" => %err);
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
#[path = "retry/tests.rs"]
mod tests;
