use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

const SHORT: Duration = Duration::from_millis(1);

#[tokio::test]
async fn test_first_success_makes_a_single_call() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, String> = with_retry(3, SHORT, |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(42) }
    })
    .await;
    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_one_failure_then_success_makes_two_calls() {
    let calls = AtomicU32::new(0);
    let result: Result<String, String> = with_retry(3, SHORT, |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt == 1 {
                Err("induced transport failure".to_string())
            } else {
                Ok("second response".to_string())
            }
        }
    })
    .await;
    // 成功した応答はそのまま返り、それ以上の試行は行われない
    assert_eq!(result.unwrap(), "second response");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_persistent_failure_stops_at_the_limit() {
    let calls = AtomicU32::new(0);
    let result: Result<(), String> = with_retry(3, SHORT, |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(format!("failure on attempt {attempt}")) }
    })
    .await;
    // ちょうど3回試行し、最後のエラーが返る
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.unwrap_err(), "failure on attempt 3");
}

#[tokio::test]
async fn test_delays_grow_linearly() {
    let base = Duration::from_millis(20);
    let started = Instant::now();
    let result: Result<(), String> = with_retry(3, base, |_| async { Err("nope".to_string()) }).await;
    assert!(result.is_err());
    // 待ち時間は 1×base + 2×base 以上になる
    assert!(started.elapsed() >= base * 3);
}

#[tokio::test]
async fn test_single_attempt_never_sleeps() {
    let started = Instant::now();
    let result: Result<(), String> =
        with_retry(1, Duration::from_secs(60), |_| async { Err("nope".to_string()) }).await;
    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(1));
}
