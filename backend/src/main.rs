#![deny(warnings)]

mod gemini;
mod logging;
mod web;

use crate::logging::*;

type Result<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() {
    let log = DEFAULT.new(o!("function" => "main"));
    info!(log, "Starting up");
    debug!(log, "log level check");
    trace!(log, "log level check");
    error!(log, "log level check");
    warn!(log, "log level check");
    crit!(log, "log level check");

    // 資格情報が無ければリスナーを立てる前に停止する
    if let Err(err) = gemini::api_key() {
        crit!(log, "GEMINI_API_KEY is not configured"; "error" => %err);
        std::process::exit(1);
    }

    web::run().await;
}
