pub mod analysis;
pub mod config;
pub mod prompt;

use serde::{Deserialize, Serialize};

type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum ApiResponse<T, E>
where
    T: std::fmt::Debug + Clone,
    E: std::fmt::Debug + Clone,
    E: std::fmt::Display,
{
    Success(T),
    Error(E),
}
