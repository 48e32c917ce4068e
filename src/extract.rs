//! Request extractors.

use crate::error::AppError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections become `AppError::Validation` (400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
