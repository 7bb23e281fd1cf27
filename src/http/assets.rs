//! Page and stylesheet serving.
//!
//! Files are read from disk on every request, so edits show up without a
//! restart.

use std::path::PathBuf;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::fs;

use crate::config::AssetConfig;
use crate::http::error::HttpError;

/// The fixed set of files the front door serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Index,
    MessageForm,
    ErrorPage,
    Stylesheet,
}

impl Asset {
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Index => "index.html",
            Asset::MessageForm => "message.html",
            Asset::ErrorPage => "error.html",
            Asset::Stylesheet => "style.css",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Asset::Stylesheet => "text/css",
            _ => "text/html; charset=utf-8",
        }
    }
}

/// Resolves assets against the configured directories.
#[derive(Debug, Clone)]
pub struct Assets {
    templates_dir: PathBuf,
    static_dir: PathBuf,
}

impl Assets {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            templates_dir: PathBuf::from(&config.templates_dir),
            static_dir: PathBuf::from(&config.static_dir),
        }
    }

    pub fn path(&self, asset: Asset) -> PathBuf {
        match asset {
            Asset::Stylesheet => self.static_dir.join(asset.file_name()),
            _ => self.templates_dir.join(asset.file_name()),
        }
    }

    /// Read `asset` and respond with it under `status`.
    pub async fn serve(&self, asset: Asset, status: StatusCode) -> Result<Response, HttpError> {
        let path = self.path(asset);
        match fs::read(&path).await {
            Ok(body) => Ok((status, [(header::CONTENT_TYPE, asset.content_type())], body).into_response()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Asset unavailable");
                Err(HttpError::AssetMissing)
            }
        }
    }
}
