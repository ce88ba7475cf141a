//! Employee avatars. Any failure to fetch or decode an image falls back to
//! a fixed grey placeholder so the dashboard never shows a broken picture.

use std::future::Future;
use std::path::PathBuf;

use image::imageops::FilterType;
use thiserror::Error;
use tracing::warn;

use crate::core::model::Color;

/// Avatars are drawn as 40x40 squares.
pub const AVATAR_SIZE: u32 = 40;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major.
    pub pixels: Vec<u8>,
    pub is_placeholder: bool,
}

impl Avatar {
    pub fn placeholder() -> Self {
        let Color { r, g, b } = Color::GRAY;
        let pixels = [r, g, b, 0xFF].repeat((AVATAR_SIZE * AVATAR_SIZE) as usize);
        Self {
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
            pixels,
            is_placeholder: true,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, AvatarError> {
        let image = image::load_from_memory(bytes)?
            .resize_to_fill(AVATAR_SIZE, AVATAR_SIZE, FilterType::Triangle)
            .to_rgba8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
            is_placeholder: false,
        })
    }
}

/// Where avatar bytes come from.
pub trait AvatarFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<Vec<u8>, AvatarError>> + Send;
}

/// Fetches `http(s)://` sources over the network and treats anything else
/// as a local file path.
#[derive(Debug, Clone, Default)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl AvatarFetcher for DefaultFetcher {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<Vec<u8>, AvatarError>> + Send {
        let client = self.client.clone();
        let source = source.to_string();
        async move {
            if source.starts_with("http://") || source.starts_with("https://") {
                let response = client.get(&source).send().await?;
                if !response.status().is_success() {
                    return Err(AvatarError::Status(response.status().as_u16()));
                }
                Ok(response.bytes().await?.to_vec())
            } else {
                let path = PathBuf::from(source.trim_start_matches("file://"));
                Ok(tokio::fs::read(path).await?)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvatarLoader<F> {
    fetcher: F,
}

impl<F: AvatarFetcher> AvatarLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Never fails: errors are logged and replaced by the placeholder.
    pub async fn load(&self, source: &str) -> Avatar {
        let result = match self.fetcher.fetch(source).await {
            Ok(bytes) => Avatar::decode(&bytes),
            Err(e) => Err(e),
        };
        match result {
            Ok(avatar) => avatar,
            Err(e) => {
                warn!(source, error = %e, "Avatar unavailable, using placeholder");
                Avatar::placeholder()
            }
        }
    }
}
