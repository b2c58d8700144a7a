//! Output codecs.

use serde::{Deserialize, Serialize};

/// An output image codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl Codec {
    /// All supported codecs, in the order they are offered to users.
    pub const ALL: [Codec; 3] = [Codec::Jpeg, Codec::Png, Codec::WebP];

    /// MIME type of encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            Codec::Jpeg => "image/jpeg",
            Codec::Png => "image/png",
            Codec::WebP => "image/webp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Jpeg => "jpg",
            Codec::Png => "png",
            Codec::WebP => "webp",
        }
    }

    /// Whether the quality parameter has any effect.
    pub fn is_lossy(self) -> bool {
        !matches!(self, Codec::Png)
    }

    /// Parse a MIME type (`image/jpeg`) or a bare format name or extension
    /// (`jpeg`, `jpg`, `png`, `webp`). Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Codec> {
        let value = value.trim().to_ascii_lowercase();
        let name = value.strip_prefix("image/").unwrap_or(&value);
        match name {
            "jpeg" | "jpg" => Some(Codec::Jpeg),
            "png" => Some(Codec::Png),
            "webp" => Some(Codec::WebP),
            _ => None,
        }
    }
}
