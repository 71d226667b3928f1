//! GPU encoder registry: which ffmpeg encoders to try for each hardware vendor

use serde::Serialize;

/// Vendor name and its candidate ffmpeg encoders, in probe order
pub const ENCODER_TABLE: &[(&str, &[&str])] = &[
    ("Intel QSV", &["h264_qsv", "hevc_qsv"]),
    ("NVIDIA NVENC", &["h264_nvenc", "hevc_nvenc", "av1_nvenc"]),
    ("AMD AMF", &["h264_amf", "hevc_amf"]),
    ("VAAPI", &["h264_vaapi", "hevc_vaapi"]),
    ("VideoToolbox", &["h264_videotoolbox", "hevc_videotoolbox"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncoderCandidate {
    pub vendor: String,
    pub identifier: String,
}

impl EncoderCandidate {
    pub fn new(vendor: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            identifier: identifier.into(),
        }
    }
}

/// Vendor names in registry order
pub fn vendors() -> impl Iterator<Item = &'static str> {
    ENCODER_TABLE.iter().map(|(vendor, _)| *vendor)
}

/// Every candidate, flattened in registry order
pub fn candidates() -> Vec<EncoderCandidate> {
    ENCODER_TABLE
        .iter()
        .flat_map(|(vendor, encoders)| {
            encoders
                .iter()
                .map(move |enc| EncoderCandidate::new(*vendor, *enc))
        })
        .collect()
}

/// Look up which vendor an encoder identifier belongs to
pub fn vendor_of(identifier: &str) -> Option<&'static str> {
    ENCODER_TABLE
        .iter()
        .find(|(_, encoders)| encoders.contains(&identifier))
        .map(|(vendor, _)| *vendor)
}
