// Encoder capability probing: which registry candidates actually encode on this machine

use serde::Serialize;
use tracing::{debug, info};

use super::core::{ProbeResult, Transcoder};
use super::error::ProbeError;
use super::registry::EncoderCandidate;

/// Working encoders for one vendor, in registry order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorEncoders {
    pub vendor: String,
    pub encoders: Vec<String>,
}

/// Vendor -> working encoders; a vendor appears only with at least one encoder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncoderAvailability {
    vendors: Vec<VendorEncoders>,
}

impl EncoderAvailability {
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn vendors(&self) -> &[VendorEncoders] {
        &self.vendors
    }

    pub fn encoders_for(&self, vendor: &str) -> Option<&[String]> {
        self.vendors
            .iter()
            .find(|v| v.vendor == vendor)
            .map(|v| v.encoders.as_slice())
    }

    /// Every working encoder, vendor by vendor (what the encoder picker lists)
    pub fn all_encoders(&self) -> Vec<&str> {
        self.vendors
            .iter()
            .flat_map(|v| v.encoders.iter().map(String::as_str))
            .collect()
    }

    pub fn first_encoder(&self) -> Option<&str> {
        self.vendors
            .first()
            .and_then(|v| v.encoders.first())
            .map(String::as_str)
    }

    pub fn contains(&self, encoder: &str) -> bool {
        self.vendors
            .iter()
            .any(|v| v.encoders.iter().any(|e| e == encoder))
    }

    fn record(&mut self, vendor: &str, encoder: String) {
        match self.vendors.iter_mut().find(|v| v.vendor == vendor) {
            Some(entry) => entry.encoders.push(encoder),
            None => self.vendors.push(VendorEncoders {
                vendor: vendor.to_string(),
                encoders: vec![encoder],
            }),
        }
    }
}

/// Test every candidate in order and keep the ones that work.
///
/// Failures are logged at debug level and otherwise dropped.
pub fn probe(transcoder: &dyn Transcoder, candidates: &[EncoderCandidate]) -> EncoderAvailability {
    let mut availability = EncoderAvailability::default();

    for candidate in candidates {
        match transcoder.probe_encoder(&candidate.identifier) {
            ProbeResult::Working(encoder) => {
                debug!(vendor = %candidate.vendor, encoder = %encoder, "encoder works");
                availability.record(&candidate.vendor, encoder);
            }
            ProbeResult::Failed(reason) => {
                debug!(
                    vendor = %candidate.vendor,
                    encoder = %candidate.identifier,
                    %reason,
                    "encoder unusable"
                );
            }
        }
    }

    info!(
        working = availability.all_encoders().len(),
        tested = candidates.len(),
        "encoder probe finished"
    );

    availability
}

/// Refuse to continue when nothing probed successfully
pub fn ensure_usable(availability: &EncoderAvailability) -> Result<(), ProbeError> {
    if availability.is_empty() {
        Err(ProbeError::NoUsableEncoder)
    } else {
        Ok(())
    }
}
