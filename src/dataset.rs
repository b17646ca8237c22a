//! Dataset payloads served to the plot client.
//!
//! A payload carries the sampled spot rows, the channel pairs to offer and,
//! when the unmixing step produced one, the dye coefficient matrix (`ratios`).
//! [`Dataset`] validates the payload once and builds the channel index every
//! redraw looks columns up in.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::channel::{ChannelId, ChannelIndex, ChannelPair};
use crate::dye::DyeMatrix;
use crate::error::DatasetError;
use crate::spots::{SpotRecord, SpotTable};

/// Wire form of a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetPayload {
    /// Channel pairs offered for plotting.
    #[serde(default)]
    pub channel_pairs: Vec<(ChannelId, ChannelId)>,
    /// Sampled spot rows.
    #[serde(default)]
    pub spots_data: Vec<SpotRecord>,
    /// Dye coefficient matrix, rows and columns in sorted channel order.
    #[serde(default)]
    pub ratios: Option<Vec<Vec<f64>>>,
    /// Per-channel summary statistics, passed through untouched.
    #[serde(default)]
    pub summary_stats: Option<Vec<serde_json::Value>>,
}

/// A validated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    channels: ChannelIndex,
    pairs: Vec<ChannelPair>,
    spots: SpotTable,
    dyes: Option<DyeMatrix>,
    summary_stats: Vec<serde_json::Value>,
}

impl Dataset {
    /// Parse and validate a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let payload: DatasetPayload = serde_json::from_str(json)?;
        Self::from_payload(payload)
    }

    /// Validate a payload.
    ///
    /// The channel list is the sorted union of the channels named by
    /// `channel_pairs` and by the spot intensity columns. When `ratios` is
    /// present it must be square with one row per channel.
    pub fn from_payload(payload: DatasetPayload) -> Result<Self, DatasetError> {
        let mut channels: Vec<ChannelId> = payload
            .spots_data
            .iter()
            .flat_map(|record| record.columns.keys())
            .filter_map(|column| ChannelId::from_intensity_column(column))
            .chain(
                payload
                    .channel_pairs
                    .iter()
                    .flat_map(|(x, y)| [x.clone(), y.clone()]),
            )
            .collect();
        channels.sort();
        channels.dedup();
        let channels = ChannelIndex::new(channels)?;

        let pairs = if payload.channel_pairs.is_empty() {
            channels.pairs()
        } else {
            payload
                .channel_pairs
                .into_iter()
                .map(|(x, y)| ChannelPair { x, y })
                .collect()
        };

        let dyes = match payload.ratios {
            Some(rows) => {
                let matrix = DyeMatrix::from_rows(rows)?;
                if matrix.size() != channels.len() {
                    return Err(DatasetError::ChannelCountMismatch {
                        channels: channels.len(),
                        rows: matrix.size(),
                    });
                }
                Some(matrix)
            }
            None => None,
        };

        let spots = SpotTable::with_index(payload.spots_data, channels.clone());
        info!(
            channels = channels.len(),
            spots = spots.len(),
            reassigned = spots.reassigned_count(),
            dye_matrix = dyes.is_some(),
            "dataset loaded"
        );

        Ok(Self {
            channels,
            pairs,
            spots,
            dyes,
            summary_stats: payload.summary_stats.unwrap_or_default(),
        })
    }

    /// Channel index shared by spots and the dye matrix.
    pub fn channels(&self) -> &ChannelIndex {
        &self.channels
    }

    /// Channel pairs offered for plotting.
    pub fn pairs(&self) -> &[ChannelPair] {
        &self.pairs
    }

    /// Spot rows.
    pub fn spots(&self) -> &SpotTable {
        &self.spots
    }

    /// Dye coefficient matrix, when the dataset has one.
    pub fn dyes(&self) -> Option<&DyeMatrix> {
        self.dyes.as_ref()
    }

    /// Summary statistics records.
    pub fn summary_stats(&self) -> &[serde_json::Value] {
        &self.summary_stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "channel_pairs": [["488", "514"], ["488", "561"], ["514", "561"]],
            "spots_data": [
                {
                    "spot_id": 10, "chan": "488", "unmixed_chan": "488",
                    "chan_488_intensity": 500.0, "chan_514_intensity": 90.0,
                    "chan_561_intensity": 4.0
                },
                {
                    "spot_id": 11, "chan": "561", "unmixed_chan": "514",
                    "chan_488_intensity": 20.0, "chan_514_intensity": 300.0,
                    "chan_561_intensity": 250.0
                }
            ],
            "ratios": [[10, 2, 0], [3, 40, 5], [0, 1, 50]],
            "spot_details": {"10": {"x": 1}},
            "fused_s3_paths": ["s3://bucket/channel_488.zarr"]
        })
    }

    #[test]
    fn loads_full_payload() {
        let dataset = Dataset::from_json(&payload().to_string()).expect("dataset");
        assert_eq!(dataset.channels().len(), 3);
        assert_eq!(dataset.pairs().len(), 3);
        assert_eq!(dataset.pairs()[1], ChannelPair::new("488", "561"));
        assert_eq!(dataset.spots().len(), 2);
        assert_eq!(dataset.spots().reassigned_count(), 1);
        let dyes = dataset.dyes().expect("dye matrix");
        assert_eq!(dyes.coefficient(0, 1), Some(2.0));
        assert!(dataset.summary_stats().is_empty());
    }

    #[test]
    fn missing_ratios_is_allowed() {
        let mut value = payload();
        value.as_object_mut().expect("object").remove("ratios");
        let dataset = Dataset::from_json(&value.to_string()).expect("dataset");
        assert!(dataset.dyes().is_none());
    }

    #[test]
    fn ratios_must_match_channel_count() {
        let mut value = payload();
        value["ratios"] = json!([[1, 0], [0, 1]]);
        let err = Dataset::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ChannelCountMismatch {
                channels: 3,
                rows: 2
            }
        ));
    }

    #[test]
    fn pairs_default_to_channel_combinations() {
        let mut value = payload();
        value["channel_pairs"] = json!([]);
        let dataset = Dataset::from_json(&value.to_string()).expect("dataset");
        assert_eq!(dataset.pairs(), dataset.channels().pairs().as_slice());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Dataset::from_json("{\"spots_data\": 3}").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }
}
