//! Per-spot records and their projection onto channel pairs.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelId, ChannelIndex, ChannelPair};
use crate::geom::Point;

/// One spot row as served by the backend.
///
/// Intensity columns (`chan_<id>_intensity`) and any other extra columns are
/// collected in `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRecord {
    /// Spot identifier.
    pub spot_id: u64,
    /// Channel the spot was detected on.
    pub chan: ChannelId,
    /// Channel assigned after unmixing.
    pub unmixed_chan: ChannelId,
    /// Correlation with the assigned dye signature.
    #[serde(default)]
    pub r: Option<f64>,
    /// Distance to the assigned dye signature.
    #[serde(default)]
    pub dist: Option<f64>,
    /// Reassignment flag; derived from `chan` and `unmixed_chan` when absent.
    #[serde(default)]
    pub reassigned: Option<bool>,
    /// Owning cell, when segmented.
    #[serde(default)]
    pub cell_id: Option<u64>,
    /// Imaging round.
    #[serde(default)]
    pub round: Option<u32>,
    /// Fused-volume X position.
    #[serde(default)]
    pub x: Option<f64>,
    /// Fused-volume Y position.
    #[serde(default)]
    pub y: Option<f64>,
    /// Fused-volume Z position.
    #[serde(default)]
    pub z: Option<f64>,
    /// Intensity and any other extra columns, by name.
    #[serde(flatten)]
    pub columns: HashMap<String, serde_json::Value>,
}

/// A spot with intensities aligned to the table's [`ChannelIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    /// Spot identifier.
    pub id: u64,
    /// Channel the spot was detected on.
    pub chan: ChannelId,
    /// Channel assigned after unmixing.
    pub unmixed_chan: ChannelId,
    /// Whether unmixing moved the spot to another channel.
    pub reassigned: bool,
    /// Correlation with the assigned dye signature.
    pub r: Option<f64>,
    /// Distance to the assigned dye signature.
    pub dist: Option<f64>,
    /// Owning cell, when segmented.
    pub cell_id: Option<u64>,
    /// Imaging round the spot was detected in.
    pub round: Option<u32>,
    /// Position in the fused volume (`x`, `y`, `z`), when known.
    pub position: Option<[f64; 3]>,
    intensities: Vec<Option<f64>>,
}

impl Spot {
    fn from_record(mut record: SpotRecord, index: &ChannelIndex) -> Self {
        let intensities = index
            .channels()
            .iter()
            .map(|channel| {
                record
                    .columns
                    .remove(&channel.intensity_column())
                    .and_then(|value| value.as_f64())
                    .filter(|value| value.is_finite())
            })
            .collect();
        let reassigned = record
            .reassigned
            .unwrap_or(record.chan != record.unmixed_chan);
        let position = match (record.x, record.y, record.z) {
            (Some(x), Some(y), Some(z)) => Some([x, y, z]),
            _ => None,
        };
        Self {
            id: record.spot_id,
            chan: record.chan,
            unmixed_chan: record.unmixed_chan,
            reassigned,
            r: record.r,
            dist: record.dist,
            cell_id: record.cell_id,
            round: record.round,
            position,
            intensities,
        }
    }

    /// Intensity on a channel column.
    pub fn intensity(&self, column: usize) -> Option<f64> {
        self.intensities.get(column).copied().flatten()
    }
}

/// A spot projected onto a channel pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotPoint<'a> {
    /// The projected spot.
    pub spot: &'a Spot,
    /// `(intensity on X channel, intensity on Y channel)`.
    pub point: Point,
}

/// Spot rows with their channel index.
#[derive(Debug, Clone, Default)]
pub struct SpotTable {
    index: ChannelIndex,
    spots: Vec<Spot>,
}

impl SpotTable {
    /// Build a table, discovering channels from the intensity columns.
    pub fn from_records(records: Vec<SpotRecord>) -> Self {
        let index = ChannelIndex::from_intensity_columns(
            records
                .iter()
                .flat_map(|record| record.columns.keys().map(String::as_str)),
        );
        Self::with_index(records, index)
    }

    /// Build a table against an existing channel index.
    pub fn with_index(records: Vec<SpotRecord>, index: ChannelIndex) -> Self {
        let spots = records
            .into_iter()
            .map(|record| Spot::from_record(record, &index))
            .collect();
        Self { index, spots }
    }

    /// Channel index of the intensity columns.
    pub fn index(&self) -> &ChannelIndex {
        &self.index
    }

    /// All spots in table order.
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// Number of spots.
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Find a spot by identifier.
    pub fn spot(&self, id: u64) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id == id)
    }

    /// Number of spots moved to another channel by unmixing.
    pub fn reassigned_count(&self) -> usize {
        self.spots.iter().filter(|spot| spot.reassigned).count()
    }

    /// Spot counts per unmixed channel, in channel order.
    pub fn counts_by_unmixed_channel(&self) -> BTreeMap<ChannelId, usize> {
        let mut counts = BTreeMap::new();
        for spot in &self.spots {
            *counts.entry(spot.unmixed_chan.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Spot counts per `(chan, unmixed_chan)` flow, including spots that
    /// stayed on their channel.
    pub fn flows(&self) -> BTreeMap<(ChannelId, ChannelId), usize> {
        let mut flows = BTreeMap::new();
        for spot in &self.spots {
            *flows
                .entry((spot.chan.clone(), spot.unmixed_chan.clone()))
                .or_insert(0) += 1;
        }
        flows
    }

    /// Project spots onto a channel pair.
    ///
    /// Spots missing either intensity are skipped. Unknown channels yield no
    /// points.
    pub fn project(&self, pair: &ChannelPair) -> Vec<SpotPoint<'_>> {
        let Some((x_col, y_col)) = self.index.pair_columns(pair) else {
            return Vec::new();
        };
        self.spots
            .iter()
            .filter_map(|spot| {
                let x = spot.intensity(x_col)?;
                let y = spot.intensity(y_col)?;
                Some(SpotPoint {
                    spot,
                    point: Point::new(x, y),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<SpotRecord> {
        serde_json::from_value(json!([
            {
                "spot_id": 1, "chan": "488", "unmixed_chan": "488", "r": 0.9, "dist": 1.5,
                "chan_488_intensity": 120.0, "chan_514_intensity": 30.0
            },
            {
                "spot_id": 2, "chan": 488, "unmixed_chan": 514,
                "chan_488_intensity": 80.0, "chan_514_intensity": 95.0,
                "x": 1.0, "y": 2.0, "z": 3.0, "cell_id": 7
            },
            {
                "spot_id": 3, "chan": "514", "unmixed_chan": "514", "reassigned": false,
                "chan_488_intensity": null, "chan_514_intensity": 200.0
            }
        ]))
        .expect("records")
    }

    #[test]
    fn reassignment_is_derived_from_channels() {
        let table = SpotTable::from_records(records());
        assert_eq!(table.len(), 3);
        assert_eq!(table.reassigned_count(), 1);
        let moved = table.spot(2).expect("spot 2");
        assert!(moved.reassigned);
        assert_eq!(moved.position, Some([1.0, 2.0, 3.0]));
        assert_eq!(moved.cell_id, Some(7));
    }

    #[test]
    fn projection_skips_missing_intensities() {
        let table = SpotTable::from_records(records());
        let points = table.project(&ChannelPair::new("488", "514"));
        let ids: Vec<u64> = points.iter().map(|p| p.spot.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(points[0].point, Point::new(120.0, 30.0));
        assert!(table.project(&ChannelPair::new("488", "561")).is_empty());
    }

    #[test]
    fn counts_group_by_unmixed_channel() {
        let table = SpotTable::from_records(records());
        let counts = table.counts_by_unmixed_channel();
        assert_eq!(counts.get(&ChannelId::new("488")), Some(&1));
        assert_eq!(counts.get(&ChannelId::new("514")), Some(&2));
    }

    #[test]
    fn flows_pair_detected_and_unmixed_channels() {
        let table = SpotTable::from_records(records());
        let flows = table.flows();
        let key = |from: &str, to: &str| (ChannelId::new(from), ChannelId::new(to));
        assert_eq!(flows.len(), 3);
        assert_eq!(flows.get(&key("488", "488")), Some(&1));
        assert_eq!(flows.get(&key("488", "514")), Some(&1));
        assert_eq!(flows.get(&key("514", "514")), Some(&1));
        assert_eq!(flows.values().sum::<usize>(), table.len());
    }
}
