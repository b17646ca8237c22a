//! Detection channels, channel pairs, and the channel -> column index.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

const INTENSITY_PREFIX: &str = "chan_";
const INTENSITY_SUFFIX: &str = "_intensity";

/// Identifier of a detection channel, usually its wavelength (`"488"`).
///
/// Deserializes from either a string or an integer, since spot tables store
/// channel columns both ways.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChannelId {
    Text(String),
    Integer(i64),
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawChannelId::deserialize(deserializer)? {
            RawChannelId::Text(text) => Self(text),
            RawChannelId::Integer(value) => Self(value.to_string()),
        })
    }
}

impl ChannelId {
    /// Create a channel identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the spot-table column holding this channel's intensity.
    pub fn intensity_column(&self) -> String {
        format!("{INTENSITY_PREFIX}{}{INTENSITY_SUFFIX}", self.0)
    }

    /// Parse a `chan_<id>_intensity` column name.
    pub fn from_intensity_column(column: &str) -> Option<Self> {
        let id = column
            .strip_prefix(INTENSITY_PREFIX)?
            .strip_suffix(INTENSITY_SUFFIX)?;
        if id.is_empty() {
            return None;
        }
        Some(Self::new(id))
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Ordered pair of channels shown on the X and Y axes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelPair {
    /// Channel on the X axis.
    pub x: ChannelId,
    /// Channel on the Y axis.
    pub y: ChannelId,
}

impl ChannelPair {
    /// Create a channel pair.
    pub fn new(x: impl Into<ChannelId>, y: impl Into<ChannelId>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// The same pair with axes swapped.
    pub fn swapped(&self) -> Self {
        Self {
            x: self.y.clone(),
            y: self.x.clone(),
        }
    }
}

/// Ordered channel list with a precomputed id -> column lookup.
///
/// Built once per dataset. Row and column `i` of the dye matrix belong to
/// `channels()[i]`.
#[derive(Debug, Clone, Default)]
pub struct ChannelIndex {
    channels: Vec<ChannelId>,
    columns: HashMap<ChannelId, usize>,
}

impl ChannelIndex {
    /// Build an index, rejecting duplicate identifiers.
    pub fn new(channels: Vec<ChannelId>) -> Result<Self, DatasetError> {
        let mut columns = HashMap::with_capacity(channels.len());
        for (column, channel) in channels.iter().enumerate() {
            if columns.insert(channel.clone(), column).is_some() {
                return Err(DatasetError::DuplicateChannel(channel.to_string()));
            }
        }
        Ok(Self { channels, columns })
    }

    /// Collect the sorted, de-duplicated channel set from spot-table columns.
    pub fn from_intensity_columns<'a>(columns: impl IntoIterator<Item = &'a str>) -> Self {
        let mut channels: Vec<ChannelId> = columns
            .into_iter()
            .filter_map(ChannelId::from_intensity_column)
            .collect();
        channels.sort();
        channels.dedup();
        let columns = channels
            .iter()
            .enumerate()
            .map(|(column, channel)| (channel.clone(), column))
            .collect();
        Self { channels, columns }
    }

    /// Channels in column order.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check whether the index holds no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Column of a channel, if present.
    pub fn column(&self, channel: &ChannelId) -> Option<usize> {
        self.columns.get(channel).copied()
    }

    /// Columns of both channels of a pair, if both are present.
    pub fn pair_columns(&self, pair: &ChannelPair) -> Option<(usize, usize)> {
        Some((self.column(&pair.x)?, self.column(&pair.y)?))
    }

    /// All unordered channel pairs, in channel order.
    ///
    /// For `["488", "514", "561"]` this yields `(488, 514)`, `(488, 561)`,
    /// `(514, 561)`.
    pub fn pairs(&self) -> Vec<ChannelPair> {
        let mut pairs = Vec::new();
        for (i, x) in self.channels.iter().enumerate() {
            for y in &self.channels[i + 1..] {
                pairs.push(ChannelPair::new(x.clone(), y.clone()));
            }
        }
        pairs
    }
}
