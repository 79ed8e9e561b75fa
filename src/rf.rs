//! Conversion between the inventory's RF channel value and the
//! {band, channel, width} triad the controller understands.
//!
//! The inventory stores a radio channel as a single value of the form
//! `<band>-<channel>-<frequency>-<width>`, e.g. `2.4g-6-2437-22` or
//! `5g-36-5180-20`.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod tables;

use tables::BandDefaults;

lazy_static! {
    static ref RF_CHANNEL_PATTERN: Regex =
        Regex::new(r"^(2\.4g|5g)-([1-9]\d{0,2})-([1-9]\d{3})-([1-9]\d{1,2})$")
            .expect("invalid rf channel pattern");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "2.4GHz")]
    Ghz24,
    #[serde(rename = "5GHz")]
    Ghz5,
}

impl Band {
    pub fn from_inventory_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "2.4g" => Some(Band::Ghz24),
            "5g" => Some(Band::Ghz5),
            _ => None,
        }
    }

    pub fn inventory_prefix(&self) -> &'static str {
        match self {
            Band::Ghz24 => "2.4g",
            Band::Ghz5 => "5g",
        }
    }

    pub fn defaults(&self) -> &'static BandDefaults {
        match self {
            Band::Ghz24 => &tables::DEFAULTS_24GHZ,
            Band::Ghz5 => &tables::DEFAULTS_5GHZ,
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Ghz24 => write!(f, "2.4GHz"),
            Band::Ghz5 => write!(f, "5GHz"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidChannelError {
    #[error("no rf channel value set")]
    Missing,
    #[error("unrecognized rf channel value '{0}'")]
    Unrecognized(String),
    #[error("{band} does not support a {width} MHz channel width")]
    UnsupportedWidth { band: Band, width: u16 },
    #[error("channel {channel} is not allowed on {band} with a {width} MHz width")]
    ChannelNotAllowed { band: Band, channel: u16, width: u16 },
    #[error("frequency {frequency} MHz does not match channel {channel} on {band}")]
    FrequencyMismatch {
        band: Band,
        channel: u16,
        frequency: u32,
    },
}

/// RF channel value as stored by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RfChannel(String);

impl RfChannel {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RfChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioParameters {
    pub band: Band,
    pub channel: u16,
    pub channel_width: u16,
    pub tx_power: Option<u16>,
    pub enabled: Option<bool>,
}

impl RadioParameters {
    pub fn new(band: Band, channel: u16, channel_width: u16) -> Self {
        Self {
            band,
            channel,
            channel_width,
            tx_power: None,
            enabled: None,
        }
    }

    pub fn with_tx_power(mut self, tx_power: Option<u16>) -> Self {
        self.tx_power = tx_power;
        self
    }

    pub fn with_enabled(mut self, enabled: Option<bool>) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn tx_power_or_default(&self) -> u16 {
        self.tx_power.unwrap_or(self.band.defaults().tx_power)
    }

    pub fn enabled_or_default(&self) -> bool {
        self.enabled.unwrap_or(self.band.defaults().admin_state)
    }
}

/// Decodes an inventory RF channel value.
///
/// The band is taken from the value itself, the channel is checked against
/// the band's channel plan for the encoded width, and the encoded frequency
/// must be the channel's center frequency.
pub fn decode(raw: &RfChannel) -> Result<RadioParameters, InvalidChannelError> {
    let unrecognized = || InvalidChannelError::Unrecognized(raw.to_string());

    let captures = RF_CHANNEL_PATTERN
        .captures(raw.as_str())
        .ok_or_else(unrecognized)?;

    let band = Band::from_inventory_prefix(&captures[1]).ok_or_else(unrecognized)?;
    let channel = captures[2].parse::<u16>().map_err(|_| unrecognized())?;
    let frequency = captures[3].parse::<u32>().map_err(|_| unrecognized())?;
    let channel_width = captures[4].parse::<u16>().map_err(|_| unrecognized())?;

    check(band, channel, channel_width)?;

    if tables::center_frequency(band, channel) != frequency {
        return Err(InvalidChannelError::FrequencyMismatch {
            band,
            channel,
            frequency,
        });
    }

    Ok(RadioParameters::new(band, channel, channel_width))
}

/// Encodes the band/channel/width triad into the inventory's value.
/// `tx_power` and `enabled` are not part of the channel value.
pub fn encode(params: &RadioParameters) -> Result<RfChannel, InvalidChannelError> {
    check(params.band, params.channel, params.channel_width)?;

    Ok(RfChannel(format!(
        "{}-{}-{}-{}",
        params.band.inventory_prefix(),
        params.channel,
        tables::center_frequency(params.band, params.channel),
        params.channel_width
    )))
}

fn check(band: Band, channel: u16, width: u16) -> Result<(), InvalidChannelError> {
    if !tables::supports_width(band, width) {
        return Err(InvalidChannelError::UnsupportedWidth { band, width });
    }

    if !tables::is_allowed(band, width, channel) {
        return Err(InvalidChannelError::ChannelNotAllowed {
            band,
            channel,
            width,
        });
    }

    Ok(())
}
