use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::Band;

/// Values assumed for a radio when a leaf is missing, either in the
/// controller response or in the inventory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandDefaults {
    pub channel: u16,
    pub channel_width: u16,
    pub tx_power: u16,
    pub admin_state: bool,
}

pub const DEFAULTS_24GHZ: BandDefaults = BandDefaults {
    channel: 1,
    // the controller reports 20, but the inventory channel map tags every
    // 2.4GHz channel with the 22MHz DSSS spacing
    channel_width: 22,
    tx_power: 1,
    admin_state: true,
};

pub const DEFAULTS_5GHZ: BandDefaults = BandDefaults {
    channel: 36,
    channel_width: 20,
    tx_power: 1,
    admin_state: true,
};

pub const CHANNELS_24GHZ: &[u16] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];

pub const WIDTHS_24GHZ: &[u16] = &[20, 22];

pub const CHANNELS_5GHZ_20MHZ: &[u16] = &[
    32, 36, 40, 44, 48, 52, 56, 60, 64, 100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140,
    144, 149, 153, 157, 161, 165, 169, 173, 177,
];

pub const CHANNELS_5GHZ_40MHZ: &[u16] = &[
    34, 38, 46, 54, 62, 102, 110, 118, 126, 134, 142, 151, 159, 167, 175,
];

pub const CHANNELS_5GHZ_80MHZ: &[u16] = &[42, 58, 106, 122, 138, 155, 171];

pub const CHANNELS_5GHZ_160MHZ: &[u16] = &[50, 114, 163];

lazy_static! {
    static ref CHANNEL_PLAN: HashMap<(Band, u16), HashSet<u16>> = {
        let mut plan = HashMap::new();

        for width in WIDTHS_24GHZ {
            plan.insert(
                (Band::Ghz24, *width),
                CHANNELS_24GHZ.iter().copied().collect::<HashSet<u16>>(),
            );
        }

        plan.insert((Band::Ghz5, 20), CHANNELS_5GHZ_20MHZ.iter().copied().collect());
        plan.insert((Band::Ghz5, 40), CHANNELS_5GHZ_40MHZ.iter().copied().collect());
        plan.insert((Band::Ghz5, 80), CHANNELS_5GHZ_80MHZ.iter().copied().collect());
        plan.insert((Band::Ghz5, 160), CHANNELS_5GHZ_160MHZ.iter().copied().collect());

        plan
    };
}

pub fn supports_width(band: Band, width: u16) -> bool {
    CHANNEL_PLAN.contains_key(&(band, width))
}

pub fn is_allowed(band: Band, width: u16, channel: u16) -> bool {
    CHANNEL_PLAN
        .get(&(band, width))
        .map(|channels| channels.contains(&channel))
        .unwrap_or(false)
}

/// Center frequency in MHz of a channel number.
pub fn center_frequency(band: Band, channel: u16) -> u32 {
    match band {
        Band::Ghz24 if channel == 14 => 2484,
        Band::Ghz24 => 2407 + 5 * channel as u32,
        Band::Ghz5 => 5000 + 5 * channel as u32,
    }
}
