//! RESTCONF resources and documents of the controller's wireless models.
//!
//! Only the leaves the provisioning and validation engines touch are modeled.
//! Every leaf is optional: the controller omits leaves holding their default
//! value, and partial updates only carry the leaves being written.

use serde::{Deserialize, Serialize};

use crate::rf::{tables::BandDefaults, Band};

pub const RADIO_CFG_DATA: &str = "data/Cisco-IOS-XE-wireless-radio-cfg:radio-cfg-data";
pub const AP_CFG_DATA: &str = "data/Cisco-IOS-XE-wireless-ap-cfg:ap-cfg-data";

pub fn ap_spec_config_resource(ap_mac: &str) -> String {
    format!("{RADIO_CFG_DATA}/ap-spec-configs/ap-spec-config={ap_mac}")
}

pub fn ap_specific_config_resource(ap_mac: &str) -> String {
    format!("{RADIO_CFG_DATA}/ap-specific-configs/ap-specific-config={ap_mac}")
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RadioCfgDocument {
    #[serde(rename = "Cisco-IOS-XE-wireless-radio-cfg:radio-cfg-data")]
    pub data: RadioCfgData,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RadioCfgData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_spec_configs: Option<ApSpecConfigs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_specific_configs: Option<ApSpecificConfigs>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApSpecConfigs {
    #[serde(rename = "ap-spec-config", default)]
    pub entries: Vec<ApSpecConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ApSpecConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_eth_mac_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_host_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApSpecificConfigs {
    #[serde(rename = "ap-specific-config", default)]
    pub entries: Vec<ApSpecificConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ApSpecificConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_eth_mac_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_specific_slot_configs: Option<SlotConfigs>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SlotConfigs {
    #[serde(rename = "ap-specific-slot-config", default)]
    pub entries: Vec<SlotConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SlotConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_params_24ghz: Option<RadioParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_params_5ghz: Option<RadioParams>,
}

impl SlotConfig {
    pub fn for_band(slot_id: u8, band: Band, params: RadioParams) -> Self {
        let mut slot = SlotConfig {
            slot_id: Some(slot_id),
            ..Default::default()
        };

        match band {
            Band::Ghz24 => slot.radio_params_24ghz = Some(params),
            Band::Ghz5 => slot.radio_params_5ghz = Some(params),
        }

        slot
    }

    pub fn params(&self, band: Band) -> Option<&RadioParams> {
        match band {
            Band::Ghz24 => self.radio_params_24ghz.as_ref(),
            Band::Ghz5 => self.radio_params_5ghz.as_ref(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RadioParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmit_power: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dca: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtp: Option<bool>,
}

/// Radio parameters as deployed, with omitted leaves filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployedRadio {
    pub channel: u16,
    pub channel_width: u16,
    pub transmit_power: u16,
    pub admin_state: bool,
    pub dca_enabled: bool,
    pub dtp_enabled: bool,
}

impl RadioParams {
    /// DCA and DTP are on unless the controller says otherwise.
    pub fn resolve(&self, defaults: &BandDefaults) -> DeployedRadio {
        DeployedRadio {
            channel: self.channel.unwrap_or(defaults.channel),
            channel_width: self.channel_width.unwrap_or(defaults.channel_width),
            transmit_power: self.transmit_power.unwrap_or(defaults.tx_power),
            admin_state: self.admin_state.unwrap_or(defaults.admin_state),
            dca_enabled: self.dca.unwrap_or(true),
            dtp_enabled: self.dtp.unwrap_or(true),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApSpecConfigReply {
    #[serde(rename = "Cisco-IOS-XE-wireless-radio-cfg:ap-spec-config", default)]
    pub entries: Vec<ApSpecConfig>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApSpecificConfigReply {
    #[serde(rename = "Cisco-IOS-XE-wireless-radio-cfg:ap-specific-config", default)]
    pub entries: Vec<ApSpecificConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApCfgDocument {
    #[serde(rename = "Cisco-IOS-XE-wireless-ap-cfg:ap-cfg-data")]
    pub data: ApCfgData,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ApCfgData {
    pub ap_tags: ApTags,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ApTags {
    #[serde(rename = "ap-tag", default)]
    pub entries: Vec<ApTag>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ApTag {
    pub ap_mac: String,
    pub policy_tag: String,
    pub site_tag: String,
    pub rf_tag: String,
}
