//! Compares the configuration deployed on a controller with the inventory's
//! intent for an access point.

use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::common::transport::{ControllerTransport, TransportFailure},
    inventory::Interface,
    rf::RadioParameters,
    wlc::{
        ap_spec_config_resource, ap_specific_config_resource, ApSpecConfigReply,
        ApSpecificConfigReply, DeployedRadio, SlotConfig,
    },
};


pub const AP_NOT_PRESENT: &str = "AP not present";
pub const NO_RADIO_CONFIG: &str = "no radio config present";

const IDENTITY_CHECK: &str = "AP name present in config DB";
const RADIO_CONFIG_CHECK: &str = "radio configuration";
const RF_CHANNEL_CHECK: &str = "rf channel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationCheck {
    pub subject: String,
    pub name: String,
    pub expected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationCheck {
    fn compare(subject: &str, name: &str, expected: String, actual: String) -> Self {
        Self {
            subject: subject.to_string(),
            name: name.to_string(),
            passed: expected == actual,
            expected,
            actual: Some(actual),
            reason: None,
        }
    }

    fn failed(subject: &str, name: &str, expected: String, reason: &str) -> Self {
        Self {
            subject: subject.to_string(),
            name: name.to_string(),
            expected,
            actual: None,
            passed: false,
            reason: Some(reason.to_string()),
        }
    }
}

fn state(enabled: bool) -> String {
    let state = if enabled { "enabled" } else { "disabled" };
    state.to_string()
}

/// Names of the per-radio checks, in reporting order.
const RADIO_CHECKS: [&str; 6] = [
    "channel",
    "channel width",
    "tx power",
    "dca disabled",
    "dtp disabled",
    "admin state",
];

fn intended_values(radio: &RadioParameters) -> [String; 6] {
    [
        radio.channel.to_string(),
        radio.channel_width.to_string(),
        radio.tx_power_or_default().to_string(),
        state(false),
        state(false),
        state(radio.enabled_or_default()),
    ]
}

fn deployed_values(radio: &DeployedRadio) -> [String; 6] {
    [
        radio.channel.to_string(),
        radio.channel_width.to_string(),
        radio.transmit_power.to_string(),
        state(radio.dca_enabled),
        state(radio.dtp_enabled),
        state(radio.admin_state),
    ]
}

pub struct Validator<'a> {
    transport: &'a dyn ControllerTransport,
}

impl<'a> Validator<'a> {
    pub fn new(transport: &'a dyn ControllerTransport) -> Self {
        Self { transport }
    }

    async fn read<T: DeserializeOwned>(&self, resource: &str) -> Result<T, TransportFailure> {
        let value = self.transport.read(resource).await?;

        serde_json::from_value(value)
            .map_err(|e| TransportFailure::new(format!("undecodable reply for {resource}: {e}")))
    }

    /// Host name and MAC of the AP's spec-config record, both compared
    /// case-insensitively.
    pub async fn validate_identity(&self, ap_name: &str, ap_mac: &str) -> ValidationCheck {
        let expected = format!("{ap_name} ({ap_mac})");

        let record = match self
            .read::<ApSpecConfigReply>(&ap_spec_config_resource(ap_mac))
            .await
        {
            Ok(reply) => reply.entries.into_iter().next(),
            Err(e) => {
                warn!("{ap_name}: cannot read spec config: {e}");
                None
            }
        };

        let Some(record) = record else {
            return ValidationCheck::failed(ap_name, IDENTITY_CHECK, expected, AP_NOT_PRESENT);
        };

        let host_name = record.ap_host_name.unwrap_or_default();
        let mac = record.ap_eth_mac_addr.unwrap_or_default();

        let mut check = ValidationCheck::compare(
            ap_name,
            IDENTITY_CHECK,
            expected,
            format!("{host_name} ({mac})"),
        );
        check.passed = host_name.eq_ignore_ascii_case(ap_name) && mac.eq_ignore_ascii_case(ap_mac);
        if !check.passed {
            check.reason = Some("AP name or MAC mismatch".to_string());
        }

        check
    }

    /// Six checks per radio interface of the AP.
    pub async fn validate_radios(
        &self,
        ap_mac: &str,
        interfaces: &[Interface],
    ) -> Vec<ValidationCheck> {
        let radios: Vec<(u8, &Interface)> = interfaces
            .iter()
            .filter_map(|i| i.radio_slot().map(|slot| (slot, i)))
            .collect();

        if radios.is_empty() {
            debug!("{ap_mac}: no radio interfaces, nothing to validate");
            return vec![];
        }

        let slots = match self
            .read::<ApSpecificConfigReply>(&ap_specific_config_resource(ap_mac))
            .await
        {
            Ok(reply) => reply
                .entries
                .into_iter()
                .next()
                .and_then(|config| config.ap_specific_slot_configs)
                .map(|slots| slots.entries),
            Err(e) => {
                warn!("{ap_mac}: cannot read radio config: {e}");
                None
            }
        };

        let Some(slots) = slots else {
            return vec![ValidationCheck::failed(
                ap_mac,
                RADIO_CONFIG_CHECK,
                "present".to_string(),
                NO_RADIO_CONFIG,
            )];
        };

        radios
            .into_iter()
            .flat_map(|(slot, interface)| check_radio(slot, interface, &slots))
            .collect()
    }
}

fn check_radio(slot: u8, interface: &Interface, slots: &[SlotConfig]) -> Vec<ValidationCheck> {
    let subject = interface.name.as_str();

    let intended = match interface.radio_parameters() {
        Ok(radio) => radio,
        Err(e) => {
            let expected = interface
                .rf_channel
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_default();
            return vec![ValidationCheck::failed(
                subject,
                RF_CHANNEL_CHECK,
                expected,
                &e.to_string(),
            )];
        }
    };

    let expected = intended_values(&intended);

    let Some(entry) = slots.iter().find(|s| s.slot_id == Some(slot)) else {
        return RADIO_CHECKS
            .iter()
            .zip(expected)
            .map(|(name, expected)| {
                ValidationCheck::failed(subject, name, expected, NO_RADIO_CONFIG)
            })
            .collect();
    };

    // an absent band sub-object means every leaf holds its default
    let deployed = entry
        .params(intended.band)
        .cloned()
        .unwrap_or_default()
        .resolve(intended.band.defaults());

    RADIO_CHECKS
        .iter()
        .zip(expected)
        .zip(deployed_values(&deployed))
        .map(|((name, expected), actual)| ValidationCheck::compare(subject, name, expected, actual))
        .collect()
}
