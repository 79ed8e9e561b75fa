//! Inventory-side view of access points and controllers.

use async_trait::async_trait;
use lazy_static::lazy_static;
use mockall::automock;
use regex::Regex;

use crate::rf::{self, InvalidChannelError, RadioParameters, RfChannel};

pub mod netbox;

lazy_static! {
    static ref RADIO_INTERFACE_NAME: Regex =
        Regex::new(r"(?i)^radio(\d+)$").expect("invalid radio interface pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("{0} not found in inventory")]
    NotFound(String),
    #[error("inventory request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inventory is misconfigured: {0}")]
    Configuration(String),
}

/// Lookups against the inventory system.
#[automock]
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Every device holding the access point role.
    async fn access_points(&self) -> Result<Vec<Device>, InventoryError>;
    async fn interfaces(&self, device_id: u64) -> Result<Vec<Interface>, InventoryError>;
    async fn device(&self, device_id: u64) -> Result<Device, InventoryError>;
    /// Address record for an `address/prefix` string.
    async fn ip_address(&self, address: &str) -> Result<IpAddress, InventoryError>;
}

/// Controller device ids referenced by an access point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerRefs {
    pub primary: Option<u64>,
    pub secondary: Option<u64>,
    pub tertiary: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: u64,
    pub name: String,
    pub primary_ip4: Option<String>,
    pub controllers: ControllerRefs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress {
    pub address: String,
    pub dns_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceRole {
    Radio { slot: u8 },
    Wired,
}

impl InterfaceRole {
    /// `radio<digits>`, in any case, is the radio in slot `<digits>`.
    /// Every other name is a wired interface.
    pub fn from_name(name: &str) -> Self {
        RADIO_INTERFACE_NAME
            .captures(name)
            .and_then(|c| c[1].parse::<u8>().ok())
            .map(|slot| InterfaceRole::Radio { slot })
            .unwrap_or(InterfaceRole::Wired)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub enabled: Option<bool>,
    pub mgmt_only: bool,
    pub mac_address: Option<String>,
    pub rf_channel: Option<RfChannel>,
    pub tx_power: Option<u16>,
}

impl Interface {
    pub fn role(&self) -> InterfaceRole {
        InterfaceRole::from_name(&self.name)
    }

    pub fn radio_slot(&self) -> Option<u8> {
        match self.role() {
            InterfaceRole::Radio { slot } => Some(slot),
            InterfaceRole::Wired => None,
        }
    }

    /// Decoded channel merged with the interface's power and admin state.
    pub fn radio_parameters(&self) -> Result<RadioParameters, InvalidChannelError> {
        let raw = self.rf_channel.as_ref().ok_or(InvalidChannelError::Missing)?;

        Ok(rf::decode(raw)?
            .with_tx_power(self.tx_power)
            .with_enabled(self.enabled))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub name: String,
    pub mac: String,
    pub controllers: ControllerRefs,
    pub interfaces: Vec<Interface>,
}

impl AccessPoint {
    /// The management MAC is taken from the management-only interface.
    pub fn new(device: Device, interfaces: Vec<Interface>) -> Result<Self, InventoryError> {
        let mac = interfaces
            .iter()
            .find(|i| i.mgmt_only)
            .and_then(|i| i.mac_address.clone())
            .ok_or_else(|| InventoryError::NotFound(format!("management MAC of {}", device.name)))?;

        Ok(Self {
            name: device.name,
            mac,
            controllers: device.controllers,
            interfaces,
        })
    }
}
