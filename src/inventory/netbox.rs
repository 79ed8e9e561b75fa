use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use super::{ControllerRefs, Device, Interface, Inventory, InventoryError, IpAddress};
use crate::{
    core::{
        common::http_client_factory::inventory_client,
        configuration::{sections::InventoryConfiguration, DEFAULT_AP_ROLE, DEFAULT_TIMEOUT_SECS},
    },
    rf::RfChannel,
};

const PAGE_SIZE: u32 = 100;

#[derive(Deserialize, Debug)]
struct Page<T> {
    next: Option<String>,
    results: Vec<T>,
}

#[derive(Deserialize, Debug)]
struct NetboxDevice {
    id: u64,
    name: Option<String>,
    primary_ip4: Option<NetboxAddressRef>,
    #[serde(default)]
    custom_fields: NetboxCustomFields,
}

#[derive(Deserialize, Debug)]
struct NetboxAddressRef {
    address: String,
}

#[derive(Deserialize, Debug, Default)]
struct NetboxCustomFields {
    wlc_primary_association: Option<NetboxObjectRef>,
    wlc_secondary_association: Option<NetboxObjectRef>,
    wlc_tertiary_association: Option<NetboxObjectRef>,
}

#[derive(Deserialize, Debug)]
struct NetboxObjectRef {
    id: u64,
}

#[derive(Deserialize, Debug)]
struct NetboxChoice {
    value: String,
}

#[derive(Deserialize, Debug)]
struct NetboxInterface {
    name: String,
    enabled: Option<bool>,
    #[serde(default)]
    mgmt_only: bool,
    mac_address: Option<String>,
    rf_channel: Option<NetboxChoice>,
    tx_power: Option<u16>,
}

#[derive(Deserialize, Debug)]
struct NetboxIpAddress {
    address: String,
    dns_name: Option<String>,
}

impl From<NetboxDevice> for Device {
    fn from(d: NetboxDevice) -> Self {
        let id_of = |r: Option<NetboxObjectRef>| r.map(|r| r.id);

        Device {
            id: d.id,
            name: d.name.unwrap_or_else(|| format!("device-{}", d.id)),
            primary_ip4: d.primary_ip4.map(|ip| ip.address),
            controllers: ControllerRefs {
                primary: id_of(d.custom_fields.wlc_primary_association),
                secondary: id_of(d.custom_fields.wlc_secondary_association),
                tertiary: id_of(d.custom_fields.wlc_tertiary_association),
            },
        }
    }
}

impl From<NetboxInterface> for Interface {
    fn from(i: NetboxInterface) -> Self {
        Interface {
            name: i.name,
            enabled: i.enabled,
            mgmt_only: i.mgmt_only,
            mac_address: i.mac_address,
            rf_channel: i.rf_channel.map(|c| RfChannel::new(c.value)),
            tx_power: i.tx_power,
        }
    }
}

/// NetBox REST API backed inventory.
pub struct NetboxInventory {
    client: Client,
    api_url: String,
    ap_role: String,
}

impl NetboxInventory {
    pub fn new(conf: &InventoryConfiguration) -> Result<Self, InventoryError> {
        let url = conf
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| InventoryError::Configuration("url is not set".to_string()))?;

        let client = inventory_client(
            conf.token.as_deref(),
            conf.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        )?;

        Ok(Self::with_client(
            client,
            format!("{}/api/", url.trim_end_matches('/')),
            conf.ap_role.clone().unwrap_or_else(|| DEFAULT_AP_ROLE.to_string()),
        ))
    }

    pub fn with_client(client: Client, api_url: String, ap_role: String) -> Self {
        Self {
            client,
            api_url,
            ap_role,
        }
    }

    /// Fetches every page of a list endpoint.
    async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, InventoryError> {
        let url = format!("{}{}", self.api_url, endpoint);
        debug!("listing {url}");

        let mut page = self
            .client
            .get(url)
            .query(query)
            .query(&[("limit", PAGE_SIZE)])
            .send()
            .await?
            .error_for_status()?
            .json::<Page<T>>()
            .await?;

        let mut items = std::mem::take(&mut page.results);

        while let Some(next) = page.next.take() {
            debug!("following {next}");
            page = self
                .client
                .get(next)
                .send()
                .await?
                .error_for_status()?
                .json::<Page<T>>()
                .await?;
            items.append(&mut page.results);
        }

        Ok(items)
    }
}

#[async_trait]
impl Inventory for NetboxInventory {
    async fn access_points(&self) -> Result<Vec<Device>, InventoryError> {
        let devices = self
            .list::<NetboxDevice>("dcim/devices/", &[("role", self.ap_role.clone())])
            .await?;

        Ok(devices.into_iter().map(Device::from).collect())
    }

    async fn interfaces(&self, device_id: u64) -> Result<Vec<Interface>, InventoryError> {
        let interfaces = self
            .list::<NetboxInterface>("dcim/interfaces/", &[("device_id", device_id.to_string())])
            .await?;

        Ok(interfaces.into_iter().map(Interface::from).collect())
    }

    async fn device(&self, device_id: u64) -> Result<Device, InventoryError> {
        let url = format!("{}dcim/devices/{}/", self.api_url, device_id);
        debug!("fetching {url}");

        let res = self.client.get(url).send().await?;

        if res.status() == StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound(format!("device {device_id}")));
        }

        let device = res.error_for_status()?.json::<NetboxDevice>().await?;

        Ok(device.into())
    }

    async fn ip_address(&self, address: &str) -> Result<IpAddress, InventoryError> {
        let records = self
            .list::<NetboxIpAddress>("ipam/ip-addresses/", &[("address", address.to_string())])
            .await?;

        records
            .into_iter()
            .next()
            .map(|r| IpAddress {
                address: r.address,
                dns_name: r.dns_name.filter(|n| !n.trim().is_empty()),
            })
            .ok_or_else(|| InventoryError::NotFound(format!("ip address {address}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::NetboxInventory;
    use crate::{
        core::common::http_client_factory::inventory_client,
        inventory::{Inventory, InventoryError},
        rf::RfChannel,
    };

    async fn setup() -> (MockServer, NetboxInventory) {
        let server = MockServer::start().await;
        let client = inventory_client(Some("0123456789abcdef"), 5).unwrap();
        let inventory = NetboxInventory::with_client(
            client,
            format!("{}/api/", server.uri()),
            "ap".to_string(),
        );
        (server, inventory)
    }

    #[tokio::test]
    async fn access_points_follow_pagination() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("role", "ap"))
            .and(header("Authorization", "Token 0123456789abcdef"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": format!("{}/api/dcim/devices/?role=ap&limit=100&offset=100", server.uri()),
                "results": [{
                    "id": 10,
                    "name": "ap-01",
                    "primary_ip4": null,
                    "custom_fields": {
                        "wlc_primary_association": { "id": 2, "name": "wlc-01" },
                        "wlc_secondary_association": null,
                        "wlc_tertiary_association": { "id": 3, "name": "wlc-03" }
                    }
                }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("offset", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "results": [{ "id": 11, "name": "ap-02", "primary_ip4": null, "custom_fields": {} }]
            })))
            .with_priority(1)
            .mount(&server)
            .await;

        let devices = inventory.access_points().await.unwrap();

        assert_eq!(2, devices.len());
        assert_eq!("ap-01", devices[0].name);
        assert_eq!(Some(2), devices[0].controllers.primary);
        assert_eq!(None, devices[0].controllers.secondary);
        assert_eq!(Some(3), devices[0].controllers.tertiary);
        assert_eq!("ap-02", devices[1].name);
        assert_eq!(None, devices[1].controllers.primary);
    }

    #[tokio::test]
    async fn interfaces_are_mapped() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/interfaces/"))
            .and(query_param("device_id", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "results": [
                    {
                        "id": 100,
                        "name": "wired0",
                        "enabled": true,
                        "mgmt_only": true,
                        "mac_address": "00:11:22:33:44:55",
                        "rf_channel": null,
                        "tx_power": null
                    },
                    {
                        "id": 101,
                        "name": "radio0",
                        "enabled": false,
                        "mgmt_only": false,
                        "mac_address": null,
                        "rf_channel": { "value": "2.4g-6-2437-22", "label": "6 (2437 MHz)" },
                        "tx_power": 15
                    }
                ]
            })))
            .mount(&server)
            .await;

        let interfaces = inventory.interfaces(10).await.unwrap();

        assert_eq!(2, interfaces.len());
        assert!(interfaces[0].mgmt_only);
        assert_eq!(Some("00:11:22:33:44:55".to_string()), interfaces[0].mac_address);
        assert_eq!(Some(RfChannel::new("2.4g-6-2437-22")), interfaces[1].rf_channel);
        assert_eq!(Some(15), interfaces[1].tx_power);
        assert_eq!(Some(false), interfaces[1].enabled);
    }

    #[tokio::test]
    async fn missing_device_is_not_found() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/42/"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })),
            )
            .mount(&server)
            .await;

        let res = inventory.device(42).await;

        assert!(matches!(res, Err(InventoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn device_with_primary_address() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2,
                "name": "wlc-01",
                "primary_ip4": { "id": 7, "address": "10.0.0.5/24" },
                "custom_fields": {}
            })))
            .mount(&server)
            .await;

        let device = inventory.device(2).await.unwrap();

        assert_eq!("wlc-01", device.name);
        assert_eq!(Some("10.0.0.5/24".to_string()), device.primary_ip4);
    }

    #[tokio::test]
    async fn ip_address_lookup() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/ipam/ip-addresses/"))
            .and(query_param("address", "10.0.0.5/24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "next": null,
                "results": [{ "id": 7, "address": "10.0.0.5/24", "dns_name": "wlc-01.example.com" }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/ipam/ip-addresses/"))
            .and(query_param("address", "10.0.0.6/24"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 0, "next": null, "results": []
            })))
            .mount(&server)
            .await;

        let ip = inventory.ip_address("10.0.0.5/24").await.unwrap();
        assert_eq!(Some("wlc-01.example.com".to_string()), ip.dns_name);

        let res = inventory.ip_address("10.0.0.6/24").await;
        assert!(matches!(res, Err(InventoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn server_error_is_a_transport_error() {
        let (server, inventory) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let res = inventory.access_points().await;

        assert!(matches!(res, Err(InventoryError::Transport(_))));
    }
}
