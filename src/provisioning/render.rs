use crate::{
    core::configuration::{
        sections::TagsConfiguration, DEFAULT_POLICY_TAG, DEFAULT_RF_TAG, DEFAULT_SITE_TAG,
    },
    inventory::Interface,
    rf::RadioParameters,
    wlc::{
        ApCfgData, ApCfgDocument, ApSpecConfig, ApSpecConfigs, ApSpecificConfig,
        ApSpecificConfigs, ApTag, ApTags, RadioCfgData, RadioCfgDocument, RadioParams, SlotConfig,
        SlotConfigs, AP_CFG_DATA, RADIO_CFG_DATA,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    ApHostname,
    ApTags,
    ApRadio,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::ApHostname => "provision_ap_hostname",
            Template::ApTags => "ap_tags",
            Template::ApRadio => "provision_ap_radio",
        }
    }

    /// Resource the rendered document is sent to.
    pub fn resource(&self) -> &'static str {
        match self {
            Template::ApHostname | Template::ApRadio => RADIO_CFG_DATA,
            Template::ApTags => AP_CFG_DATA,
        }
    }
}

/// Named parameters available to templates. The radio template needs
/// `interface` and `radio`; the others only the AP identity.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub ap_name: &'a str,
    pub ap_mac: &'a str,
    pub interface: Option<&'a Interface>,
    pub radio: Option<&'a RadioParameters>,
}

impl<'a> RenderParams<'a> {
    pub fn identity(ap_name: &'a str, ap_mac: &'a str) -> Self {
        Self {
            ap_name,
            ap_mac,
            interface: None,
            radio: None,
        }
    }

    pub fn radio(
        ap_name: &'a str,
        ap_mac: &'a str,
        interface: &'a Interface,
        radio: &'a RadioParameters,
    ) -> Self {
        Self {
            ap_name,
            ap_mac,
            interface: Some(interface),
            radio: Some(radio),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template {template} needs the {parameter} parameter")]
    MissingParameter {
        template: &'static str,
        parameter: &'static str,
    },
    #[error("interface {0} is not a radio")]
    NotARadio(String),
    #[error("cannot serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Produces the wire document for a template.
pub trait Renderer: Send + Sync {
    fn render(&self, template: Template, params: &RenderParams) -> Result<String, RenderError>;
}

/// Renders RESTCONF JSON documents for the controller's wireless models.
pub struct RestconfRenderer {
    policy_tag: String,
    site_tag: String,
    rf_tag: String,
}

impl RestconfRenderer {
    pub fn new(conf: &TagsConfiguration) -> Self {
        Self {
            policy_tag: conf
                .policy_tag
                .clone()
                .unwrap_or_else(|| DEFAULT_POLICY_TAG.to_string()),
            site_tag: conf
                .site_tag
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_TAG.to_string()),
            rf_tag: conf.rf_tag.clone().unwrap_or_else(|| DEFAULT_RF_TAG.to_string()),
        }
    }

    fn hostname(&self, params: &RenderParams) -> RadioCfgDocument {
        RadioCfgDocument {
            data: RadioCfgData {
                ap_spec_configs: Some(ApSpecConfigs {
                    entries: vec![ApSpecConfig {
                        ap_eth_mac_addr: Some(params.ap_mac.to_string()),
                        ap_host_name: Some(params.ap_name.to_string()),
                    }],
                }),
                ap_specific_configs: None,
            },
        }
    }

    fn tags(&self, params: &RenderParams) -> ApCfgDocument {
        ApCfgDocument {
            data: ApCfgData {
                ap_tags: ApTags {
                    entries: vec![ApTag {
                        ap_mac: params.ap_mac.to_string(),
                        policy_tag: self.policy_tag.clone(),
                        site_tag: self.site_tag.clone(),
                        rf_tag: self.rf_tag.clone(),
                    }],
                },
            },
        }
    }

    fn radio(&self, params: &RenderParams) -> Result<RadioCfgDocument, RenderError> {
        let template = Template::ApRadio.name();

        let interface = params.interface.ok_or(RenderError::MissingParameter {
            template,
            parameter: "interface",
        })?;
        let radio = params.radio.ok_or(RenderError::MissingParameter {
            template,
            parameter: "radio",
        })?;
        let slot = interface
            .radio_slot()
            .ok_or_else(|| RenderError::NotARadio(interface.name.clone()))?;

        // explicit values are enforced, the controller must not retune them
        let radio_params = RadioParams {
            channel: Some(radio.channel),
            channel_width: Some(radio.channel_width),
            transmit_power: Some(radio.tx_power_or_default()),
            admin_state: Some(radio.enabled_or_default()),
            dca: Some(false),
            dtp: Some(false),
        };

        Ok(RadioCfgDocument {
            data: RadioCfgData {
                ap_spec_configs: None,
                ap_specific_configs: Some(ApSpecificConfigs {
                    entries: vec![ApSpecificConfig {
                        ap_eth_mac_addr: Some(params.ap_mac.to_string()),
                        ap_specific_slot_configs: Some(SlotConfigs {
                            entries: vec![SlotConfig::for_band(slot, radio.band, radio_params)],
                        }),
                    }],
                }),
            },
        })
    }
}

impl Renderer for RestconfRenderer {
    fn render(&self, template: Template, params: &RenderParams) -> Result<String, RenderError> {
        let document = match template {
            Template::ApHostname => serde_json::to_string(&self.hostname(params))?,
            Template::ApTags => serde_json::to_string(&self.tags(params))?,
            Template::ApRadio => serde_json::to_string(&self.radio(params)?)?,
        };

        Ok(document)
    }
}
