//! Applies access point identity, tags and radio settings to a controller.
//!
//! Every call is attempted once and reported on its own; nothing a single
//! call does stops the next one from being attempted.

use log::{error, info, warn};
use serde::Serialize;

use crate::{core::common::transport::ControllerTransport, inventory::Interface};

pub mod render;

use render::{RenderParams, Renderer, Template};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Applied,
    TransportFailed(String),
    InvalidData(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionOutcome {
    pub label: String,
    pub status: OutcomeStatus,
}

impl ProvisionOutcome {
    pub fn is_applied(&self) -> bool {
        self.status == OutcomeStatus::Applied
    }
}

pub struct Provisioner<'a> {
    transport: &'a dyn ControllerTransport,
    renderer: &'a dyn Renderer,
}

impl<'a> Provisioner<'a> {
    pub fn new(transport: &'a dyn ControllerTransport, renderer: &'a dyn Renderer) -> Self {
        Self {
            transport,
            renderer,
        }
    }

    /// Assigns the hostname, then the default tags, to the AP keyed by `ap_mac`.
    pub async fn provision_identity(&self, ap_name: &str, ap_mac: &str) -> Vec<ProvisionOutcome> {
        let params = RenderParams::identity(ap_name, ap_mac);

        vec![
            self.apply("hostname", Template::ApHostname, &params).await,
            self.apply("default tags", Template::ApTags, &params).await,
        ]
    }

    /// Pushes one partial update per radio interface. Wired interfaces are skipped.
    pub async fn provision_radios(
        &self,
        ap_name: &str,
        ap_mac: &str,
        interfaces: &[Interface],
    ) -> Vec<ProvisionOutcome> {
        let mut outcomes = vec![];

        for interface in interfaces.iter().filter(|i| i.radio_slot().is_some()) {
            let outcome = match interface.radio_parameters() {
                Ok(radio) => {
                    let params = RenderParams::radio(ap_name, ap_mac, interface, &radio);
                    self.apply(&interface.name, Template::ApRadio, &params).await
                }
                Err(e) => {
                    warn!("{ap_name}: {}: {e}", interface.name);
                    ProvisionOutcome {
                        label: interface.name.clone(),
                        status: OutcomeStatus::InvalidData(e.to_string()),
                    }
                }
            };

            outcomes.push(outcome);
        }

        outcomes
    }

    async fn apply(
        &self,
        label: &str,
        template: Template,
        params: &RenderParams<'_>,
    ) -> ProvisionOutcome {
        let status = match self.renderer.render(template, params) {
            Err(e) => {
                error!("{}: cannot render {}: {e}", params.ap_name, template.name());
                OutcomeStatus::InvalidData(e.to_string())
            }
            Ok(document) => match self.transport.update(template.resource(), document).await {
                Ok(()) => {
                    info!("{}: {label} applied", params.ap_name);
                    OutcomeStatus::Applied
                }
                Err(e) => {
                    error!("{}: {label} failed: {e}", params.ap_name);
                    OutcomeStatus::TransportFailed(e.reason)
                }
            },
        };

        ProvisionOutcome {
            label: label.to_string(),
            status,
        }
    }
}
