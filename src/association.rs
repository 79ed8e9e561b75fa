use std::fmt::Display;

use log::{debug, warn};
use serde::Serialize;

use crate::inventory::{AccessPoint, Inventory, InventoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Primary,
    Secondary,
    Tertiary,
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Primary => write!(f, "primary"),
            Priority::Secondary => write!(f, "secondary"),
            Priority::Tertiary => write!(f, "tertiary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerAssociation {
    pub priority: Priority,
    pub controller_name: String,
    pub controller_address: String,
}

/// Controllers the access point registers to, primary first.
///
/// Unset slots are skipped. A slot whose controller cannot be found or has
/// no management address is dropped with a warning.
pub async fn resolve(inventory: &dyn Inventory, ap: &AccessPoint) -> Vec<ControllerAssociation> {
    let slots = [
        (Priority::Primary, ap.controllers.primary),
        (Priority::Secondary, ap.controllers.secondary),
        (Priority::Tertiary, ap.controllers.tertiary),
    ];

    let mut associations = vec![];

    for (priority, controller_id) in slots {
        let Some(controller_id) = controller_id else {
            continue;
        };

        match resolve_slot(inventory, priority, controller_id).await {
            Ok(Some(association)) => {
                debug!(
                    "{}: {priority} controller {} at {}",
                    ap.name, association.controller_name, association.controller_address
                );
                associations.push(association);
            }
            Ok(None) => warn!(
                "{}: {priority} controller {controller_id} has no management address, skipping",
                ap.name
            ),
            Err(e) => warn!("{}: cannot resolve {priority} controller: {e}", ap.name),
        }
    }

    associations
}

async fn resolve_slot(
    inventory: &dyn Inventory,
    priority: Priority,
    controller_id: u64,
) -> Result<Option<ControllerAssociation>, InventoryError> {
    let controller = inventory.device(controller_id).await?;

    let Some(primary_ip) = controller.primary_ip4 else {
        return Ok(None);
    };

    let bare_ip = primary_ip
        .split('/')
        .next()
        .unwrap_or(primary_ip.as_str())
        .to_string();

    let address = match inventory.ip_address(&primary_ip).await {
        Ok(record) => record.dns_name.unwrap_or(bare_ip),
        Err(InventoryError::NotFound(_)) => bare_ip,
        Err(e) => return Err(e),
    };

    Ok(Some(ControllerAssociation {
        priority,
        controller_name: controller.name,
        controller_address: address,
    }))
}
