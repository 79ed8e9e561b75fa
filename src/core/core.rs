use log::{error, info, warn};

use crate::{
    association,
    inventory::{netbox::NetboxInventory, AccessPoint, Device, Inventory},
    provisioning::{
        render::{Renderer, RestconfRenderer},
        Provisioner,
    },
    reporting::{ApReport, ControllerReport, RunMode, RunReport},
    validation::Validator,
};

use super::{
    common::http_client_factory::{DryRunSessionFactory, RestconfSessionFactory, SessionFactory},
    configuration::Configuration,
};

pub const NO_ACCESS_POINTS: &str = "no access points defined in the inventory, nothing to test";

/// ### Provision every access point
/// Pushes hostname, default tags and radio settings of each inventory AP to
/// every controller it is associated with.
/// ### Arguments
/// * `conf` - The configuration object
/// * `dry_run` - Render and log the documents instead of sending them
/// ### Errors
/// * when the configuration is incomplete or the AP listing fails
pub async fn provision(
    conf: &Configuration,
    dry_run: bool,
) -> Result<RunReport, Box<dyn std::error::Error + Send + Sync>> {
    conf.assert_inventory_is_reachable()?;

    let inventory = NetboxInventory::new(&conf.inventory)?;
    let renderer = RestconfRenderer::new(&conf.tags);

    if dry_run {
        info!("dry run, no update will be sent to the controllers");
        return run_provisioning(
            &inventory,
            &DryRunSessionFactory,
            &renderer,
            RunMode::DryRun,
        )
        .await;
    }

    conf.assert_controller_credentials()?;
    let factory = RestconfSessionFactory::new(&conf.controller);

    run_provisioning(&inventory, &factory, &renderer, RunMode::Provision).await
}

/// ### Validate every access point
/// Reads back what each associated controller holds for the AP and compares
/// it with the inventory.
pub async fn validate(
    conf: &Configuration,
) -> Result<RunReport, Box<dyn std::error::Error + Send + Sync>> {
    conf.assert_inventory_is_reachable()?;
    conf.assert_controller_credentials()?;

    let inventory = NetboxInventory::new(&conf.inventory)?;
    let factory = RestconfSessionFactory::new(&conf.controller);

    run_validation(&inventory, &factory).await
}

pub async fn run_provisioning(
    inventory: &dyn Inventory,
    factory: &dyn SessionFactory,
    renderer: &dyn Renderer,
    mode: RunMode,
) -> Result<RunReport, Box<dyn std::error::Error + Send + Sync>> {
    let mut report = RunReport::new(mode);

    for device in inventory.access_points().await? {
        info!("processing AP {}", device.name);

        let (ap, mut ap_report) = match load_access_point(inventory, device).await {
            Ok(loaded) => loaded,
            Err(failed) => {
                report.access_points.push(failed);
                continue;
            }
        };

        for association in association::resolve(inventory, &ap).await {
            let mut controller_report = ControllerReport::new(&association);

            match factory.open(&association.controller_address) {
                Ok(transport) => {
                    let provisioner = Provisioner::new(transport.as_ref(), renderer);

                    controller_report.provisioning =
                        provisioner.provision_identity(&ap.name, &ap.mac).await;
                    controller_report.provisioning.extend(
                        provisioner
                            .provision_radios(&ap.name, &ap.mac, &ap.interfaces)
                            .await,
                    );
                }
                Err(e) => {
                    error!(
                        "{}: cannot open session to {}: {e}",
                        ap.name, association.controller_name
                    );
                    controller_report.errors.push(e.to_string());
                }
            }

            ap_report.controllers.push(controller_report);
        }

        report.access_points.push(ap_report);
    }

    Ok(report)
}

pub async fn run_validation(
    inventory: &dyn Inventory,
    factory: &dyn SessionFactory,
) -> Result<RunReport, Box<dyn std::error::Error + Send + Sync>> {
    let mut report = RunReport::new(RunMode::Validate);

    let devices = inventory.access_points().await?;

    if devices.is_empty() {
        warn!("{NO_ACCESS_POINTS}");
        report.failures.push(NO_ACCESS_POINTS.to_string());
        return Ok(report);
    }

    for device in devices {
        info!("testing AP {} association to controllers", device.name);

        let (ap, mut ap_report) = match load_access_point(inventory, device).await {
            Ok(loaded) => loaded,
            Err(failed) => {
                report.access_points.push(failed);
                continue;
            }
        };

        for association in association::resolve(inventory, &ap).await {
            let mut controller_report = ControllerReport::new(&association);

            match factory.open(&association.controller_address) {
                Ok(transport) => {
                    let validator = Validator::new(transport.as_ref());

                    controller_report.checks =
                        vec![validator.validate_identity(&ap.name, &ap.mac).await];
                    controller_report
                        .checks
                        .extend(validator.validate_radios(&ap.mac, &ap.interfaces).await);
                }
                Err(e) => {
                    error!(
                        "{}: cannot open session to {}: {e}",
                        ap.name, association.controller_name
                    );
                    controller_report.errors.push(e.to_string());
                }
            }

            ap_report.controllers.push(controller_report);
        }

        report.access_points.push(ap_report);
    }

    Ok(report)
}

/// Interfaces and management MAC of an AP. On failure the returned report
/// carries the reason and the AP is skipped.
async fn load_access_point(
    inventory: &dyn Inventory,
    device: Device,
) -> Result<(AccessPoint, ApReport), ApReport> {
    let mut ap_report = ApReport::new(&device.name);

    let loaded = match inventory.interfaces(device.id).await {
        Ok(interfaces) => AccessPoint::new(device, interfaces),
        Err(e) => Err(e),
    };

    match loaded {
        Ok(ap) => {
            ap_report.mac = Some(ap.mac.clone());
            Ok((ap, ap_report))
        }
        Err(e) => {
            error!("{}: {e}", ap_report.name);
            ap_report.errors.push(e.to_string());
            Err(ap_report)
        }
    }
}
