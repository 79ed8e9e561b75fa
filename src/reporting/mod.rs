use std::{io::Write, path::Path};

use log::info;
use serde::Serialize;

use crate::{
    association::{ControllerAssociation, Priority},
    provisioning::{OutcomeStatus, ProvisionOutcome},
    validation::ValidationCheck,
};

const SEPARATOR_WIDTH: usize = 78;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Provision,
    DryRun,
    Validate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControllerReport {
    pub name: String,
    pub address: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provisioning: Vec<ProvisionOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ValidationCheck>,
}

impl ControllerReport {
    pub fn new(association: &ControllerAssociation) -> Self {
        Self {
            name: association.controller_name.clone(),
            address: association.controller_address.clone(),
            priority: association.priority,
            errors: vec![],
            provisioning: vec![],
            checks: vec![],
        }
    }

    fn is_success(&self) -> bool {
        self.errors.is_empty()
            && self.provisioning.iter().all(|o| o.is_applied())
            && self.checks.iter().all(|c| c.passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub controllers: Vec<ControllerReport>,
}

impl ApReport {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mac: None,
            errors: vec![],
            controllers: vec![],
        }
    }
}

/// Everything a provisioning or validation run did, in run order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub mode: RunMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
    pub access_points: Vec<ApReport>,
}

impl RunReport {
    pub fn new(mode: RunMode) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            mode,
            failures: vec![],
            access_points: vec![],
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
            && self
                .access_points
                .iter()
                .all(|ap| ap.errors.is_empty() && ap.controllers.iter().all(|c| c.is_success()))
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let separator = "*".repeat(SEPARATOR_WIDTH);
        let mut lines = vec![separator.clone()];

        for failure in &self.failures {
            lines.push(format!("FAILED: {failure}"));
        }

        let verb = match self.mode {
            RunMode::Provision => "Processing",
            RunMode::DryRun => "Rendering",
            RunMode::Validate => "Testing",
        };

        for ap in &self.access_points {
            lines.push(format!("{verb} AP {}... ", ap.name));

            for error in &ap.errors {
                lines.push(format!("    FAILED - {error}"));
            }

            for controller in &ap.controllers {
                lines.push(format!(
                    "    Controller '{}' ({}, {})... ",
                    controller.name, controller.priority, controller.address
                ));

                for error in &controller.errors {
                    lines.push(format!("        FAILED - {error}"));
                }

                for outcome in &controller.provisioning {
                    lines.push(format!(
                        "        {:<30}... {}",
                        outcome.label,
                        outcome_result(&outcome.status)
                    ));
                }

                for check in &controller.checks {
                    lines.push(format!(
                        "        {:<30}... {}",
                        format!("{} {}", check.subject, check.name),
                        check_result(check)
                    ));
                }
            }

            lines.push(separator.clone());
        }

        lines
    }

    pub fn print_summary(&self) {
        for line in self.summary_lines() {
            println!("{line}");
        }
    }

    pub fn write_json(
        &self,
        output_path: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = ensure_output_writable(output_path)?;

        let mut file = std::fs::File::create(path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        file.flush()?;

        info!("report written to {output_path}");

        Ok(())
    }
}

fn outcome_result(status: &OutcomeStatus) -> String {
    match status {
        OutcomeStatus::Applied => "OK".to_string(),
        OutcomeStatus::TransportFailed(reason) | OutcomeStatus::InvalidData(reason) => {
            format!("FAILED - {reason}")
        }
    }
}

fn check_result(check: &ValidationCheck) -> String {
    if check.passed {
        return "OK".to_string();
    }

    match (&check.reason, &check.actual) {
        (Some(reason), _) => format!("FAILED - {reason}"),
        (None, Some(actual)) => {
            format!("Configured: {actual}, expected: {}. FAILED", check.expected)
        }
        (None, None) => "FAILED".to_string(),
    }
}

fn ensure_output_writable(
    output_path: &str,
) -> Result<&Path, Box<dyn std::error::Error + Send + Sync>> {
    let path = Path::new(output_path);

    if path.is_dir() {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path is a directory",
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path parent directory does not exist",
            )));
        }
    }

    Ok(path)
}
