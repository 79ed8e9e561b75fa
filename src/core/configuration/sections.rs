use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct InventoryConfiguration {
    pub url: Option<String>,
    pub token: Option<String>,
    /// device role slug identifying access points
    pub ap_role: Option<String>,
    /// request timeout in seconds
    pub timeout: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ControllerConfiguration {
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls_verify: Option<bool>,
    /// request timeout in seconds
    pub timeout: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TagsConfiguration {
    pub policy_tag: Option<String>,
    pub site_tag: Option<String>,
    pub rf_tag: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LogConfiguration {
    pub level: Option<String>,
    pub retention: Option<usize>,
    pub directory: Option<String>,
}
