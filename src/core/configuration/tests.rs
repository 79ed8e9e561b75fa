#[cfg(test)]
mod test {
    use std::path::Path;

    use tokio::{
        fs::{self, File},
        io::AsyncWriteExt,
    };

    use crate::core::configuration::{
        get_configuration,
        sections::{
            ControllerConfiguration, InventoryConfiguration, LogConfiguration, TagsConfiguration,
        },
        Configuration, ConfigurationError,
    };

    async fn create_sample_file(
        path: &Path,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if path.exists() {
            fs::remove_file(path)
                .await
                .expect("cannot remove sample configuration file");
        }

        let mut file = File::create(path)
            .await
            .expect("cannot create sample configuration file");

        file.write_all(content.as_bytes())
            .await
            .expect("cannot write to sample configuration file");
        file.shutdown().await?;

        Ok(())
    }

    fn sample_configuration() -> Configuration {
        Configuration {
            inventory: InventoryConfiguration {
                url: Some("http://127.0.0.1:8000".to_string()),
                token: Some("0123456789abcdef".to_string()),
                ap_role: None,
                timeout: None,
            },
            controller: ControllerConfiguration {
                username: Some("developer".to_string()),
                password: Some("secret".to_string()),
                tls_verify: None,
                timeout: None,
            },
            tags: TagsConfiguration::default(),
            log: LogConfiguration::default(),
        }
    }

    #[tokio::test]
    async fn should_match_expected_values() {
        let path = Path::new("./test_conf_expected_values.toml");
        let content = "[inventory]
url = \"http://netbox.example.com:8000\"
ap_role = \"access-point\"
timeout = 10

[controller]
username = \"developer\"
password = \"1234QWer\"
tls_verify = false
timeout = 20

[tags]
policy_tag = \"campus-policy\"
site_tag = \"campus-site\"
rf_tag = \"campus-rf\"

[log]
level = \"Info\"
retention = 31
directory = \"logs\"";

        create_sample_file(path, content).await.unwrap();

        let conf = get_configuration(path.to_string_lossy().to_string())
            .await
            .expect("cannot load configuration");

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert_eq!("http://netbox.example.com:8000", conf.inventory.url.unwrap());
        assert_eq!("access-point", conf.inventory.ap_role.unwrap());
        assert_eq!(10, conf.inventory.timeout.unwrap());

        assert_eq!(false, conf.controller.tls_verify.unwrap());
        assert_eq!(20, conf.controller.timeout.unwrap());

        assert_eq!("campus-policy", conf.tags.policy_tag.unwrap());
        assert_eq!("campus-site", conf.tags.site_tag.unwrap());
        assert_eq!("campus-rf", conf.tags.rf_tag.unwrap());

        assert_eq!("Info", conf.log.level.unwrap());
        assert_eq!(31, conf.log.retention.unwrap());
        assert_eq!("logs", conf.log.directory.unwrap());
    }

    #[tokio::test]
    async fn optional_sections_default_to_empty() {
        let path = Path::new("./test_conf_optional_sections.toml");
        let content = "[inventory]
url = \"http://127.0.0.1:8000\"

[controller]
username = \"developer\"";

        create_sample_file(path, content).await.unwrap();

        let conf = get_configuration(path.to_string_lossy().to_string())
            .await
            .expect("cannot load configuration");

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert!(conf.tags.policy_tag.is_none());
        assert!(conf.log.level.is_none());
        assert!(conf.inventory.ap_role.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let res = get_configuration("./does_not_exist.toml".to_string()).await;

        assert!(matches!(res, Err(ConfigurationError::Missing(_))));
    }

    #[tokio::test]
    async fn corrupted_file_is_reported() {
        let path = Path::new("./test_conf_corrupted.toml");

        create_sample_file(path, "[inventory\nurl = ").await.unwrap();

        let res = get_configuration(path.to_string_lossy().to_string()).await;

        fs::remove_file(path)
            .await
            .expect("cannot cleanup sample configuration file");

        assert!(matches!(res, Err(ConfigurationError::Corrupted(_))));
    }

    #[test]
    fn environment_overrides_secrets() {
        let mut conf = sample_configuration();

        conf.apply_overrides(|name| match name {
            "NETBOX_TOKEN" => Some("from-env".to_string()),
            "WLC_PASSWORD" => Some("env-password".to_string()),
            _ => None,
        });

        assert_eq!("from-env", conf.inventory.token.unwrap());
        assert_eq!("env-password", conf.controller.password.unwrap());
        assert_eq!("developer", conf.controller.username.unwrap());
    }

    #[test]
    fn assert_inventory_is_reachable_tests() {
        let conf = sample_configuration();

        let mut conf2 = sample_configuration();
        conf2.inventory.url = Some("  ".to_string());

        let mut conf3 = sample_configuration();
        conf3.inventory.url = None;

        assert!(conf.assert_inventory_is_reachable().is_ok());
        assert!(conf2.assert_inventory_is_reachable().is_err());
        assert!(conf3.assert_inventory_is_reachable().is_err());
    }

    #[test]
    fn assert_controller_credentials_tests() {
        let conf = sample_configuration();

        let mut conf2 = sample_configuration();
        conf2.controller.username = Some("".to_string());

        let mut conf3 = sample_configuration();
        conf3.controller.password = None;

        assert!(conf.assert_controller_credentials().is_ok());
        assert!(matches!(
            conf2.assert_controller_credentials(),
            Err(ConfigurationError::MissingValue("controller.username"))
        ));
        assert!(matches!(
            conf3.assert_controller_credentials(),
            Err(ConfigurationError::MissingValue("controller.password"))
        ));
    }
}
