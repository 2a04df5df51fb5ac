use super::{types::Config, ConfigError, StoreBackend};

/// Validate configuration
/// Currently validates:
/// - Store section exists (enforced by serde)
/// - Batch size is not 0
/// - Remote section is present and usable when the remote backend is selected
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Browse validation
    if config.browse.batch_size == 0 {
        return Err(ConfigError::ValidationError(
            "browse.batch_size cannot be 0".to_string(),
        ));
    }

    // Store validation
    if config.store.backend == StoreBackend::Remote {
        match &config.store.remote {
            Some(remote) => {
                if remote.data_url.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "store.remote.data_url cannot be empty".to_string(),
                    ));
                }
                if remote.auth_url.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "store.remote.auth_url cannot be empty".to_string(),
                    ));
                }
            }
            None => {
                return Err(ConfigError::ValidationError(
                    "[store.remote] must be set when store.backend is \"remote\"".to_string(),
                ));
            }
        }
    }

    Ok(())
}
