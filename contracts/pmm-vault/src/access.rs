use crate::error::VaultError;
use crate::storage::get_config;
use pmm_types::VaultConfig;
use soroban_sdk::{Address, Env};

pub fn is_admin(config: &VaultConfig, caller: &Address) -> bool {
    config.admin == *caller
}

pub fn is_maintainer(config: &VaultConfig, caller: &Address) -> bool {
    config.maintainer == *caller
}

/// Authenticate `caller` and require it to be the admin
pub fn require_admin(env: &Env, caller: &Address) -> Result<VaultConfig, VaultError> {
    caller.require_auth();
    let config = get_config(env)?;
    if !is_admin(&config, caller) {
        return Err(VaultError::AccessDenied);
    }
    Ok(config)
}

/// Authenticate `caller` and require it to be the maintainer
pub fn require_maintainer(env: &Env, caller: &Address) -> Result<VaultConfig, VaultError> {
    caller.require_auth();
    let config = get_config(env)?;
    if !is_maintainer(&config, caller) {
        return Err(VaultError::AccessDenied);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, BytesN, Env};

    fn config(env: &Env) -> VaultConfig {
        VaultConfig {
            base_token: Address::generate(env),
            quote_token: Address::generate(env),
            admin: Address::generate(env),
            maintainer: Address::generate(env),
            domain_separator: BytesN::from_array(env, &[0u8; 32]),
        }
    }

    #[test]
    fn test_role_predicates() {
        let env = Env::default();
        let config = config(&env);
        let stranger = Address::generate(&env);

        assert!(is_admin(&config, &config.admin));
        assert!(!is_admin(&config, &config.maintainer));
        assert!(!is_admin(&config, &stranger));

        assert!(is_maintainer(&config, &config.maintainer));
        assert!(!is_maintainer(&config, &config.admin));
        assert!(!is_maintainer(&config, &stranger));
    }

    #[test]
    fn test_roles_are_independent() {
        let env = Env::default();
        let mut config = config(&env);
        // One identity may hold both roles; neither implies the other
        config.maintainer = config.admin.clone();
        assert!(is_admin(&config, &config.admin));
        assert!(is_maintainer(&config, &config.admin));
    }
}
