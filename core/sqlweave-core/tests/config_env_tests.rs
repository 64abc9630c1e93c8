// Environment overrides live in their own test binary: a single test
// mutates the process environment, so nothing runs alongside it.

use sqlweave_core::config::{ENV_FIRST_ID, ENV_ON_ERROR};
use sqlweave_core::{ErrorPolicy, PersistConfig, WeaveError};

#[test]
fn test_env_overrides() {
    unsafe {
        std::env::remove_var(ENV_FIRST_ID);
        std::env::remove_var(ENV_ON_ERROR);
    }
    assert_eq!(PersistConfig::from_env().unwrap(), PersistConfig::default());

    unsafe {
        std::env::set_var(ENV_FIRST_ID, " 42 ");
        std::env::set_var(ENV_ON_ERROR, "skip_subtree");
    }
    let config = PersistConfig::from_env().unwrap();
    assert_eq!(config.first_id, 42);
    assert_eq!(config.on_error, ErrorPolicy::SkipSubtree);

    unsafe {
        std::env::set_var(ENV_FIRST_ID, "twelve");
    }
    assert!(matches!(
        PersistConfig::from_env(),
        Err(WeaveError::InvalidConfig(_))
    ));

    unsafe {
        std::env::set_var(ENV_FIRST_ID, "7");
        std::env::set_var(ENV_ON_ERROR, "retry");
    }
    assert!(matches!(
        PersistConfig::from_env(),
        Err(WeaveError::InvalidConfig(_))
    ));

    unsafe {
        std::env::remove_var(ENV_FIRST_ID);
        std::env::remove_var(ENV_ON_ERROR);
    }
}
