use crate::error::VaultError;
use crate::storage::{is_locked, set_locked};
use soroban_sdk::{log, Env};

/// Take the single-flight lock, failing if a guarded operation is already running
pub fn enter(env: &Env) -> Result<(), VaultError> {
    if is_locked(env) {
        log!(env, "reentrant call rejected");
        return Err(VaultError::Reentrant);
    }
    set_locked(env, true);
    Ok(())
}

pub fn exit(env: &Env) {
    set_locked(env, false);
}

/// Run `f` holding the lock. The lock is released on both outcomes; on
/// error the host also rolls the whole invocation back.
pub fn non_reentrant<T, F>(env: &Env, f: F) -> Result<T, VaultError>
where
    F: FnOnce() -> Result<T, VaultError>,
{
    enter(env)?;
    let result = f();
    exit(env);
    result
}
