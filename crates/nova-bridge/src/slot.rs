//! The per-thread engine slot.
//!
//! `None` is the Uninitialized state, `Some` is Running. Every bridge call
//! goes through [`with_engine`], so a call before `initialize()` becomes a
//! typed violation instead of a dangling access.

use std::cell::RefCell;

use nova_engine::{ContractViolation, Engine, EngineConfig};

thread_local! {
    static ENGINE: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

/// Uninitialized → Running.
pub(crate) fn initialize(config: EngineConfig) -> Result<(), ContractViolation> {
    ENGINE.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_some() {
            return Err(ContractViolation::AlreadyInitialized);
        }
        *slot = Some(Engine::start(config));
        Ok(())
    })
}

/// Running → Uninitialized.
pub(crate) fn shutdown(call: &'static str) -> Result<(), ContractViolation> {
    let engine = ENGINE.with(|cell| cell.borrow_mut().take());
    match engine {
        Some(engine) => {
            engine.shutdown();
            Ok(())
        }
        None => Err(ContractViolation::NotInitialized { call }),
    }
}

/// Runs `f` against the running engine.
pub(crate) fn with_engine<R>(
    call: &'static str,
    f: impl FnOnce(&mut Engine) -> R,
) -> Result<R, ContractViolation> {
    ENGINE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let engine = slot.as_mut().ok_or(ContractViolation::NotInitialized { call })?;
        Ok(f(engine))
    })
}

pub(crate) fn is_initialized() -> bool {
    ENGINE.with(|cell| cell.borrow().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each #[test] runs on its own thread, so each sees a fresh slot.

    #[test]
    fn calls_before_initialize_are_rejected() {
        let err = with_engine("execute_frame", |e| e.execute_frame()).unwrap_err();
        assert_eq!(err, ContractViolation::NotInitialized { call: "execute_frame" });
    }

    #[test]
    fn second_initialize_is_rejected() {
        initialize(EngineConfig::headless()).unwrap();
        assert_eq!(initialize(EngineConfig::headless()), Err(ContractViolation::AlreadyInitialized));
        shutdown("shutdown").unwrap();
    }

    #[test]
    fn shutdown_returns_to_uninitialized() {
        initialize(EngineConfig::headless()).unwrap();
        assert!(is_initialized());
        shutdown("shutdown").unwrap();
        assert!(!is_initialized());
        assert!(shutdown("shutdown").is_err());

        initialize(EngineConfig::headless()).unwrap();
        shutdown("shutdown").unwrap();
    }

    #[test]
    fn slots_are_per_thread() {
        initialize(EngineConfig::headless()).unwrap();
        let other = std::thread::spawn(is_initialized).join().unwrap();
        assert!(!other);
        shutdown("shutdown").unwrap();
    }
}
