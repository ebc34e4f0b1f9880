//! Unit tests for `AppContext` construction from flags and `AGENT_UI_*`
//! environment variables.
//!
//! These tests mutate process environment variables and are serialized
//! with `serial_test`.

#![allow(clippy::expect_used, clippy::unwrap_used, unsafe_code)]

use agent_ui::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use agent_ui_common::ProvisionPolicy;
use serial_test::serial;

fn flags(json: bool, yes: bool) -> AppFlags {
    AppFlags {
        output: OutputFlags {
            no_color: true,
            quiet: false,
            json,
        },
        behaviour: BehaviourFlags { yes },
    }
}

/// Run `f` with `vars` set, removing them afterwards.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    for (key, value) in vars {
        // SAFETY: every caller is #[serial], so no other test thread reads
        // the environment concurrently.
        unsafe { std::env::set_var(key, value) };
    }
    let out = f();
    for (key, _) in vars {
        // SAFETY: as above.
        unsafe { std::env::remove_var(key) };
    }
    out
}

#[test]
#[serial]
fn yes_env_makes_context_non_interactive() {
    let app = with_env(&[("AGENT_UI_YES", "1")], || {
        AppContext::new(&flags(false, false)).unwrap()
    });
    assert!(app.non_interactive);
    assert!(app.confirm("Replace?", true).unwrap());
}

#[test]
#[serial]
fn env_settings_reach_the_context() {
    let home = tempfile::tempdir().unwrap();
    let home_str = home.path().to_str().unwrap().to_string();
    let app = with_env(
        &[
            ("AGENT_UI_HOME", home_str.as_str()),
            ("AGENT_UI_AUTO_DOWNLOAD", "true"),
            ("AGENT_UI_BASE_URL", "/api"),
        ],
        || AppContext::new(&flags(true, true)).unwrap(),
    );

    assert!(app.is_json());
    assert_eq!(app.settings.base_url, "/api");
    assert_eq!(
        app.settings.provision_policy(),
        ProvisionPolicy::AutoDownloadOnce
    );
    assert_eq!(
        agent_ui::application::AssetRepository::static_dir(&app.store().unwrap()),
        home.path().join("static")
    );
}

#[test]
#[serial]
fn malformed_env_setting_fails_construction() {
    let result = with_env(&[("AGENT_UI_HTTP_TIMEOUT_SECS", "soon")], || {
        AppContext::new(&flags(false, true))
    });
    let Err(err) = result else {
        panic!("expected an error for a non-numeric timeout");
    };
    assert!(err.to_string().contains("AGENT_UI_"));
}
