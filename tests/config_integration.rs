use std::path::PathBuf;
use std::time::Duration;

use blogcraft::autosave::OverlapPolicy;
use blogcraft::config::{
    API_URL_ENV, ConfigFlags, Settings, ThemeMode, env_flags_with, load_config_flags,
    parse_flag_tokens,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".blogcraftrc");
    let content = r"
# comment
--api-url http://blog.test/api

--theme light

--log-file=blogcraft.log --autosave-unguarded
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.api_url.as_deref(), Some("http://blog.test/api"));
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.log_file, Some(PathBuf::from("blogcraft.log")));
    assert!(flags.autosave_unguarded);
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("nope")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_layers_apply_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".blogcraftrc");
    std::fs::write(
        &global,
        "--api-url http://global/api\n--theme light\n--timeout 5\n--autosave-debounce 1000\n",
    )
    .unwrap();
    std::fs::write(&local, "--api-url http://local/api\n--timeout 8\n").unwrap();

    let file_flags = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    let env = env_flags_with(|key| (key == API_URL_ENV).then(|| "http://env/api".to_string()));
    let cli = parse_flag_tokens(&[
        "blogcraft".to_string(),
        "--timeout=20".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
    ]);

    let effective = file_flags.union(&env).union(&cli);
    let settings = Settings::resolve(&effective);
    assert_eq!(settings.api_url, "http://env/api", "env beats files");
    assert_eq!(settings.timeout, Duration::from_secs(20), "cli beats everything");
    assert_eq!(settings.theme, ThemeMode::Dark);
    assert_eq!(
        settings.autosave.debounce,
        Duration::from_millis(1_000),
        "global file survives when nothing overrides it"
    );
    assert_eq!(settings.autosave.policy, OverlapPolicy::SingleFlight);
}

#[test]
fn test_cli_without_url_keeps_file_url() {
    let file = ConfigFlags {
        api_url: Some("http://file/api".to_string()),
        ..ConfigFlags::default()
    };
    let cli = parse_flag_tokens(&["blogcraft".to_string(), "new".to_string()]);
    let settings = Settings::resolve(&file.union(&cli));
    assert_eq!(settings.api_url, "http://file/api");
}

#[test]
fn test_unknown_tokens_are_ignored() {
    let args = vec![
        "blogcraft".to_string(),
        "--frobnicate".to_string(),
        "--theme=light".to_string(),
        "edit".to_string(),
        "12".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.theme, Some(ThemeMode::Light));
    assert_eq!(flags.api_url, None);
}
