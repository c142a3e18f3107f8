use super::*;
use crate::error::StyleError;
use crate::models::StyleCategory;

const CUSTOM_LEXICON: &str = r#"
version = "team"

[categories]
strategic_architect = [{ pattern = "blueprint", weight = 1.0 }]
technical_implementer = [{ pattern = "patch", weight = 1.0 }]
learning_explorer = [{ pattern = "teach", weight = 1.0 }]
rapid_prototyper = [{ pattern = "spike", weight = 1.0 }]
creative_collaborator = [{ pattern = "riff", weight = 1.0 }]
"#;

#[test]
fn test_parse_full_config() {
    let config = StyleConfig::from_toml_str(
        r#"
[thresholds]
dominance = 50
hybrid = 30.5

[lexicon]
version = "v1"

[defaults]
format = "json"
all_roles = true
"#,
    )
    .unwrap();

    let t = config.thresholds().unwrap();
    assert_eq!(t.dominance, 50.0);
    assert_eq!(t.hybrid, 30.5);
    assert_eq!(config.lexicon.version.as_deref(), Some("v1"));
    assert_eq!(config.default_format(), "json");
    assert!(config.all_roles());
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = StyleConfig::from_toml_str("").unwrap();
    assert_eq!(config.thresholds().unwrap(), StyleThresholds::default());
    assert_eq!(config.default_format(), "text");
    assert!(!config.all_roles());
    assert_eq!(config.load_lexicon().unwrap().version(), "v1");
}

#[test]
fn test_invalid_toml_rejected() {
    assert!(StyleConfig::from_toml_str("this is [[ not valid toml {{{}}}").is_err());
}

#[test]
fn test_out_of_range_threshold() {
    let config = StyleConfig::from_toml_str("[thresholds]\ndominance = 140\n").unwrap();
    assert!(matches!(
        config.thresholds(),
        Err(StyleError::InvalidConfig(_))
    ));
    assert!(config.build_classifier().is_err());
}

#[test]
fn test_unknown_lexicon_version() {
    let config = StyleConfig::from_toml_str("[lexicon]\nversion = \"v42\"\n").unwrap();
    assert!(matches!(
        config.load_lexicon(),
        Err(StyleError::LexiconConfig(_))
    ));
}

#[test]
fn test_merge_overrides_set_fields() {
    let mut base = StyleConfig::from_toml_str("[thresholds]\ndominance = 45\nhybrid = 20\n").unwrap();
    let other = StyleConfig::from_toml_str("[thresholds]\nhybrid = 30\n[defaults]\nformat = \"markdown\"\n").unwrap();
    base.merge(other);
    assert_eq!(base.thresholds.dominance, Some(45.0));
    assert_eq!(base.thresholds.hybrid, Some(30.0));
    assert_eq!(base.default_format(), "markdown");
}

#[test]
fn test_merge_preserves_base_when_other_is_empty() {
    let mut base = StyleConfig::from_toml_str("[lexicon]\nversion = \"v1\"\n").unwrap();
    base.merge(StyleConfig::default());
    assert_eq!(base.lexicon.version.as_deref(), Some("v1"));
}

#[test]
fn test_custom_lexicon_relative_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("team-lexicon.toml"), CUSTOM_LEXICON).unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[lexicon]\npath = \"team-lexicon.toml\"\n",
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.lexicon_path(), Some(dir.path().join("team-lexicon.toml")));

    let lexicon = config.load_lexicon().unwrap();
    assert_eq!(lexicon.version(), "team");
    assert_eq!(lexicon.rules(StyleCategory::RapidPrototyper)[0].pattern, "spike");
}

#[test]
fn test_load_project_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), StyleConfig::default());
}

#[test]
fn test_load_project_config_broken_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[[ broken").unwrap();
    assert_eq!(load_project_config(dir.path()), StyleConfig::default());
}
