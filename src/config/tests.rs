use super::load_config;
use crate::error::Error;
use crate::models::{Language, TabBehavior};
use crossterm::event::KeyCode;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(path, contents).expect("write config");
}

#[test]
fn load_config_uses_defaults_when_missing() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");

    let config = load_config(&path).expect("defaults");

    assert_eq!(config.keymap.submit.key, KeyCode::Enter);
    assert!(!config.keymap.submit.alt);
    assert_eq!(config.keymap.newline.len(), 2);
    assert_eq!(config.keymap.quit.to_string(), "ctrl+c");
    assert_eq!(config.prompt.language, Language::Markdown);
    assert_eq!(config.prompt.tab_behavior, TabBehavior::Indent);
    assert_eq!(config.prompt.indent_width, 4);
    assert_eq!(config.prompt.max_height, 10);
    assert_eq!(config.prompt.placeholder, "Send a message...");
    assert_eq!(config.style_path, dir.path().join("style.toml"));
}

#[test]
fn load_config_treats_blank_file_as_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    write_config(&path, "  \n");

    let config = load_config(&path).expect("defaults");
    assert_eq!(config.keymap.submit.key, KeyCode::Enter);
}

#[test]
fn load_config_reads_overrides() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("aitetsu").join("config.toml");
    write_config(
        &path,
        r#"
[keymap]
submit = "ctrl+s"
newline = ["shift+enter"]

[prompt]
language = "python"
tabBehavior = "literal"
indent_width = 2
max_height = 4
placeholder = "ask"

[style]
path = "themes/mocha.toml"
"#,
    );

    let config = load_config(&path).expect("config");

    assert_eq!(config.keymap.submit.key, KeyCode::Char('s'));
    assert!(config.keymap.submit.ctrl);
    assert_eq!(config.keymap.newline.len(), 1);
    assert!(config.keymap.newline[0].shift);
    assert_eq!(config.keymap.quit.to_string(), "ctrl+c");
    assert_eq!(config.prompt.language, Language::Python);
    assert_eq!(config.prompt.tab_behavior, TabBehavior::Literal);
    assert_eq!(config.prompt.indent_width, 2);
    assert_eq!(config.prompt.max_height, 4);
    assert_eq!(config.prompt.placeholder, "ask");
    assert_eq!(
        config.style_path,
        dir.path().join("aitetsu").join("themes/mocha.toml")
    );
}

#[test]
fn load_config_rejects_malformed_toml() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    write_config(&path, "[keymap\nsubmit = ");

    let err = load_config(&path).expect_err("malformed");
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn load_config_rejects_unknown_chord() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    write_config(&path, "[keymap]\nsubmit = \"hyper+enter\"\n");

    let err = load_config(&path).expect_err("bad chord");
    assert!(matches!(
        err,
        Error::Keymap {
            binding: "keymap.submit",
            ..
        }
    ));
}
