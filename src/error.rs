//! 错误类型
//!
//! 启动阶段的错误都是致命的：在事件循环开始之前直接返回给 main

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid key chord {chord:?} for {binding}")]
    Keymap { binding: &'static str, chord: String },

    #[error("invalid stylesheet: {0}")]
    StyleSyntax(#[source] toml::de::Error),

    #[error("invalid color {value:?} for {surface}.{key}")]
    Style {
        surface: String,
        key: String,
        value: String,
    },

    #[error("failed to mount layout: {0}")]
    Mount(String),
}

pub type Result<T> = std::result::Result<T, Error>;
