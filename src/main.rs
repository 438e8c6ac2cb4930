mod config;
mod draft;
mod error;
mod keymap;
mod models;
mod style;
mod ui;

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{APP_NAME, Config, config_dir, config_path, load_config};
use crate::error::{Error, Result};
use crate::style::load_stylesheet;
use crate::ui::{App, get_action, render};

const LOG_ENV: &str = "AITETSU_LOG";

/// 获取数据目录路径 (~/.local/share/aitetsu/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join(APP_NAME);

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 日志写入文件，终端留给界面
fn init_logging(data_dir: &Path) -> io::Result<()> {
    let file = File::create(data_dir.join("aitetsu.log"))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("aitetsu=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_settings() -> Result<Config> {
    match config_path() {
        Some(path) => load_config(&path),
        None => Config::with_defaults(&config_dir().unwrap_or_else(|| PathBuf::from("."))),
    }
}

fn main() -> Result<()> {
    init_logging(&get_data_dir()?)?;

    // 加载配置与样式表，任何错误都在进入终端前返回
    let config = load_settings()?;
    let stylesheet = load_stylesheet(&config.style_path)?;
    let cwd = env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|_| "-".to_string());

    // 创建应用状态
    let mut app = App::new(config, stylesheet, cwd);
    app.mount()?;
    info!(lifecycle = ?app.lifecycle(), "starting event loop");

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(%err, "event loop failed");
    }
    info!("session ended");
    result.map_err(Error::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        let event = crossterm::event::read()?;
        if let Some(action) = get_action(&app.config.keymap, &event) {
            if app.dispatch(action) {
                break;
            }
        }
    }
    Ok(())
}
