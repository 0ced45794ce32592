use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{value_t, App, Arg};
use serde::{Deserialize, Serialize};

use crate::scene::SceneKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            title: "OpenGL".to_string(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Directory holding `shaders/` and `textures/`.
    pub res_dir: PathBuf,
    /// Scene to open on startup instead of the menu.
    pub start_scene: Option<SceneKind>,
    pub log_filter: Option<String>,
    /// Upper bound on frames per second, unlimited when `None`.
    pub fps_limit: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            res_dir: PathBuf::from("res"),
            start_scene: None,
            log_filter: None,
            fps_limit: None,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the final config: defaults, then the config file if
    /// one was given, then the command line overrides.
    pub fn resolve(args: &InputArguments) -> Result<Self, ConfigError> {
        let mut config = match args.config_file.as_ref() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    pub fn apply(&mut self, args: &InputArguments) {
        if let Some(width) = args.width {
            self.window.width = width;
        }
        if let Some(height) = args.height {
            self.window.height = height;
        }
        if let Some(title) = args.title.as_ref() {
            self.window.title = title.clone();
        }
        if args.no_vsync {
            self.window.vsync = false;
        }
        if let Some(res_dir) = args.res_dir.as_ref() {
            self.res_dir = res_dir.clone();
        }
        if let Some(scene) = args.scene {
            self.start_scene = Some(scene);
        }
        if let Some(log_filter) = args.log_filter.as_ref() {
            self.log_filter = Some(log_filter.clone());
        }
        if let Some(fps_limit) = args.fps_limit {
            self.fps_limit = Some(fps_limit);
        }
    }

    pub fn assets(&self) -> AssetPaths {
        AssetPaths::new(&self.res_dir)
    }
}

/// Files the scenes load their shaders and textures from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub basic_shader: PathBuf,
    pub color_shader: PathBuf,
    pub texture: PathBuf,
}

impl AssetPaths {
    pub fn new(res_dir: &Path) -> Self {
        Self {
            basic_shader: res_dir.join("shaders").join("Basic.shader"),
            color_shader: res_dir.join("shaders").join("Color.shader"),
            texture: res_dir.join("textures").join("checker.png"),
        }
    }
}

/// Command line arguments, every field overrides the config file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputArguments {
    config_file: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    title: Option<String>,
    no_vsync: bool,
    scene: Option<SceneKind>,
    res_dir: Option<PathBuf>,
    log_filter: Option<String>,
    fps_limit: Option<f64>,
}

fn validate_dimension(value: String) -> Result<(), String> {
    match value.parse::<u32>() {
        Ok(0) => Err("must be larger than 0".to_string()),
        Ok(_) => Ok(()),
        Err(err) => Err(err.to_string()),
    }
}

fn validate_fps_limit(value: String) -> Result<(), String> {
    match value.parse::<f64>() {
        Ok(fps) if fps.is_finite() && fps > 0.0 => Ok(()),
        Ok(_) => Err("must be a positive number".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

impl InputArguments {
    fn get_app() -> App<'static, 'static> {
        App::new("gl_sandbox")
            .version(env!("CARGO_PKG_VERSION"))
            .about("OpenGL sandbox with switchable demo scenes")
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .help("JSON config file, command line arguments override it")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .help("Window width")
                    .takes_value(true)
                    .validator(validate_dimension),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .help("Window height")
                    .takes_value(true)
                    .validator(validate_dimension),
            )
            .arg(
                Arg::with_name("title")
                    .long("title")
                    .help("Window title")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("no-vsync")
                    .long("no-vsync")
                    .help("Do not wait for vertical sync when presenting"),
            )
            .arg(
                Arg::with_name("scene")
                    .long("scene")
                    .help("Scene to open on startup")
                    .takes_value(true)
                    .possible_values(SceneKind::NAMES),
            )
            .arg(
                Arg::with_name("res-dir")
                    .long("res-dir")
                    .help("Directory containing the shaders/ and textures/ assets")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("log")
                    .long("log")
                    .help("Log filter, same syntax as RUST_LOG")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("fps-limit")
                    .long("fps-limit")
                    .help("Maximum frames per second, unlimited by default")
                    .takes_value(true)
                    .validator(validate_fps_limit),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            config_file: value_t!(matches, "config", PathBuf).ok(),
            width: value_t!(matches, "width", u32).ok(),
            height: value_t!(matches, "height", u32).ok(),
            title: value_t!(matches, "title", String).ok(),
            no_vsync: matches.is_present("no-vsync"),
            scene: value_t!(matches, "scene", SceneKind).ok(),
            res_dir: value_t!(matches, "res-dir", PathBuf).ok(),
            log_filter: value_t!(matches, "log", String).ok(),
            fps_limit: value_t!(matches, "fps-limit", f64).ok(),
        }
    }

    /// Read the arguments of the current process, prints usage and
    /// exits on invalid arguments.
    pub fn read_cli() -> Self {
        Self::from_matches(&Self::get_app().get_matches())
    }

    /// Parse `args`, the first item is the binary name.
    pub fn read_from<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::get_app().get_matches_from_safe(args)?;
        Ok(Self::from_matches(&matches))
    }

    pub fn get_config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}
