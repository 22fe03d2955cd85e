use base64::{Engine, engine::general_purpose};
use log::error;
use serde::Deserialize;
use std::fmt;
use std::str::from_utf8;
use talaria_core::{
    FileLocationInfo, LocalVolumeTable, NameEncoding, NetworkVolumeTable, Shortcut,
};

#[derive(Debug, PartialEq)]
pub(crate) enum RecipeError {
    BadToml,
    UnknownEncoding,
    UnknownShowWindow,
    MissingVolume,
    BadExtraData,
    BadTargetName,
}

impl std::error::Error for RecipeError {}

impl fmt::Display for RecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeError::BadToml => write!(f, "Recipe is not valid TOML"),
            RecipeError::UnknownEncoding => {
                write!(f, "Recipe encoding must be ascii or latin1")
            }
            RecipeError::UnknownShowWindow => {
                write!(f, "Recipe show window value is not a SW_ name")
            }
            RecipeError::MissingVolume => {
                write!(f, "Recipe location needs a local or network volume")
            }
            RecipeError::BadExtraData => write!(f, "Recipe extra data is not valid base64"),
            RecipeError::BadTargetName => {
                write!(f, "Target name cannot be represented in the selected encoding")
            }
        }
    }
}

/// Shortcut description accepted by the `create` subcommand
#[derive(Debug, Deserialize)]
pub(crate) struct Recipe {
    pub(crate) target: Option<TargetRecipe>,
    pub(crate) location: Option<LocationRecipe>,
    pub(crate) description: Option<String>,
    pub(crate) relative_path: Option<String>,
    pub(crate) working_directory: Option<String>,
    pub(crate) command_line_args: Option<String>,
    pub(crate) icon_location: Option<String>,
    pub(crate) icon_index: Option<u32>,
    /// Show window name, ex: `SW_SHOWMAXIMIZED`
    pub(crate) show_window: Option<String>,
    pub(crate) hot_key: Option<u32>,
    /// Name encoding for identifier synthesis: `ascii` or `latin1`
    pub(crate) encoding: Option<String>,
    /// Opaque trailing bytes as base64
    pub(crate) extra_data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetRecipe {
    pub(crate) path: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationRecipe {
    pub(crate) base_path: Option<String>,
    pub(crate) remaining_path: Option<String>,
    pub(crate) local: Option<LocalRecipe>,
    pub(crate) network: Option<NetworkRecipe>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalRecipe {
    pub(crate) label: String,
    pub(crate) drive_type: Option<u32>,
    pub(crate) serial: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkRecipe {
    pub(crate) share: String,
    pub(crate) mapping: Option<String>,
}

/// Parse the TOML recipe bytes
pub(crate) fn parse_recipe(data: &[u8]) -> Result<Recipe, RecipeError> {
    let recipe_results = toml::from_str(from_utf8(data).unwrap_or_default());
    let recipe: Recipe = match recipe_results {
        Ok(results) => results,
        Err(err) => {
            error!("[talaria] Failed to parse TOML recipe: {err:?}");
            return Err(RecipeError::BadToml);
        }
    };
    Ok(recipe)
}

/// Assemble a `Shortcut` from a parsed recipe. The target table drives
/// identifier synthesis, everything else overrides plain fields
pub(crate) fn build_shortcut(recipe: &Recipe) -> Result<Shortcut, RecipeError> {
    let encoding = match recipe.encoding.as_deref() {
        Some("ascii") => NameEncoding::Ascii,
        Some("latin1") | None => NameEncoding::Latin1,
        Some(other) => {
            error!("[talaria] Unknown name encoding {other}, expected ascii or latin1");
            return Err(RecipeError::UnknownEncoding);
        }
    };

    let mut shortcut = match &recipe.target {
        Some(target) => match Shortcut::from_target(&target.path, encoding) {
            Ok(results) => results,
            Err(err) => {
                error!(
                    "[talaria] Could not build identifiers for {}: {err}",
                    target.path
                );
                return Err(RecipeError::BadTargetName);
            }
        },
        None => Shortcut::new(),
    };

    if let Some(location) = &recipe.location {
        shortcut.location = Some(build_location(location)?);
    }
    if let Some(description) = &recipe.description {
        shortcut.description = Some(description.to_string());
    }
    if let Some(relative_path) = &recipe.relative_path {
        shortcut.relative_path = Some(relative_path.to_string());
    }
    if let Some(working_directory) = &recipe.working_directory {
        shortcut.working_directory = Some(working_directory.to_string());
    }
    if let Some(command_line_args) = &recipe.command_line_args {
        shortcut.command_line_args = Some(command_line_args.to_string());
    }
    if let Some(icon_location) = &recipe.icon_location {
        shortcut.icon_location = Some(icon_location.to_string());
    }
    if let Some(icon_index) = recipe.icon_index {
        shortcut.icon_index = icon_index;
    }
    if let Some(show_window) = &recipe.show_window {
        shortcut.show_window = show_window_code(show_window)?;
    }
    if let Some(hot_key) = recipe.hot_key {
        shortcut.hot_key = hot_key;
    }
    if let Some(extra_data) = &recipe.extra_data {
        let decode_results = general_purpose::STANDARD.decode(extra_data);
        let decoded = match decode_results {
            Ok(results) => results,
            Err(err) => {
                error!("[talaria] Failed to base64 decode extra data: {err:?}");
                return Err(RecipeError::BadExtraData);
            }
        };
        shortcut.extra_data = Some(decoded);
    }

    Ok(shortcut)
}

/// A location must carry at least one volume table to be serializable
fn build_location(recipe: &LocationRecipe) -> Result<FileLocationInfo, RecipeError> {
    if recipe.local.is_none() && recipe.network.is_none() {
        error!("[talaria] Location recipe names neither a local nor a network volume");
        return Err(RecipeError::MissingVolume);
    }

    let mut info = FileLocationInfo {
        local_volume: None,
        network_volume: None,
        base_path: recipe.base_path.clone().unwrap_or_default(),
        remaining_path: recipe.remaining_path.clone().unwrap_or_default(),
    };

    if let Some(local) = &recipe.local {
        let mut volume = LocalVolumeTable::new(&local.label);
        if let Some(drive_type) = local.drive_type {
            volume.drive_type = drive_type;
        }
        if let Some(serial) = local.serial {
            volume.serial = serial;
        }
        info.local_volume = Some(volume);
    }
    if let Some(network) = &recipe.network {
        let mut volume = NetworkVolumeTable::new(&network.share);
        volume.mapping = network.mapping.clone();
        info.network_volume = Some(volume);
    }

    Ok(info)
}

/// Inverse of the display-side show window names
fn show_window_code(name: &str) -> Result<u32, RecipeError> {
    match name {
        "SW_HIDE" => Ok(0),
        "SW_NORMAL" => Ok(1),
        "SW_SHOWMINIMIZED" => Ok(2),
        "SW_SHOWMAXIMIZED" => Ok(3),
        "SW_SHOWNOACTIVATE" => Ok(4),
        "SW_SHOW" => Ok(5),
        "SW_MINIMIZE" => Ok(6),
        "SW_SHOWMINNOACTIVE" => Ok(7),
        "SW_SHOWNA" => Ok(8),
        "SW_RESTORE" => Ok(9),
        "SW_SHOWDEFAULT" => Ok(10),
        _ => {
            error!("[talaria] Unknown show window name {name}");
            Err(RecipeError::UnknownShowWindow)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecipeError, build_shortcut, parse_recipe, show_window_code};

    #[test]
    fn test_parse_recipe() {
        let test = r#"
            description = "Launch the runtime"
            show_window = "SW_SHOWMAXIMIZED"
            hot_key = 75

            [target]
            path = 'C:\dir\a.jar'

            [location]
            base_path = 'c:\dir\a.jar'

            [location.local]
            label = "win"
            drive_type = 3
            serial = 0x4660a2b1
        "#;

        let recipe = parse_recipe(test.as_bytes()).unwrap();
        assert_eq!(recipe.description.unwrap(), "Launch the runtime");
        assert_eq!(recipe.show_window.unwrap(), "SW_SHOWMAXIMIZED");
        assert_eq!(recipe.hot_key.unwrap(), 75);
        assert_eq!(recipe.target.unwrap().path, "C:\\dir\\a.jar");

        let location = recipe.location.unwrap();
        assert_eq!(location.base_path.unwrap(), "c:\\dir\\a.jar");
        let local = location.local.unwrap();
        assert_eq!(local.label, "win");
        assert_eq!(local.drive_type.unwrap(), 3);
        assert_eq!(local.serial.unwrap(), 0x4660a2b1);
    }

    #[test]
    fn test_parse_recipe_bad_toml() {
        let test = b"description = ";
        assert_eq!(parse_recipe(test).unwrap_err(), RecipeError::BadToml);
    }

    #[test]
    fn test_build_shortcut_from_target() {
        let test = r#"
            description = "Launch the runtime"

            [target]
            path = 'C:\dir\a.jar'
        "#;

        let recipe = parse_recipe(test.as_bytes()).unwrap();
        let shortcut = build_shortcut(&recipe).unwrap();
        assert_eq!(shortcut.shell_items.unwrap().len(), 3);
        assert_eq!(shortcut.working_directory.unwrap(), "C:\\dir");
        assert_eq!(shortcut.description.unwrap(), "Launch the runtime");
    }

    #[test]
    fn test_build_shortcut_location() {
        let test = r#"
            [location]
            base_path = 'c:\dir\a.jar'
            remaining_path = "x.exe"

            [location.local]
            label = "win"
            serial = 0x4660a2b1

            [location.network]
            share = '\\host\share'
            mapping = "Z:"
        "#;

        let recipe = parse_recipe(test.as_bytes()).unwrap();
        let shortcut = build_shortcut(&recipe).unwrap();

        let location = shortcut.location.unwrap();
        assert_eq!(location.base_path, "c:\\dir\\a.jar");
        assert_eq!(location.remaining_path, "x.exe");

        let local = location.local_volume.unwrap();
        assert_eq!(local.label, "win");
        assert_eq!(local.drive_type, 0);
        assert_eq!(local.serial, 0x4660a2b1);

        let network = location.network_volume.unwrap();
        assert_eq!(network.share_name, "\\\\host\\share");
        assert_eq!(network.mapping.unwrap(), "Z:");
    }

    #[test]
    fn test_build_shortcut_missing_volume() {
        let test = b"[location]\nbase_path = 'c:'";
        let recipe = parse_recipe(test).unwrap();
        assert_eq!(
            build_shortcut(&recipe).unwrap_err(),
            RecipeError::MissingVolume
        );
    }

    #[test]
    fn test_build_shortcut_overrides() {
        let test = r#"
            relative_path = '.\a.jar'
            working_directory = 'C:\dir'
            command_line_args = "-v"
            icon_location = 'C:\icons\a.ico'
            icon_index = 7
            show_window = "SW_HIDE"
            hot_key = 75
        "#;

        let recipe = parse_recipe(test.as_bytes()).unwrap();
        let shortcut = build_shortcut(&recipe).unwrap();
        assert!(shortcut.shell_items.is_none());
        assert_eq!(shortcut.relative_path.unwrap(), ".\\a.jar");
        assert_eq!(shortcut.working_directory.unwrap(), "C:\\dir");
        assert_eq!(shortcut.command_line_args.unwrap(), "-v");
        assert_eq!(shortcut.icon_location.unwrap(), "C:\\icons\\a.ico");
        assert_eq!(shortcut.icon_index, 7);
        assert_eq!(shortcut.show_window, 0);
        assert_eq!(shortcut.hot_key, 75);
    }

    #[test]
    fn test_build_shortcut_extra_data() {
        let test = b"extra_data = \"3q0=\"";
        let recipe = parse_recipe(test).unwrap();
        let shortcut = build_shortcut(&recipe).unwrap();
        assert_eq!(shortcut.extra_data.unwrap(), vec![0xde, 0xad]);
    }

    #[test]
    fn test_build_shortcut_bad_extra_data() {
        let test = b"extra_data = \"%%%\"";
        let recipe = parse_recipe(test).unwrap();
        assert_eq!(
            build_shortcut(&recipe).unwrap_err(),
            RecipeError::BadExtraData
        );
    }

    #[test]
    fn test_build_shortcut_bad_encoding() {
        let test = b"encoding = \"utf8\"";
        let recipe = parse_recipe(test).unwrap();
        assert_eq!(
            build_shortcut(&recipe).unwrap_err(),
            RecipeError::UnknownEncoding
        );
    }

    #[test]
    fn test_build_shortcut_ascii_rejects_name() {
        let test = "encoding = \"ascii\"\n[target]\npath = 'C:\\caf\u{e9}.txt'";
        let recipe = parse_recipe(test.as_bytes()).unwrap();
        assert_eq!(
            build_shortcut(&recipe).unwrap_err(),
            RecipeError::BadTargetName
        );
    }

    #[test]
    fn test_show_window_code() {
        assert_eq!(show_window_code("SW_NORMAL").unwrap(), 1);
        assert_eq!(show_window_code("SW_SHOWDEFAULT").unwrap(), 10);
        assert_eq!(
            show_window_code("maximized").unwrap_err(),
            RecipeError::UnknownShowWindow
        );
    }
}
