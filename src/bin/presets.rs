//! Preset Tool - inspect and edit shader preset files
//!
//! Usage:
//!   cargo run --bin presets -- assets/toon_presets.txt list
//!   cargo run --bin presets -- --find toon_presets show Metal
//!   cargo run --bin presets -- assets/toon_presets.txt set Metal _Metallic 0.9

use std::path::PathBuf;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use shader_presets::{
    AssetDirectory, AssetKind, AssetSearch, Preset, PresetError, PresetSettings, PresetStore,
    PropertyBinding, SETTINGS_FILE,
};

/// Command-line configuration
struct CliConfig {
    settings_file: PathBuf,
    file: Option<PathBuf>,
    find: Option<String>,
    command: Vec<String>,
    verbose: bool,
    show_help: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            settings_file: PathBuf::from(SETTINGS_FILE),
            file: None,
            find: None,
            command: Vec::new(),
            verbose: false,
            show_help: false,
        }
    }
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--settings" => {
                    if i + 1 < args.len() {
                        config.settings_file = PathBuf::from(&args[i + 1]);
                        i += 1;
                    }
                }
                "--find" => {
                    if i + 1 < args.len() {
                        config.find = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--verbose" | "-v" => {
                    config.verbose = true;
                }
                "--help" | "-h" => {
                    config.show_help = true;
                }
                arg if config.expects_file() => {
                    // First positional argument: preset file
                    config.file = Some(PathBuf::from(arg));
                }
                arg => {
                    config.command.push(arg.to_string());
                }
            }
            i += 1;
        }

        config
    }

    fn expects_file(&self) -> bool {
        self.file.is_none() && self.find.is_none() && self.command.is_empty()
    }
}

fn print_help() {
    println!(
        r#"Preset Tool - inspect and edit shader preset files

Usage: presets [OPTIONS] <FILE | --find NAME> <COMMAND>

Options:
  --find <NAME>        Locate the preset file by name under the assets root
  --settings <FILE>    Settings file (default: {})
  -v, --verbose        Debug logging
  -h, --help           Show this help

Commands:
  list                             List presets
  show <preset>                    Print a preset's bindings
  add <preset>                     Add an empty preset
  remove <preset>                  Delete a preset
  set <preset> <property> <value>  Set a binding (appended if missing)
  unset <preset> <property>        Remove a binding"#,
        SETTINGS_FILE
    );
}

fn main() {
    let config = CliConfig::from_args();

    if config.show_help || config.command.is_empty() {
        print_help();
        return;
    }

    // Route library logging through Bevy's subscriber
    App::new().add_plugins(LogPlugin {
        level: if config.verbose { Level::DEBUG } else { Level::WARN },
        ..default()
    });

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), PresetError> {
    let settings = PresetSettings::load(&config.settings_file);
    let path = match (&config.file, &config.find) {
        (Some(file), _) => file.clone(),
        (None, Some(name)) => AssetDirectory::new(&settings.assets_root)
            .find_asset(name, AssetKind::Any)?
            .ok_or_else(|| {
                PresetError::AssetSearch(format!(
                    "no asset named '{}' under {}",
                    name, settings.assets_root
                ))
            })?,
        (None, None) => {
            print_help();
            return Ok(());
        }
    };

    let mut store = PresetStore::open(&path)?;
    let args: Vec<&str> = config.command.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list"] => {
            for preset in store.iter() {
                println!("{} ({} bindings)", preset.name, preset.bindings.len());
            }
        }
        ["show", name] => {
            let preset = store
                .get(name)
                .ok_or_else(|| PresetError::PresetNotFound(name.to_string()))?;
            print_preset(preset);
        }
        ["add", name] => {
            store.add(Preset::new(*name))?;
            println!("Added {}", name);
        }
        ["remove", name] => {
            store.remove(name)?;
            println!("Removed {}", name);
        }
        ["set", name, property, value] => {
            if !store.update_binding(name, property, value)? {
                let mut bindings = store
                    .get(name)
                    .map(|p| p.bindings.clone())
                    .unwrap_or_default();
                bindings.push(PropertyBinding::new(*property, *value));
                store.set_bindings(name, bindings)?;
            }
            println!("{}: {} = {}", name, property, value);
        }
        ["unset", name, property] => {
            if store.remove_binding(name, property)? {
                println!("{}: removed {}", name, property);
            } else {
                println!("{}: {} was not set", name, property);
            }
        }
        _ => {
            print_help();
        }
    }

    Ok(())
}

fn print_preset(preset: &Preset) {
    println!("{}", preset.name);
    for binding in &preset.bindings {
        println!("  {} = {}", binding.property, binding.value);
    }
}
