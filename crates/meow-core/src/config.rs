//! Configuration management for Meow
//!
//! This module provides configuration structures for the add-on: where the
//! captioned cat images come from, the fixed card labels, and how the HTTP
//! endpoint is exposed to the host platform.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Add-on configuration
///
/// Loaded from `.meow/config.toml` in the deployment root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeowConfig {
    /// Remote captioning service
    #[serde(default)]
    pub service: ServiceConfig,

    /// Card labels and limits
    #[serde(default)]
    pub card: CardConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Remote "caption an image" service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service, also used as the footer link
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path under `base_url` that takes the caption as its last segment
    #[serde(default = "default_says_path")]
    pub says_path: String,
}

/// Fixed text and limits used when assembling a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Alt text of the cat image
    #[serde(default = "default_alt_text")]
    pub alt_text: String,

    /// Label of the refresh button
    #[serde(default = "default_change_button_text")]
    pub change_button_text: String,

    /// Label of the footer link button
    #[serde(default = "default_footer_text")]
    pub footer_text: String,

    /// Title of the collapsed-state header on contextual cards
    #[serde(default = "default_peek_title")]
    pub peek_title: String,

    /// Icon of the collapsed-state header
    #[serde(default = "default_peek_icon_url")]
    pub peek_icon_url: String,

    /// Caption used by contextual cards when the host sent no context
    #[serde(default = "default_contextual_caption")]
    pub contextual_caption: String,

    /// Maximum caption length that fits on the image
    #[serde(default = "default_max_caption_length")]
    pub max_caption_length: usize,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to serve on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL; button actions resolve against it
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

// Default value providers
fn default_base_url() -> String {
    "https://cataas.com".to_string()
}

fn default_says_path() -> String {
    "cat/says".to_string()
}

fn default_alt_text() -> String {
    "Meow".to_string()
}

fn default_change_button_text() -> String {
    "Change cat".to_string()
}

fn default_footer_text() -> String {
    "Powered by cataas.com".to_string()
}

fn default_peek_title() -> String {
    "Contextual Cat".to_string()
}

fn default_peek_icon_url() -> String {
    "https://www.gstatic.com/images/icons/material/system/1x/pets_black_48dp.png".to_string()
}

fn default_contextual_caption() -> String {
    "Meow".to_string()
}

fn default_max_caption_length() -> usize {
    crate::truncate::MAX_MESSAGE_LENGTH
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    format!("http://localhost:{}", default_port())
}

impl MeowConfig {
    /// Load configuration from `.meow/config.toml` or use defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(".meow/config.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content).map_err(|e| {
                crate::MeowError::Config(format!("Failed to parse config file: {}", e))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.meow/config.toml`
    pub fn write_default(root: &Path) -> Result<()> {
        let config_dir = root.join(".meow");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let config = Self::default();
        let content = toml::to_string_pretty(&config).map_err(|e| {
            crate::MeowError::Config(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            says_path: default_says_path(),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            alt_text: default_alt_text(),
            change_button_text: default_change_button_text(),
            footer_text: default_footer_text(),
            peek_title: default_peek_title(),
            peek_icon_url: default_peek_icon_url(),
            contextual_caption: default_contextual_caption(),
            max_caption_length: default_max_caption_length(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}
