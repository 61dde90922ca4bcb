//! Client catalog loaded from `config/clients.yaml`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One monitored client: a display name, its keyword profile, and
/// optional query tuning. Read-only input to the fetch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub name: String,
    /// Comma-separated keywords; a keyword may be wrapped in double
    /// quotes to mark a multi-word phrase.
    pub keywords: String,
    /// Optional comma-separated domain allow-list for the structured API.
    pub domains: Option<String>,
    /// Optional per-keyword boolean operators (keyword -> operator
    /// inserted after it; default OR).
    pub operators: Option<HashMap<String, String>>,
}

impl ClientConfig {
    /// Generate a URL-safe slug from the client name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientsFile {
    pub clients: Vec<ClientConfig>,
}

/// Load and validate the client catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty names, duplicate names or slugs).
pub fn load_clients(path: &Path) -> Result<ClientsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ClientsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let clients_file: ClientsFile = serde_yaml::from_str(&content)?;

    validate_clients(&clients_file)?;

    Ok(clients_file)
}

fn validate_clients(clients_file: &ClientsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for client in &clients_file.clients {
        if client.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "client name must be non-empty".to_string(),
            ));
        }

        let lower_name = client.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate client name: '{}'",
                client.name
            )));
        }

        let slug = client.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate client slug: '{}' (from client '{}')",
                slug, client.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(name: &str) -> ClientConfig {
        ClientConfig {
            name: name.to_string(),
            keywords: "economia".to_string(),
            domains: None,
            operators: None,
        }
    }

    #[test]
    fn slug_simple_name() {
        assert_eq!(client("Prefeitura de Olímpia").slug(), "prefeitura-de-olmpia");
    }

    #[test]
    fn slug_special_characters() {
        assert_eq!(client("Grupo João & Cia.").slug(), "grupo-joo-cia");
    }

    #[test]
    fn validate_rejects_empty_name() {
        let file = ClientsFile {
            clients: vec![client("  ")],
        };
        let err = validate_clients(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let file = ClientsFile {
            clients: vec![client("Acme"), client("acme")],
        };
        let err = validate_clients(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate client name"));
    }

    #[test]
    fn validate_rejects_duplicate_slug() {
        let file = ClientsFile {
            clients: vec![client("Rio Preto"), client("Rio--Preto")],
        };
        let err = validate_clients(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate client"));
    }

    #[test]
    fn validate_accepts_valid_clients() {
        let file = ClientsFile {
            clients: vec![client("Acme"), client("Rio Preto")],
        };
        assert!(validate_clients(&file).is_ok());
    }

    #[test]
    fn load_clients_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("clients.yaml");
        assert!(
            path.exists(),
            "clients.yaml missing at {path:?}, required for this test"
        );
        let result = load_clients(&path);
        assert!(result.is_ok(), "failed to load clients.yaml: {result:?}");
        assert!(!result.unwrap().clients.is_empty());
    }
}
