//! Configuração do usersync carregada a partir de `usersync.toml`.
//!
//! A struct [`SyncConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `USERSYNC_LOG` tem precedência sobre o arquivo.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "usersync.toml";

/// Variável de ambiente com o filtro de log.
pub const LOG_ENV: &str = "USERSYNC_LOG";

/// Configuração de nível superior carregada de `usersync.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Índice (a partir de zero) da linha de cabeçalho em cada aba ou CSV.
    #[serde(default = "default_header_row")]
    pub header_row: usize,

    /// Gera ramais quando a CLI não diz nada.
    #[serde(default)]
    pub generate_extensions: bool,

    /// Filtro de log no formato do `tracing_subscriber::EnvFilter`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Separador dos CSVs exportados.
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,
}

// As planilhas da plataforma têm duas linhas de título antes do cabeçalho.
fn default_header_row() -> usize {
    2
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_csv_delimiter() -> char {
    ','
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            header_row: default_header_row(),
            generate_extensions: false,
            log_level: default_log_level(),
            csv_delimiter: default_csv_delimiter(),
        }
    }
}

impl SyncConfig {
    /// Carrega a configuração de `path`, ou de `usersync.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new(CONFIG_FILE));
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::parse(&contents).with_context(|| format!("invalid config {}", path.display()))?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração.
        if let Ok(level) = std::env::var(LOG_ENV)
            && !level.is_empty()
        {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(contents)?;
        if !config.csv_delimiter.is_ascii() {
            bail!("csv_delimiter must be a single ASCII character");
        }
        Ok(config)
    }

    /// O separador como byte, para a crate `csv`.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.csv_delimiter).unwrap_or(b',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = SyncConfig::default();
        assert_eq!(config.header_row, 2);
        assert!(!config.generate_extensions);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn deserialize_partial_toml() {
        let config = SyncConfig::parse(
            r#"
            header_row = 0
            csv_delimiter = ";"
        "#,
        )
        .unwrap();
        assert_eq!(config.header_row, 0);
        assert_eq!(config.delimiter_byte(), b';');
        assert!(!config.generate_extensions);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert!(SyncConfig::parse("csv_delimiter = \"§\"").is_err());
    }

    #[test]
    fn load_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generate_extensions = true").unwrap();
        let config = SyncConfig::load(Some(file.path())).unwrap();
        assert!(config.generate_extensions);
        assert_eq!(config.header_row, 2);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config.header_row, 2);
    }
}
