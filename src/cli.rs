//! Interface de linha de comando do usersync baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (process, compare, set-team)
//! e flags globais (--config, --log-level, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// usersync — concilia planilhas de usuários com o diretório da plataforma.
#[derive(Debug, Parser)]
#[command(name = "usersync", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do arquivo de configuração (padrão: ./usersync.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Filtro de log (ex.: "info", "usersync=debug").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Concilia uma planilha com o diretório e gera os registros finais.
    Process {
        /// Planilha de entrada (.xlsx, .xlsm, .xlsb, .xls ou .csv).
        input: PathBuf,

        /// JSON do template de usuário.
        #[arg(long)]
        template: PathBuf,

        /// JSON com os times da plataforma e seus membros.
        #[arg(long)]
        directory: PathBuf,

        /// Gera ramais únicos por time.
        #[arg(long)]
        generate_extensions: bool,

        /// Arquivo JSON de saída.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Arquivo CSV de saída.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Compara os e-mails de um JSON exportado com os de uma nova planilha.
    Compare {
        /// JSON exportado anteriormente.
        records: PathBuf,

        /// Nova planilha.
        input: PathBuf,
    },

    /// Define um único time para todos os registros de um JSON exportado.
    SetTeam {
        /// JSON exportado anteriormente.
        records: PathBuf,

        /// Nome do time a aplicar.
        #[arg(long)]
        team: String,

        /// JSON do template, necessário para exportar CSV.
        #[arg(long)]
        template: Option<PathBuf>,

        /// Arquivo JSON de saída (padrão: sobrescreve o de entrada).
        #[arg(long)]
        json: Option<PathBuf>,

        /// Arquivo CSV de saída.
        #[arg(long, requires = "template")]
        csv: Option<PathBuf>,
    },
}
