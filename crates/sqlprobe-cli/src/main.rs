//! sqlprobe CLI
//!
//! Command-line tool to tokenize and classify Firebird SQL statements, and
//! to add `RETURNING` clauses for generated keys.

use std::cell::RefCell;
use std::io::{self, Read};
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlprobe_core::detect::{StatementDetector, StatementIdentification};
use sqlprobe_core::dialect::{FirebirdReservedWords, ReservedWords};
use sqlprobe_core::lexer::Tokenizer;
use sqlprobe_core::parser::SqlParser;
use sqlprobe_keys::{
    ColumnInfo, ColumnMetadata, GeneratedKeysMode, GeneratedKeysSupport, KeysRequest,
    ServerVersion,
};

/// Tokenize, classify and rewrite Firebird SQL statements.
#[derive(Parser)]
#[command(name = "sqlprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Firebird version whose reserved words are used (3.0, 4.0, 5.0 or latest).
    #[arg(long, env = "SQLPROBE_RESERVED_WORDS", default_value = "latest")]
    reserved_words: FirebirdReservedWords,

    /// Generated keys mode: default, disabled, ignored or a comma separated
    /// list of query types (insert, update, delete, update_or_insert, merge).
    #[arg(long, env = "SQLPROBE_GENERATED_KEYS", default_value = "default")]
    generated_keys: GeneratedKeysMode,

    /// Firebird server version used to resolve generated keys support.
    #[arg(long, env = "SQLPROBE_SERVER_VERSION", default_value = "5.0")]
    server_version: ServerVersion,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the statement kind, target table and RETURNING detection as JSON.
    Classify {
        /// Skip the scan for a RETURNING clause.
        #[arg(long)]
        no_returning: bool,

        /// Statement text (read from stdin if not specified).
        sql: Option<String>,
    },

    /// Print the tokens of a statement, one per line.
    Tokenize {
        /// Statement text (read from stdin if not specified).
        sql: Option<String>,
    },

    /// Print the statement to execute to retrieve generated keys as JSON.
    Rewrite {
        /// Return the named columns, used as given.
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["indexes", "all"])]
        columns: Vec<String>,

        /// Return the columns at these 1-based positions.
        #[arg(long, value_delimiter = ',', requires = "table_columns", conflicts_with = "all")]
        indexes: Vec<usize>,

        /// Return all columns of the target table.
        #[arg(long)]
        all: bool,

        /// Columns of the target table in ordinal order, standing in for the
        /// database metadata.
        #[arg(long, value_delimiter = ',')]
        table_columns: Vec<String>,

        /// SQL dialect of the connection.
        #[arg(long, default_value_t = 3)]
        dialect: u8,

        /// Statement text (read from stdin if not specified).
        sql: Option<String>,
    },
}

/// Output of the classify command.
#[derive(Serialize)]
struct Classification<'a> {
    #[serde(flatten)]
    identification: &'a StatementIdentification,
    table_name: Option<&'a str>,
    parser_completed: bool,
}

/// Metadata answering every lookup with the columns given on the command line.
struct ListedColumns {
    server_major_version: u32,
    connection_dialect: u8,
    columns: Vec<String>,
}

impl ColumnMetadata for ListedColumns {
    fn server_major_version(&self) -> u32 {
        self.server_major_version
    }

    fn connection_dialect(&self) -> u8 {
        self.connection_dialect
    }

    fn columns(&self, table_pattern: &str) -> sqlprobe_keys::Result<Vec<ColumnInfo>> {
        debug!(table_pattern, "column lookup");
        Ok(self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| ColumnInfo {
                name: name.clone(),
                ordinal_position: idx + 1,
            })
            .collect())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, results to stdout
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Classify { no_returning, sql } => {
            let sql = statement_text(sql)?;
            let output = classify(&sql, &cli.reserved_words, !no_returning)?;
            println!("{output}");
        }

        Commands::Tokenize { sql } => {
            let sql = statement_text(sql)?;
            for line in tokenize(&sql, &cli.reserved_words)? {
                println!("{line}");
            }
        }

        Commands::Rewrite {
            columns,
            indexes,
            all,
            table_columns,
            dialect,
            sql,
        } => {
            let sql = statement_text(sql)?;
            let support = GeneratedKeysSupport::create(&cli.generated_keys, cli.server_version);
            info!(
                mode = %cli.generated_keys,
                server = %cli.server_version,
                "Generated keys support: {:?}",
                support.supported_query_types()
            );
            let metadata = ListedColumns {
                server_major_version: cli.server_version.major,
                connection_dialect: dialect,
                columns: table_columns,
            };
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            let request = match (names.is_empty(), indexes.is_empty()) {
                (false, _) => KeysRequest::ColumnNames(&names),
                (true, false) => KeysRequest::ColumnIndexes(&indexes, &metadata),
                (true, true) if all => KeysRequest::ReturnGeneratedKeys(&metadata),
                (true, true) => KeysRequest::NoGeneratedKeys,
            };
            let query = support.build_query(&sql, request)?;
            println!("{}", serde_json::to_string_pretty(&query)?);
        }
    }

    Ok(())
}

/// Returns the statement given on the command line, or reads it from stdin.
fn statement_text(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(sql) = arg {
        return Ok(sql);
    }
    let mut sql = String::new();
    io::stdin()
        .read_to_string(&mut sql)
        .context("Failed to read statement from stdin")?;
    if sql.trim().is_empty() {
        bail!("No statement given");
    }
    Ok(sql)
}

fn classify(
    sql: &str,
    words: &dyn ReservedWords,
    detect_returning: bool,
) -> anyhow::Result<String> {
    let detector = Rc::new(RefCell::new(StatementDetector::new(detect_returning)));
    let parser = SqlParser::builder(words)
        .with_visitor(detector.clone())
        .of(sql);
    parser
        .parse()
        .with_context(|| format!("Failed to classify statement using {}", words.name()))?;

    let identification = detector.borrow().to_statement_identification();
    let output = Classification {
        identification: &identification,
        table_name: identification.table_name(),
        parser_completed: parser.is_completed(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn tokenize(sql: &str, words: &dyn ReservedWords) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for token in Tokenizer::new(sql, words) {
        let token = token.context("Failed to tokenize statement")?;
        lines.push(format!(
            "{}\t{}\t{:?}",
            token.start(),
            token.kind(),
            token.text()
        ));
    }
    Ok(lines)
}
