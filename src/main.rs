use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sobject_jsonschema::schema::{api_json_schema_string, DEFAULT_ID_PREFIX};
use sobject_jsonschema::{ObjectDescription, SObjectSchemaGenerator, SchemaConfig};

/// Generate JSON Schema (draft-04) from SObject describe metadata
#[derive(Parser, Debug)]
#[command(name = "sobject-jsonschema", version)]
struct Cli {
    /// Describe JSON file, or `-` for stdin
    #[arg(required_unless_present = "api")]
    describe: Option<PathBuf>,

    /// Prefix for generated schema identifiers
    #[arg(long, default_value = DEFAULT_ID_PREFIX)]
    id_prefix: String,

    /// Skip the QueryRecords wrapper schema
    #[arg(long)]
    no_query_schema: bool,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Emit the schema of the fixed REST API shapes instead
    #[arg(long, conflicts_with = "describe")]
    api: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    if cli.api {
        return Ok(api_json_schema_string(!cli.compact)?);
    }

    let source = match cli.describe.as_deref() {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let description = ObjectDescription::from_json(&source)?;

    let generator = SObjectSchemaGenerator::new(SchemaConfig {
        id_prefix: cli.id_prefix.clone(),
        add_query_schema: !cli.no_query_schema,
        pretty: !cli.compact,
    });
    Ok(generator.json_schema_string(&description)?)
}
