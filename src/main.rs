use ipfix_walk::{registry, MessageHeader, Walker, WalkerConfig};
use std::env;
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Walks the IPFIX messages stored in the files given on the command line, one raw message per
/// file, and prints every decoded field. Files are walked in order with a single walker so
/// templates carry over from one file to the next.
fn main() -> Result<(), Error>
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut walker = Walker::with_config(None, print_field, WalkerConfig::default())?;
    for path in env::args().skip(1) {
        let data = std::fs::read(&path)?;
        println!("# {}", path);
        walker.walk_buffer(&data)?;
    }

    Ok(())
}

fn print_field(header: &MessageHeader, enterprise_id: u32, field_id: u16, value: &[u8])
    -> Result<(), Error>
{
    println!("{}", format_field(header, enterprise_id, field_id, value));
    Ok(())
}

fn format_field(header: &MessageHeader, enterprise_id: u32, field_id: u16, value: &[u8]) -> String
{
    let name = registry::lookup(enterprise_id, field_id).map_or("unknown", |ie| ie.name);
    format!(
        "domain={} seq={} {}/{} {} = {}",
        header.domain_id,
        header.sequence_number,
        enterprise_id,
        field_id,
        name,
        hex::encode(value)
    )
}
