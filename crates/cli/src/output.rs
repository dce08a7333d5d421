use dnsdig_application::DigResult;
use dnsdig_domain::{DnsRecord, Domain};
use serde::Serialize;
use std::io::Write;

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct DigLine<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [DnsRecord]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn print_result(
    out: &mut impl Write,
    query: &str,
    result: &DigResult,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let line = match result {
            Ok(records) => DigLine {
                query,
                records: Some(records),
                error: None,
            },
            Err(e) => DigLine {
                query,
                records: None,
                error: Some(e.to_string()),
            },
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
        return Ok(());
    }

    match result {
        Ok(records) if records.is_empty() => writeln!(out, ";; {}: no records", query)?,
        Ok(records) => {
            writeln!(out, ";; {}", query)?;
            for record in records {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    record.name, record.ttl, record.record_type, record.data
                )?;
            }
        }
        Err(e) => writeln!(out, ";; {}: error: {}", query, e)?,
    }
    Ok(())
}

/// `uuid<TAB>fqdn` per domain, or one JSON object per line.
pub fn print_domains(out: &mut impl Write, domains: &[Domain], json: bool) -> anyhow::Result<()> {
    for domain in domains {
        if json {
            serde_json::to_writer(&mut *out, domain)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}\t{}", domain.uuid, domain.fqdn())?;
        }
    }
    Ok(())
}
