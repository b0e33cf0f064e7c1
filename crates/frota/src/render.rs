//! Plain-text output

use frota_api::{
    CnhDescriptor, CnhStatus, CredentialStatus, OmnilinkDescriptor, OmnilinkStatus, ScoreStatus,
};
use frota_core::{Bucket, ComplianceSummary, DriverReportRow, format_date};
use serde::Serialize;
use std::fmt::{self, Write};

/// Everything the `omnilink` command reports for one registration date
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OmnilinkOutput {
    /// Value persisted with the driver record
    pub score_status: Option<ScoreStatus>,
    #[serde(flatten)]
    pub descriptor: OmnilinkDescriptor,
}

pub fn cnh_line(descriptor: &CnhDescriptor) -> String {
    format!("[{}] {}", descriptor.status.label(), descriptor.message)
}

pub fn omnilink_line(descriptor: &OmnilinkDescriptor) -> String {
    format!("[{}] {}", descriptor.status.label(), descriptor.message)
}

pub fn omnilink_block(out: &mut impl Write, output: &OmnilinkOutput) -> fmt::Result {
    writeln!(out, "{}", omnilink_line(&output.descriptor))?;
    writeln!(
        out,
        "  Vencimento: {}",
        format_date(output.descriptor.expiry_date)
    )?;
    writeln!(
        out,
        "  Situação: {}",
        output.score_status.map_or("-", |s| s.as_str())
    )
}

pub fn dashboard(out: &mut impl Write, summary: &ComplianceSummary) -> fmt::Result {
    writeln!(
        out,
        "Motoristas: {} ({} precisam de atenção)",
        summary.total, summary.needs_attention
    )?;

    writeln!(out, "\nCNH")?;
    for status in CnhStatus::ALL {
        writeln!(out, "  {:<18}{}", status.label(), summary.cnh_count(*status))?;
    }

    writeln!(out, "\nScore Omnilink")?;
    for status in OmnilinkStatus::ALL {
        writeln!(out, "  {:<18}{}", status.label(), summary.omnilink_count(*status))?;
    }

    writeln!(out, "\nFaixas")?;
    for bucket in Bucket::ALL {
        writeln!(out, "  {:<22}{}", bucket.key(), summary.bucket_count(bucket))?;
    }
    Ok(())
}

pub fn report(out: &mut impl Write, rows: &[DriverReportRow]) -> fmt::Result {
    for row in rows {
        writeln!(out, "{} - {}", row.id, row.name)?;
        writeln!(out, "  CNH ({}): {}", row.cnh_expiry, cnh_line(&row.cnh))?;
        writeln!(
            out,
            "  Omnilink ({} → {}): {}",
            row.omnilink_registration,
            row.omnilink_expiry,
            omnilink_line(&row.omnilink)
        )?;
    }
    Ok(())
}
