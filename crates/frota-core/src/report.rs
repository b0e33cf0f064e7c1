//! Report rows and record write-back

use chrono::NaiveDate;
use frota_api::{CnhDescriptor, DriverRecord, OmnilinkDescriptor};
use frota_util::DriverId;
use serde::Serialize;
use tracing::debug;

use crate::{
    calculate_omnilink_score_expiry, cnh_status_at, detailed_omnilink_status_at, format_date,
    format_month_year, omnilink_expiry, omnilink_score_status_at,
};

/// Copy of `record` with the persisted Omnilink fields recomputed from its
/// registration date. The caller decides whether to store it.
pub fn derive_omnilink_fields(record: &DriverRecord, today: NaiveDate) -> DriverRecord {
    let registration = record.omnilink_registration.as_deref();
    let mut derived = record.clone();
    derived.omnilink_status = omnilink_score_status_at(registration, today);
    derived.omnilink_expiry = calculate_omnilink_score_expiry(registration);

    if derived.omnilink_status != record.omnilink_status {
        debug!(
            driver_id = %record.id,
            previous = ?record.omnilink_status,
            current = ?derived.omnilink_status,
            "Omnilink status changed"
        );
    }

    derived
}

/// One line of the compliance report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverReportRow {
    pub id: DriverId,
    pub name: String,
    /// `DD/MM/YYYY`, or a placeholder
    pub cnh_expiry: String,
    pub cnh: CnhDescriptor,
    pub omnilink_registration: String,
    pub omnilink_expiry: String,
    pub omnilink: OmnilinkDescriptor,
}

impl DriverReportRow {
    pub fn from_record(record: &DriverRecord, today: NaiveDate) -> Self {
        let registration = record.omnilink_registration.as_deref();
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            cnh_expiry: format_date(record.cnh_expiry.as_deref()),
            cnh: cnh_status_at(record.cnh_expiry.as_deref(), today),
            omnilink_registration: format_date(registration),
            omnilink_expiry: format_date(omnilink_expiry(registration)),
            omnilink: detailed_omnilink_status_at(registration, today),
        }
    }
}

/// Report rows for `records`, in input order
pub fn report_rows(records: &[DriverRecord], today: NaiveDate) -> Vec<DriverReportRow> {
    records
        .iter()
        .map(|record| DriverReportRow::from_record(record, today))
        .collect()
}

/// Report heading, e.g. `Relatório de conformidade de junho de 2024`
pub fn report_title(today: NaiveDate) -> String {
    format!("Relatório de conformidade de {}", format_month_year(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLACEHOLDER;
    use frota_api::{CnhStatus, OmnilinkStatus, ScoreStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn derive_fills_status_and_expiry() {
        let record = DriverRecord::new("d-1", "Ana").with_omnilink_registration("2024-03-01");
        let derived = derive_omnilink_fields(&record, today());

        assert_eq!(derived.omnilink_status, Some(ScoreStatus::EmDia));
        assert_eq!(derived.omnilink_expiry.as_deref(), Some("2024-09-01"));
        assert_eq!(derived.name, "Ana");
        // Input untouched
        assert!(record.omnilink_status.is_none());
    }

    #[test]
    fn derive_marks_expired_as_inapto() {
        let record = DriverRecord::new("d-2", "Bruno").with_omnilink_registration("2023-12-15");
        let derived = derive_omnilink_fields(&record, today());
        assert_eq!(derived.omnilink_status, Some(ScoreStatus::Inapto));
        assert_eq!(derived.omnilink_expiry.as_deref(), Some("2024-06-15"));
    }

    #[test]
    fn derive_clears_fields_without_registration() {
        let mut record = DriverRecord::new("d-3", "Carla");
        record.omnilink_status = Some(ScoreStatus::EmDia);
        record.omnilink_expiry = Some("2024-01-01".into());

        let derived = derive_omnilink_fields(&record, today());
        assert!(derived.omnilink_status.is_none());
        assert!(derived.omnilink_expiry.is_none());
    }

    #[test]
    fn rows_format_dates_for_display() {
        let records = vec![
            DriverRecord::new("d-1", "Ana")
                .with_cnh_expiry("2024-07-01")
                .with_omnilink_registration("2023-11-01"),
            DriverRecord::new("d-2", "Bruno").with_cnh_expiry("amanhã"),
        ];
        let rows = report_rows(&records, today());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cnh_expiry, "01/07/2024");
        assert_eq!(rows[0].cnh.status, CnhStatus::ExpiringSoon);
        assert_eq!(rows[0].omnilink_registration, "01/11/2023");
        assert_eq!(rows[0].omnilink_expiry, "01/05/2024");
        assert_eq!(rows[0].omnilink.status, OmnilinkStatus::Vencido);

        assert_eq!(rows[1].cnh_expiry, crate::INVALID_DATE);
        assert_eq!(rows[1].cnh.status, CnhStatus::Unknown);
        assert_eq!(rows[1].omnilink_registration, PLACEHOLDER);
        assert_eq!(rows[1].omnilink_expiry, PLACEHOLDER);
    }

    #[test]
    fn row_serializes_descriptors_in_camel_case() {
        let record = DriverRecord::new("d-1", "Ana").with_omnilink_registration("2024-01-25");
        let row = DriverReportRow::from_record(&record, today());
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["id"], "d-1");
        assert_eq!(json["omnilink"]["status"], "prest_vencer");
        assert_eq!(json["omnilink"]["daysDifference"], 40);
        assert_eq!(json["omnilink"]["expiryDate"], "2024-07-25");
    }

    #[test]
    fn title_names_the_month() {
        assert_eq!(
            report_title(today()),
            "Relatório de conformidade de junho de 2024"
        );
    }
}
