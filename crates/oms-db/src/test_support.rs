//! Shared fixtures for oms-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;

    use oms_core::details::QualityDetail;

    use crate::repos::ledgers::NewLedger;
    use crate::service::OmsService;
    use crate::updates::ledger::LedgerUpdateBuilder;
    use crate::updates::weaver_challan::{WeaverChallanUpdate, WeaverChallanUpdateBuilder};

    /// Fresh in-memory store with the schema applied.
    pub async fn test_service() -> OmsService {
        OmsService::new_local(":memory:").await.unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Create a ledger with a fixed id and return that id.
    pub async fn seed_ledger(svc: &OmsService, id: &str, name: &str) -> String {
        let form = NewLedger {
            ledger_id: Some(id.to_string()),
            fields: LedgerUpdateBuilder::new()
                .business_name(name)
                .city(Some("Surat".into()))
                .state(Some("Gujarat".into()))
                .build(),
        };
        svc.create_ledger(&form, Some("user_admin")).await.unwrap().ledger_id
    }

    pub fn weaver_form(challan_no: &str, batch: &str, quality: &str, rate: f64) -> WeaverChallanUpdate {
        WeaverChallanUpdateBuilder::new()
            .challan_no(challan_no)
            .batch_number(batch)
            .challan_date(date(2025, 1, 10))
            .ms_party_name("Shree Weaving Mills")
            .quality_details(vec![QualityDetail {
                quality_name: Some(quality.into()),
                rate: Some(rate),
            }])
            .taka(12)
            .total_grey_mtr(1200.0)
            .build()
    }
}
