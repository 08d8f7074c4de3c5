//! End-to-end production flow against an on-disk store: weaver receipt,
//! stitching, expenses, classification, then the product cost report and
//! barcode sheet built from what the store returns.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

use oms_core::costing::{BarcodeSettings, generate_barcodes, product_cost_report};
use oms_core::details::{QualityDetail, SizeQuantity};
use oms_core::enums::InventoryClassification;
use oms_core::inventory::{batch_data, finished_stock};
use oms_db::repos::ledgers::NewLedger;
use oms_db::repos::products::NewProduct;
use oms_db::repos::shorting_entries::NewShortingEntry;
use oms_db::service::OmsService;
use oms_db::updates::expense::ExpenseUpdateBuilder;
use oms_db::updates::ledger::LedgerUpdateBuilder;
use oms_db::updates::stitching_challan::StitchingChallanUpdateBuilder;
use oms_db::updates::weaver_challan::WeaverChallanUpdateBuilder;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

struct Seeded {
    svc: OmsService,
    product_id: i64,
    challan_id: i64,
    _dir: tempfile::TempDir,
}

async fn seed() -> Seeded {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oms.db");
    let svc = OmsService::new_local(path.to_str().unwrap()).await.unwrap();

    svc.create_ledger(
        &NewLedger {
            ledger_id: Some("LED-STITCH".into()),
            fields: LedgerUpdateBuilder::new().business_name("Shree Stitchers").build(),
        },
        None,
    )
    .await
    .unwrap();

    let weaver = WeaverChallanUpdateBuilder::new()
        .challan_no("WC-1")
        .batch_number("B-7")
        .challan_date(day(1))
        .ms_party_name("Shree Weaving Mills")
        .quality_details(vec![QualityDetail {
            quality_name: Some("Cotton 60".into()),
            rate: Some(50.0),
        }])
        .taka(10)
        .total_grey_mtr(1000.0)
        .build();
    let weaver = svc.create_weaver_challan(&weaver, None).await.unwrap();

    let product = svc
        .create_product(
            &NewProduct {
                product_name: "Kurta".into(),
                product_sku: "KRT-1".into(),
                product_category: "Apparel".into(),
                product_brand: Some("Utsav".into()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let stitching = StitchingChallanUpdateBuilder::new()
        .challan_no("SC-1")
        .date(day(5))
        .batch_number(vec!["B-7".into()])
        .quality("Cotton 60")
        .quantity(30)
        .ledger_id(Some("LED-STITCH".into()))
        .selected_product_id(Some(product.id))
        .product_size(vec![
            SizeQuantity {
                size: "M".into(),
                quantity: 2,
            },
            SizeQuantity {
                size: "L".into(),
                quantity: 0,
            },
        ])
        .build();
    let stitching = svc.create_stitching_challan(&stitching, None).await.unwrap();

    for amount in [1000.0, 250.0] {
        let expense = ExpenseUpdateBuilder::new()
            .expense_date(day(6))
            .challan_no(Some("SC-1".into()))
            .expense_for(vec!["Stitching".into()])
            .amount_before_gst(amount)
            .sgst(Some("6%".into()))
            .cgst(Some("6%".into()))
            .build();
        svc.create_expense(&expense, None).await.unwrap();
    }

    svc.create_shorting_entry(
        &NewShortingEntry {
            entry_date: Some(day(7)),
            quality_name: Some("Cotton 60".into()),
            shorting_qty: 5.0,
            weaver_challan_id: Some(weaver.id),
            ..Default::default()
        },
        None,
    )
    .await
    .unwrap();

    Seeded {
        svc,
        product_id: product.id,
        challan_id: stitching.id,
        _dir: dir,
    }
}

#[tokio::test]
async fn product_cost_report_from_store() {
    let seeded = seed().await;
    let svc = &seeded.svc;

    let product = svc.get_product(seeded.product_id).await.unwrap();
    let stitchings = svc.stitching_challans_for_product(product.id).await.unwrap();
    let batches = oms_core::costing::flatten_batch_numbers(&stitchings);
    let weavers = svc.weaver_challans_by_batches(&batches).await.unwrap();
    let numbers: Vec<String> = stitchings.iter().map(|s| s.challan_no.clone()).collect();
    let expenses = svc.expenses_for_challans(&numbers).await.unwrap();

    let report = product_cost_report(product, stitchings, weavers, &expenses);
    assert_eq!(report.batch_numbers, vec!["B-7"]);
    assert_eq!(report.weaver_challan_numbers, vec!["WC-1"]);
    assert_eq!(report.stitching_challan_numbers, vec!["SC-1"]);
    assert!((report.cost_incurred - 1400.0).abs() < 1e-9);
}

#[tokio::test]
async fn barcode_sheet_from_store() {
    let seeded = seed().await;
    let svc = &seeded.svc;

    let challan = svc.get_stitching_challan(seeded.challan_id).await.unwrap();
    let product = svc.get_product(seeded.product_id).await.unwrap();
    let weavers = svc
        .weaver_challans_by_batches(&challan.batch_number)
        .await
        .unwrap();
    let settings = BarcodeSettings {
        app_url: "http://oms.test".into(),
        barcode_service_url: "http://bwip.test".into(),
        default_brand: "Bhaktinandan".into(),
    };
    let sheet = generate_barcodes(
        &challan,
        Some(&product),
        Some("Shree Stitchers"),
        &weavers,
        &settings,
    );

    let counts: Vec<usize> = sheet.barcodes.iter().map(|s| s.barcodes.len()).collect();
    assert_eq!(counts, vec![5, 3]);
    assert_eq!(
        sheet.barcodes[0].barcodes[4].text,
        format!("http://oms.test/product/{}?size=M&barcode=5", product.id)
    );
    assert!((sheet.content.cost - 1500.0).abs() < 1e-9);
    assert_eq!(sheet.content.product_brand, "Utsav");
}

#[tokio::test]
async fn finished_stock_and_batches_from_store() {
    let seeded = seed().await;
    let svc = &seeded.svc;

    let weavers = svc.list_weaver_challans().await.unwrap();
    let shortings = svc.all_shorting_entries().await.unwrap();
    let stitchings = svc.list_stitching_challans().await.unwrap();
    let expenses = svc.all_expenses().await.unwrap();

    let stock = finished_stock(&weavers, &shortings, &stitchings);
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].quality_name, "Cotton 60");
    assert!((stock[0].available_qty - (50.0 - 5.0 - 30.0)).abs() < 1e-9);

    let batches = batch_data(&weavers, &stitchings, &expenses);
    assert_eq!(batches[0].stitching_challans.len(), 1);
    assert_eq!(batches[0].expenses.len(), 2);
}

#[rstest]
#[case(InventoryClassification::Good)]
#[case(InventoryClassification::Bad)]
#[case(InventoryClassification::Wastage)]
#[case(InventoryClassification::Shorting)]
#[tokio::test]
async fn classification_moves_challan_between_lists(#[case] class: InventoryClassification) {
    let seeded = seed().await;
    let svc = &seeded.svc;

    svc.classify_stitching_challan(seeded.challan_id, class, Some("u1"))
        .await
        .unwrap();
    for other in InventoryClassification::ALL {
        let listed = svc.stitching_challans_by_classification(other).await.unwrap();
        assert_eq!(listed.len(), usize::from(other == class), "list {other}");
    }
}
