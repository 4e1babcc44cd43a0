use exploralytics::dataset::{Column, ColumnData, Dataset};
use exploralytics::stats;
use exploralytics::VizError;

const CSV: &str = "\
city,price,rooms,note
Oslo,100.5,3,
Bergen,NA,2,quiet
Oslo,80,,busy
Tromso,120,4,NaN
";

#[test]
fn csv_types_are_inferred() {
    let data = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
    assert_eq!(data.n_rows(), 4);
    assert_eq!(data.column_names(), vec!["city", "price", "rooms", "note"]);
    assert_eq!(data.numeric_columns(), vec!["price", "rooms"]);
    assert_eq!(
        data.numeric("price").unwrap(),
        &[Some(100.5), None, Some(80.0), Some(120.0)]
    );
    match &data.column("note").unwrap().data {
        ColumnData::Text(cells) => assert_eq!(cells[0], None),
        other => panic!("note should be text, got {other:?}"),
    }
}

#[test]
fn value_counts_most_frequent_first() {
    let data = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
    let counts = data.value_counts("city").unwrap();
    assert_eq!(
        counts,
        vec![
            ("Oslo".to_string(), 2),
            ("Bergen".to_string(), 1),
            ("Tromso".to_string(), 1),
        ]
    );
}

#[test]
fn describe_reports_missing() {
    let data = Dataset::from_csv_reader(CSV.as_bytes()).unwrap();
    let summary = stats::describe(&data);
    assert_eq!(summary.len(), 2);
    let price = &summary[0];
    assert_eq!(price.column, "price");
    assert_eq!(price.count, 3);
    assert_eq!(price.missing, 1);
    assert_eq!(price.min, Some(80.0));
    assert_eq!(price.max, Some(120.0));
}

#[test]
fn mismatched_lengths_rejected() {
    let err = Dataset::new(vec![
        Column::numeric("a", [1.0, 2.0]),
        Column::numeric("b", [1.0]),
    ])
    .unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn duplicate_names_rejected() {
    let err = Dataset::new(vec![
        Column::numeric("a", [1.0]),
        Column::numeric("a", [2.0]),
    ])
    .unwrap_err();
    assert!(matches!(err, VizError::InvalidArgument(_)));
}

#[test]
fn unknown_column_is_invalid() {
    let data = Dataset::new(vec![Column::numeric("a", [1.0])]).unwrap();
    assert!(matches!(data.require_column("zzz"), Err(VizError::InvalidArgument(_))));
}

#[test]
fn infinite_cells_are_missing() {
    let data = Dataset::from_csv_reader("a,b\ninf,1\n1e999,2\n3,4\n".as_bytes()).unwrap();
    assert_eq!(data.numeric_columns(), vec!["a", "b"]);
    assert_eq!(data.numeric("a").unwrap(), &[None, None, Some(3.0)]);
}
