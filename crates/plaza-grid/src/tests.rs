//! Tests for grid state, controller sequencing, formatting, and the editor

use std::sync::Arc;

use plaza_core::{CellValue, ColumnDescriptor, Record};
use plaza_rpc::test_support::{MockRpcClient, MockTable};
use serde_json::json;

use crate::{
    format_cell, format_row, insert_form, widget_for, FieldWidget, GridController, GridQuery,
    RecordEditor, RefetchSignal, SortDirection,
};

fn column(name: &str, data_type: &str, primary: bool, nullable: bool) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable,
        default_value: primary.then(|| "nextval('widgets_id_seq'::regclass)".to_string()),
        is_primary_key: primary,
        foreign_key: None,
    }
}

fn widgets(rows: usize) -> MockTable {
    MockTable::new(
        "widgets",
        vec![
            column("id", "integer", true, false),
            column("name", "text", false, false),
        ],
    )
    .with_rows(
        (1..=rows)
            .map(|i| json!({"id": i, "name": format!("widget {:02}", i)}))
            .collect(),
    )
}

fn rpc(rows: usize) -> Arc<MockRpcClient> {
    Arc::new(MockRpcClient::new().with_table(widgets(rows)))
}

mod query_state_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_column_click_flips_direction_and_keeps_page() {
        let mut query = GridQuery::new();
        query.toggle_sort("name");
        query.set_page(2);
        query.toggle_sort("name");

        let sort = query.sort().unwrap();
        assert_eq!(sort.column, "name");
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(query.page(), 2);

        // and a third click flips back without touching the page
        query.toggle_sort("name");
        assert_eq!(query.sort().unwrap().direction, SortDirection::Ascending);
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_new_column_resets_to_ascending_page_one() {
        let mut query = GridQuery::new();
        query.toggle_sort("name");
        query.toggle_sort("name");
        query.set_page(3);

        query.toggle_sort("id");
        let sort = query.sort().unwrap();
        assert_eq!(sort.column, "id");
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut query = GridQuery::new();
        query.set_page(4);
        query.set_search("lamp");
        assert_eq!(query.page(), 1);

        // setting the same term again is not a change
        query.set_page(2);
        query.set_search("lamp");
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn test_page_size_must_come_from_the_fixed_set() {
        let mut query = GridQuery::new();
        assert!(!query.set_page_size(33));
        assert_eq!(query.page_size(), 25);

        query.set_page(3);
        assert!(query.set_page_size(50));
        assert_eq!(query.page_size(), 50);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_fetch_args_carry_all_five_parameters() {
        let mut query = GridQuery::new();
        query.set_search("chair");
        query.toggle_sort("name");
        query.toggle_sort("name");

        let args = query.as_args("listings");
        assert_eq!(args["table_name"], json!("listings"));
        assert_eq!(args["page"], json!(1));
        assert_eq!(args["page_size"], json!(25));
        assert_eq!(args["search_term"], json!("chair"));
        assert_eq!(args["sort_column"], json!("name"));
        assert_eq!(args["sort_direction"], json!("desc"));
    }
}

mod controller_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_page_counts_match_ceiling_of_total() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();
        controller.query_mut().set_page_size(10);
        controller.toggle_sort("name").await.unwrap();

        controller.set_page(3).await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.row_count(), 3);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.total_count, 23);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_without_error() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();
        controller.query_mut().set_page_size(10);

        controller.set_page(4).await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.row_count(), 0);
        assert_eq!(page.page_count(), 3);
    }

    #[tokio::test]
    async fn test_full_pages_have_page_size_rows() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();
        controller.query_mut().set_page_size(10);

        for page_no in 1..=2 {
            controller.set_page(page_no).await.unwrap();
            assert_eq!(controller.page().unwrap().row_count(), 10);
        }
    }

    #[tokio::test]
    async fn test_exact_multiple_fills_the_last_page() {
        let mut controller = GridController::new(rpc(30));
        controller.open_table("widgets").await.unwrap();
        controller.query_mut().set_page_size(10);

        controller.set_page(3).await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.row_count(), 10);
        assert_eq!(page.page_count(), 3);
    }

    #[tokio::test]
    async fn test_structure_fetch_resolves_identity() {
        let mut controller = GridController::new(rpc(5));
        controller.open_table("widgets").await.unwrap();
        assert_eq!(controller.identity().unwrap().column(), "id");
        assert_eq!(controller.columns().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();

        // two fetches race: the older one settles last
        controller.query_mut().set_search("widget 1");
        let older = controller.stamp_fetch().unwrap();
        controller.query_mut().set_search("widget 2");
        let newer = controller.stamp_fetch().unwrap();

        let newer_response = controller.execute(&newer).await.unwrap();
        let older_response = controller.execute(&older).await.unwrap();

        assert!(controller.apply(newer_response));
        assert!(!controller.apply(older_response));

        // the grid still shows the newer result: widgets 20..23
        assert_eq!(controller.page().unwrap().total_count, 4);
    }

    #[tokio::test]
    async fn test_settled_fetch_keeps_its_stamped_page_size() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();

        // stamped at the default size of 25, then the query moves to 10
        let request = controller.stamp_fetch().unwrap();
        controller.query_mut().set_page_size(10);

        let response = controller.execute(&request).await.unwrap();
        assert!(controller.apply(response));
        assert_eq!(controller.page().unwrap().page_count(), 1);
    }

    #[tokio::test]
    async fn test_search_is_forwarded_server_side() {
        let mut controller = GridController::new(rpc(23));
        controller.open_table("widgets").await.unwrap();

        controller.set_search("widget 07").await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(
            page.rows[0].get("name"),
            Some(&CellValue::Text("widget 07".to_string()))
        );
    }
}

mod display_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_renders_as_literal() {
        assert_eq!(format_cell(&CellValue::Null, "text"), "NULL");
    }

    #[test]
    fn test_booleans_render_as_words() {
        assert_eq!(format_cell(&CellValue::Bool(true), "boolean"), "true");
        assert_eq!(format_cell(&CellValue::Bool(false), "boolean"), "false");
    }

    #[test]
    fn test_structured_values_render_as_json() {
        let value = CellValue::Json(json!({"color": "red"}));
        assert_eq!(format_cell(&value, "jsonb"), "{\"color\":\"red\"}");
    }

    #[test]
    fn test_timestamp_columns_get_date_time_formatting() {
        let value = CellValue::Text("2024-05-01T12:30:00".to_string());
        assert_eq!(
            format_cell(&value, "timestamp without time zone"),
            "2024-05-01 12:30:00"
        );
    }

    #[test]
    fn test_unparseable_temporal_falls_back_to_the_raw_string() {
        let value = CellValue::Text("not a date".to_string());
        assert_eq!(format_cell(&value, "date"), "not a date");
    }

    #[test]
    fn test_row_formatting_follows_column_order() {
        let columns = vec![
            column("id", "integer", true, false),
            column("name", "text", false, false),
            column("sold_at", "timestamp with time zone", false, true),
        ];
        let record = Record::from_json(json!({"name": "lamp", "id": 7}));
        assert_eq!(
            format_row(&record, &columns),
            vec!["7".to_string(), "lamp".to_string(), "NULL".to_string()]
        );
    }
}

mod signal_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn test_one_raise_wakes_exactly_once() {
        let signal = RefetchSignal::new();

        // raised before anyone waits: the permit is banked, not lost
        signal.request();
        signal.wait().await;
        assert_eq!(signal.request_count(), 1);

        // but one raise never produces a second wakeup
        let spurious = tokio::time::timeout(Duration::from_millis(20), signal.wait()).await;
        assert!(spurious.is_err());
    }
}

mod editor_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use plaza_catalog::RowIdentity;

    fn editor_for(rpc: &Arc<MockRpcClient>, signal: &RefetchSignal) -> RecordEditor {
        let columns = vec![
            column("id", "integer", true, false),
            column("name", "text", false, false),
        ];
        RecordEditor::new(
            rpc.clone(),
            "widgets",
            RowIdentity::resolve(&columns),
            signal.clone(),
        )
    }

    #[test]
    fn test_widget_inference_by_type_substring() {
        assert_eq!(widget_for("integer"), FieldWidget::Number);
        assert_eq!(widget_for("numeric(10,2)"), FieldWidget::Number);
        assert_eq!(widget_for("double precision"), FieldWidget::Number);
        assert_eq!(widget_for("boolean"), FieldWidget::Checkbox);
        assert_eq!(widget_for("timestamp with time zone"), FieldWidget::DateTime);
        assert_eq!(widget_for("date"), FieldWidget::DateTime);
        assert_eq!(widget_for("text"), FieldWidget::Text);
        assert_eq!(widget_for("character varying(64)"), FieldWidget::Text);
    }

    #[test]
    fn test_insert_form_skips_generated_columns() {
        let columns = vec![
            column("id", "integer", true, false),
            column("name", "text", false, false),
            column("price", "numeric", false, true),
        ];
        let form = insert_form(&columns);
        let names: Vec<&str> = form.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(names, vec!["name", "price"]);
        assert!(form[0].required);
        assert!(!form[1].required);
    }

    #[tokio::test]
    async fn test_inserted_record_comes_back_intact() {
        let rpc = rpc(23);
        let signal = RefetchSignal::new();
        let editor = editor_for(&rpc, &signal);

        let mut record = Record::new();
        record.set("name", CellValue::Text("zz special".to_string()));
        editor.insert(record).await.unwrap();
        assert_eq!(signal.request_count(), 1);

        // the next grid fetch sees the row with the supplied values intact
        let mut controller = GridController::new(rpc);
        controller.open_table("widgets").await.unwrap();
        controller.set_search("zz special").await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(
            page.rows[0].get("name"),
            Some(&CellValue::Text("zz special".to_string()))
        );
        // the generated primary key was assigned server-side
        assert!(page.rows[0].get("id").is_some());
    }

    #[tokio::test]
    async fn test_failed_insert_raises_no_refetch() {
        let rpc = rpc(23);
        let signal = RefetchSignal::new();
        let editor = editor_for(&rpc, &signal);

        // required "name" column omitted
        let err = editor.insert(Record::new()).await.unwrap_err();
        assert!(err.to_string().contains("not-null constraint"));
        assert_eq!(signal.request_count(), 0);
        assert_eq!(rpc.row_count("widgets"), 23);
    }

    #[tokio::test]
    async fn test_update_sends_the_entire_row() {
        let rpc = rpc(3);
        let signal = RefetchSignal::new();
        let editor = editor_for(&rpc, &signal);

        let record = Record::from_json(json!({"id": 2, "name": "renamed"}));
        editor
            .update(&CellValue::Int(2), record)
            .await
            .unwrap();
        assert_eq!(signal.request_count(), 1);

        let mut controller = GridController::new(rpc);
        controller.open_table("widgets").await.unwrap();
        controller.set_search("renamed").await.unwrap();
        assert_eq!(controller.page().unwrap().total_count, 1);
    }

    #[tokio::test]
    async fn test_delete_decrements_total_and_second_delete_fails() {
        let rpc = rpc(23);
        let signal = RefetchSignal::new();
        let editor = editor_for(&rpc, &signal);

        editor.delete(&CellValue::Int(5)).await.unwrap();
        assert_eq!(signal.request_count(), 1);

        let mut controller = GridController::new(rpc.clone());
        controller.open_table("widgets").await.unwrap();
        assert_eq!(controller.page().unwrap().total_count, 22);
        controller.set_search("widget 05").await.unwrap();
        assert_eq!(controller.page().unwrap().total_count, 0);

        // deleting the now-absent key reports failure, not silent success
        let err = editor.delete(&CellValue::Int(5)).await.unwrap_err();
        assert_eq!(err.to_string(), "Editor error: could not delete record");
        assert_eq!(signal.request_count(), 1);
    }

    #[tokio::test]
    async fn test_bigint_identity_targets_the_exact_row() {
        // adjacent ids past 2^53 collapse to the same f64; the mutation
        // must be keyed by the exact fetched value
        let table = MockTable::new(
            "widgets",
            vec![
                column("id", "bigint", true, false),
                column("name", "text", false, false),
            ],
        )
        .with_rows(vec![
            json!({"id": 9_007_199_254_740_992i64, "name": "keep me"}),
            json!({"id": 9_007_199_254_740_993i64, "name": "delete me"}),
        ]);
        let rpc = Arc::new(MockRpcClient::new().with_table(table));
        let signal = RefetchSignal::new();
        let editor = editor_for(&rpc, &signal);

        editor
            .delete(&CellValue::Int(9_007_199_254_740_993))
            .await
            .unwrap();

        let mut controller = GridController::new(rpc);
        controller.open_table("widgets").await.unwrap();
        let page = controller.page().unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(
            page.rows[0].get("name"),
            Some(&CellValue::Text("keep me".to_string()))
        );
        assert_eq!(
            page.rows[0].get("id"),
            Some(&CellValue::Int(9_007_199_254_740_992))
        );
    }

    #[tokio::test]
    async fn test_editor_fails_closed_without_identity() {
        let rpc = rpc(3);
        let signal = RefetchSignal::new();
        let editor = RecordEditor::new(rpc, "widgets", None, signal.clone());

        assert!(!editor.can_mutate());
        let err = editor.delete(&CellValue::Int(1)).await.unwrap_err();
        assert!(err.to_string().contains("no primary key"));
        assert_eq!(signal.request_count(), 0);
    }
}
