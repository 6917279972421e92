//! Behavioural tests for the table component.

#[cfg(test)]
mod table_tests {
    use crate::config::Config;
    use crate::options::{LayoutProvider, Panel, Point, Rect};
    use crate::row::Row;
    use crate::sort::SortOrder;
    use crate::table::Model;
    use crate::warning::Warning;
    use crate::Component;
    use bubbletea_rs::{KeyMsg, Msg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;
    use std::sync::{mpsc, Arc, Mutex};

    /// A host that cannot measure anything.
    struct Unmeasured;

    impl LayoutProvider for Unmeasured {
        fn row_bounds(&self, _index: usize) -> Option<Rect> {
            None
        }

        fn popover_bounds(&self) -> Option<Rect> {
            None
        }
    }

    /// A host reporting rows of unbounded width.
    struct Unbounded;

    impl LayoutProvider for Unbounded {
        fn row_bounds(&self, _index: usize) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, f64::INFINITY, 1.0))
        }

        fn popover_bounds(&self) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 10.0, 1.0))
        }
    }

    /// Rows 40 units high, 300 wide; popover 100x50.
    struct Pixels;

    impl LayoutProvider for Pixels {
        fn row_bounds(&self, index: usize) -> Option<Rect> {
            Some(Rect::new(0.0, 40.0 * index as f64, 300.0, 40.0))
        }

        fn popover_bounds(&self) -> Option<Rect> {
            Some(Rect::new(0.0, 0.0, 100.0, 50.0))
        }
    }

    type SinkLog = Arc<Mutex<Vec<Vec<Row>>>>;

    fn data() -> Vec<Row> {
        vec![
            Row::from_pairs([("a", json!(2)), ("b", json!("x"))]),
            Row::from_pairs([("a", json!(1)), ("b", json!("y"))]),
            Row::from_pairs([("a", json!(3)), ("b", json!("z"))]),
        ]
    }

    fn column(table: &Model, key: &str) -> Vec<serde_json::Value> {
        table
            .rows()
            .iter()
            .map(|r| r.get(key).cloned().unwrap_or_default())
            .collect()
    }

    fn table_with(config: Config) -> Model {
        Model::new()
            .with_config(config)
            .with_data(data())
            .with_entries_to_show(10)
            .with_active_page(1)
    }

    fn editable(send_changes: bool) -> (Model, SinkLog) {
        let log: SinkLog = Arc::default();
        let sink_log = Arc::clone(&log);
        let mut table = table_with(
            Config::new()
                .with_headers_from_data(true)
                .with_send_changes(send_changes)
                .with_options(true, true, true, true),
        )
        .with_change_sink(move |rows: &[Row]| sink_log.lock().unwrap().push(rows.to_vec()));
        table.init().unwrap();
        (table, log)
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn plain_view(table: &Model) -> String {
        strip_ansi_escapes::strip_str(table.view())
    }

    #[test]
    fn test_empty_configuration_renders_only_the_warning() {
        let mut table = table_with(Config::new());
        assert_eq!(table.init(), Err(Warning::ConfigurationMissing));
        assert_eq!(table.warning(), Some(Warning::ConfigurationMissing));
        assert!(table.headers().is_empty());
        assert!(table.rows().is_empty());

        let view = plain_view(&table);
        assert!(view.starts_with("CONFIGURATION MISSING"));
        assert!(!view.contains(" | "));
    }

    #[test]
    fn test_missing_inputs_are_reported() {
        let mut table = Model::new()
            .with_config(Config::new().with_headers_from_data(true))
            .with_data(data())
            .with_active_page(1);
        assert_eq!(table.init(), Err(Warning::EntriesToShowMissing));

        let mut table = Model::new()
            .with_config(Config::new().with_headers_from_data(true))
            .with_entries_to_show(10)
            .with_active_page(1);
        assert_eq!(table.init(), Err(Warning::DataMissing));

        let mut table = table_with(Config::new().with_headers_from_data(true).with_send_changes(true));
        assert_eq!(table.init(), Err(Warning::UpdateMissing));
    }

    #[test]
    fn test_options_without_any_allowance() {
        let mut table = table_with(
            Config::new()
                .with_headers_from_data(true)
                .with_options(true, false, false, false),
        );
        assert_eq!(table.init(), Err(Warning::AllowancesMissing));
        assert!(plain_view(&table).starts_with("OPTIONS MISSING"));
    }

    #[test]
    fn test_data_headers_and_tri_state_sort() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        assert_eq!(table.init(), Ok(()));
        assert_eq!(table.headers(), ["a", "b"]);
        assert!(table.sorters().active().is_none());

        table.sort_column("a");
        assert_eq!(column(&table, "a"), [json!(1), json!(2), json!(3)]);
        assert_eq!(table.sorters().get("a"), Some(SortOrder::Ascending));
        assert_eq!(table.sorters().get("b"), None);

        table.sort_column("a");
        assert_eq!(column(&table, "a"), [json!(3), json!(2), json!(1)]);
        assert_eq!(table.sorters().get("a"), Some(SortOrder::Descending));

        table.sort_column("a");
        assert_eq!(column(&table, "a"), [json!(1), json!(2), json!(3)]);
        assert_eq!(table.sorters().get("a"), Some(SortOrder::Ascending));

        table.sort_column("b");
        assert_eq!(table.sorters().get("a"), None);
        assert_eq!(table.sorters().active(), Some(("b", SortOrder::Ascending)));
    }

    #[test]
    fn test_unknown_sort_header_is_ignored() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        table.init().unwrap();
        table.sort_column("nope");
        assert_eq!(column(&table, "a"), [json!(2), json!(1), json!(3)]);
        assert!(table.sorters().active().is_none());
    }

    #[test]
    fn test_custom_headers_rename_keys() {
        let mut table = Model::new()
            .with_config(
                Config::new()
                    .with_headers_from_custom_headers(true)
                    .with_custom_headers([("a", "Alpha")]),
            )
            .with_data(vec![Row::from_pairs([("a", json!(1)), ("b", json!(2))])])
            .with_entries_to_show(10)
            .with_active_page(1);
        assert_eq!(table.init(), Ok(()));
        assert_eq!(table.headers(), ["Alpha", "b"]);
        assert_eq!(table.rows()[0].get("Alpha"), Some(&json!(1)));
        assert_eq!(table.rows()[0].get("b"), Some(&json!(2)));
        assert_eq!(table.rows()[0].get("a"), None);
    }

    #[test]
    fn test_initial_order_by_sorts_ascending() {
        let mut table = table_with(Config::new().with_headers_from_data(true).with_initial_order_by("a"));
        table.init().unwrap();
        assert_eq!(column(&table, "a"), [json!(1), json!(2), json!(3)]);
        assert_eq!(table.sorters().active(), Some(("a", SortOrder::Ascending)));
    }

    #[test]
    fn test_initial_order_by_on_renamed_header() {
        let mut table = table_with(
            Config::new()
                .with_headers_from_custom_headers(true)
                .with_custom_headers([("a", "Alpha")])
                .with_initial_order_by("Alpha"),
        );
        assert_eq!(table.init(), Ok(()));
        assert_eq!(table.headers(), ["Alpha", "b"]);
        assert_eq!(column(&table, "Alpha"), [json!(1), json!(2), json!(3)]);
        assert_eq!(column(&table, "b"), [json!("y"), json!("x"), json!("z")]);
        assert_eq!(table.sorters().active(), Some(("Alpha", SortOrder::Ascending)));
        assert_eq!(table.sorters().get("b"), None);
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        table.init().unwrap();
        let headers = table.headers().to_vec();
        let rows = table.rows().to_vec();

        table.sort_column("a");
        table.init().unwrap();
        assert_eq!(table.headers(), headers.as_slice());
        assert_eq!(table.rows(), rows.as_slice());
        assert!(table.sorters().active().is_none());
    }

    #[test]
    fn test_empty_data_has_no_headers() {
        let mut table = Model::new()
            .with_config(Config::new().with_headers_from_data(true))
            .with_data(Vec::new())
            .with_entries_to_show(10)
            .with_active_page(1);
        assert_eq!(table.init(), Ok(()));
        assert!(table.headers().is_empty());
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_options_require_allowance() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        table.init().unwrap();
        assert!(!table.show_options(0, &Unmeasured));
        assert!(!table.popover_visible());
    }

    #[test]
    fn test_show_options_places_popover() {
        let (mut table, _) = editable(false);
        assert!(table.show_options(2, &Pixels));
        assert_eq!(table.selected_index(), Some(2));
        let placement = table.placement().unwrap();
        assert_eq!(placement.popover, Point { left: 100.0, top: 114.0 });
        assert_eq!(placement.pointer, Point { left: 150.0, top: 101.0 });

        let session = table.session().unwrap();
        assert_eq!(session.snapshot(), &data()[2]);
        assert_eq!(session.added().get("a"), Some(&json!("")));
    }

    #[test]
    fn test_show_options_without_layout_is_unplaced() {
        let (mut table, _) = editable(false);
        assert!(table.show_options(0, &Unmeasured));
        assert!(table.popover_visible());
        assert!(table.placement().is_none());
        assert!(!table.show_options(99, &Unmeasured));
        assert_eq!(table.selected_index(), Some(0));
    }

    #[test]
    fn test_sorting_closes_options() {
        let (mut table, _) = editable(false);
        table.show_options(1, &Unmeasured);
        table.sort_column("b");
        assert!(!table.popover_visible());
    }

    #[test]
    fn test_panels_are_exclusive() {
        let (mut table, _) = editable(false);
        table.show_options(0, &Unmeasured);
        table.toggle_panel(Some(Panel::Edit));
        assert!(table.panel_visible(Panel::Edit));
        table.toggle_panel(Some(Panel::Add));
        assert!(!table.panel_visible(Panel::Edit));
        assert!(table.panel_visible(Panel::Add));
        table.toggle_panel(Some(Panel::Add));
        assert!(table.session().unwrap().panel().is_none());
    }

    #[test]
    fn test_commit_edit_replaces_row() {
        let (mut table, log) = editable(true);
        table.show_options(1, &Unmeasured);
        table.toggle_panel(Some(Panel::Edit));
        assert!(table.edit_field("b", "changed"));
        assert!(table.commit_edit());

        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1].get("b"), Some(&json!("changed")));
        assert_eq!(table.rows()[1].get("a"), Some(&json!(1)));
        assert_eq!(table.rows()[0], data()[0]);
        assert_eq!(table.rows()[2], data()[2]);
        assert_eq!(table.session().unwrap().snapshot(), &table.rows()[1]);
        assert!(table.session().unwrap().panel().is_none());

        let sent = log.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].as_slice(), table.rows());
    }

    #[test]
    fn test_commit_add_inserts_at_top() {
        let (mut table, log) = editable(true);
        table.show_options(1, &Unmeasured);
        table.toggle_panel(Some(Panel::Add));
        table.add_field("a", 9);
        assert!(table.commit_add());

        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].get("a"), Some(&json!(9)));
        assert_eq!(table.rows()[0].get("b"), Some(&json!("")));
        assert_eq!(table.selected_index(), Some(2));
        assert_eq!(table.session().unwrap().snapshot(), &data()[1]);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_commit_delete_removes_row_and_closes() {
        let (mut table, log) = editable(true);
        table.show_options(0, &Unmeasured);
        table.toggle_panel(Some(Panel::Delete));
        assert!(table.commit_delete());

        assert_eq!(table.rows().len(), 2);
        assert_eq!(column(&table, "a"), [json!(1), json!(3)]);
        assert!(!table.popover_visible());

        let sent = log.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].len(), 2);
    }

    #[test]
    fn test_changes_not_sent_when_disabled() {
        let (mut table, log) = editable(false);
        table.show_options(0, &Unmeasured);
        assert!(table.commit_delete());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_channel_sink_receives_rows() {
        let (tx, rx) = mpsc::channel::<Vec<Row>>();
        let mut table = table_with(
            Config::new()
                .with_headers_from_data(true)
                .with_send_changes(true)
                .with_options(true, false, true, false),
        )
        .with_change_sink(tx);
        table.init().unwrap();
        table.show_options(2, &Unmeasured);
        table.commit_delete();
        assert_eq!(rx.try_recv().unwrap().len(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_disallowed_panels_are_ignored() {
        let mut table = table_with(
            Config::new()
                .with_headers_from_data(true)
                .with_options(true, true, false, false),
        );
        table.init().unwrap();
        table.show_options(0, &Unmeasured);
        table.toggle_panel(Some(Panel::Delete));
        assert!(table.session().unwrap().panel().is_none());
        assert!(!table.commit_delete());
        assert!(!table.commit_add());
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn test_mutations_need_open_popover() {
        let (mut table, log) = editable(true);
        assert!(!table.edit_field("a", 1));
        assert!(!table.commit_edit());
        assert!(!table.commit_add());
        assert!(!table.commit_delete());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_update_requires_focus() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        table.init().unwrap();
        table.update(&key(KeyCode::Char('s')));
        assert!(table.sorters().active().is_none());

        table.focus();
        assert!(table.focused());
        table.update(&key(KeyCode::Char('s')));
        assert_eq!(table.sorters().active(), Some(("a", SortOrder::Ascending)));

        table.update(&key(KeyCode::Right));
        table.update(&key(KeyCode::Char('s')));
        assert_eq!(table.sorters().active(), Some(("b", SortOrder::Ascending)));

        table.blur();
        table.update(&key(KeyCode::Char('s')));
        assert_eq!(table.sorters().active(), Some(("b", SortOrder::Ascending)));
    }

    #[test]
    fn test_keyboard_delete_flow() {
        let (mut table, log) = editable(true);
        table.focus();
        table.update(&key(KeyCode::Down));
        assert_eq!(table.cursor(), 1);

        table.update(&key(KeyCode::Enter));
        assert_eq!(table.selected_index(), Some(1));
        let placement = table.placement().unwrap();
        assert_eq!(placement.pointer.top, 4.0);
        assert_eq!(placement.popover.top, 5.0);

        table.update(&key(KeyCode::Char('d')));
        assert!(table.panel_visible(Panel::Delete));
        let confirm: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
        });
        table.update(&confirm);
        assert_eq!(table.rows().len(), 2);
        assert!(!table.popover_visible());
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_escape_closes_popover() {
        let (mut table, _) = editable(false);
        table.focus();
        table.update(&key(KeyCode::Enter));
        assert!(table.popover_visible());
        table.update(&key(KeyCode::Esc));
        assert!(!table.popover_visible());
    }

    #[test]
    fn test_view_renders_headers_and_rows() {
        let mut table = table_with(Config::new().with_headers_from_data(true));
        table.init().unwrap();
        let view = plain_view(&table);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("a ⇅"));
        assert!(lines[0].contains("b ⇅"));
        assert!(lines[1].contains("-+-"));
        assert!(lines[2].contains('x'));

        table.sort_column("a");
        let view = plain_view(&table);
        assert!(view.lines().next().unwrap().contains("a ▲"));
    }

    #[test]
    fn test_view_applies_header_case() {
        let mut table = table_with(
            Config::new()
                .with_headers_from_data(true)
                .with_header_casing(true, false, false),
        );
        table.init().unwrap();
        assert_eq!(table.display_headers(), ["A", "B"]);
        assert!(plain_view(&table).lines().next().unwrap().contains("A ⇅"));
        assert_eq!(table.headers(), ["a", "b"]);
    }

    #[test]
    fn test_view_renders_popover_under_selected_row() {
        let (mut table, _) = editable(false);
        table.focus();
        table.update(&key(KeyCode::Enter));
        table.update(&key(KeyCode::Char('d')));

        let view = plain_view(&table);
        let lines: Vec<&str> = view.lines().collect();
        assert!(lines[2].starts_with("> "));
        assert_eq!(lines[3].trim(), "▲");
        assert_eq!(lines[4].trim(), "[Edit] [Delete] [Add]");
        assert_eq!(lines[5].trim(), "Do you really want to delete this entry?");
        assert_eq!(lines[6].trim(), "[Delete] [Cancel]");
    }

    #[test]
    fn test_terminal_layout_measures_button_bar() {
        let (table, _) = editable(false);
        let layout = table.terminal_layout();
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.popover_width, "[Edit] [Delete] [Add]".len());
        assert_eq!(layout.row_bounds(0).unwrap().top, 2.0);
        assert!(layout.row_bounds(3).is_none());
    }

    fn ctrl_s() -> Msg {
        Box::new(KeyMsg {
            key: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
        })
    }

    fn type_text(table: &mut Model, text: &str) {
        for c in text.chars() {
            table.update(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_keyboard_add_types_into_fields() {
        let (mut table, log) = editable(true);
        table.focus();
        table.update(&key(KeyCode::Enter));
        table.update(&key(KeyCode::Char('a')));
        assert_eq!(table.focused_field(), Some("a"));

        type_text(&mut table, "42");
        table.update(&key(KeyCode::Tab));
        assert_eq!(table.focused_field(), Some("b"));
        type_text(&mut table, "new");
        table.update(&ctrl_s());

        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.rows()[0].get("a"), Some(&json!("42")));
        assert_eq!(table.rows()[0].get("b"), Some(&json!("new")));
        let sent = log.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0][0], table.rows()[0]);
    }

    #[test]
    fn test_keyboard_edit_types_panel_keys_as_text() {
        let (mut table, _) = editable(false);
        table.focus();
        table.update(&key(KeyCode::Down));
        table.update(&key(KeyCode::Enter));
        table.update(&key(KeyCode::Char('e')));
        table.update(&key(KeyCode::BackTab));
        assert_eq!(table.focused_field(), Some("b"));

        table.update(&key(KeyCode::Backspace));
        type_text(&mut table, "dae");
        assert!(table.panel_visible(Panel::Edit));
        table.update(&ctrl_s());

        assert_eq!(table.rows()[1].get("b"), Some(&json!("dae")));
        assert_eq!(table.rows()[1].get("a"), Some(&json!(1)));
        assert_eq!(table.rows()[0], data()[0]);
        assert_eq!(table.rows()[2], data()[2]);
        assert_eq!(table.focused_field(), None);
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let (mut table, _) = editable(false);
        table.show_options(2, &Unmeasured);
        table.toggle_panel(Some(Panel::Edit));
        table.move_field(true);
        assert!(table.insert_char('é'));
        assert_eq!(table.session().unwrap().edited().get("b"), Some(&json!("zé")));
        assert!(table.delete_char());
        assert!(table.delete_char());
        assert!(table.delete_char());
        assert_eq!(table.session().unwrap().edited().get("b"), Some(&json!("")));

        table.toggle_panel(Some(Panel::Delete));
        assert!(!table.insert_char('x'));
    }

    #[test]
    fn test_view_marks_focused_field() {
        let (mut table, _) = editable(false);
        table.focus();
        table.update(&key(KeyCode::Enter));
        table.update(&key(KeyCode::Char('e')));

        let view = plain_view(&table);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[5].trim(), "> a: 2");
        assert_eq!(lines[6].trim(), "b: x");
        assert_eq!(lines[7].trim(), "[Edit] [Cancel]");
    }

    #[test]
    fn test_view_survives_unbounded_geometry() {
        let (mut table, _) = editable(false);
        assert!(table.show_options(0, &Unbounded));
        let view = plain_view(&table);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[3], "▲");
    }

    #[test]
    fn test_view_clamps_pixel_offsets_to_table_width() {
        let (mut table, _) = editable(false);
        table.show_options(2, &Pixels);
        let width = table.terminal_layout().width;

        let view = plain_view(&table);
        let pointer = view.lines().nth(5).unwrap();
        assert_eq!(pointer.trim(), "▲");
        assert_eq!(pointer.len() - pointer.trim_start().len(), width);
    }
}
