//! Host-level tests: store round trips, layered menus, toggles and focus

use std::time::Duration;

use ratatui::widgets::Paragraph;
use tui_select::prelude::*;
use tui_select::testing::{click, type_text, RenderHarness, TestHarness};
use tui_select::{assert_emitted, assert_not_emitted, toggle, BLUR_CLOSE_DELAY};

#[derive(Debug)]
struct FormState {
    fruit: Selection<SelectOption<u32>>,
}

#[derive(Debug, Clone, PartialEq)]
enum FormAction {
    FruitChanged(Selection<SelectOption<u32>>),
}

impl Action for FormAction {
    fn name(&self) -> &'static str {
        match self {
            FormAction::FruitChanged(_) => "FruitChanged",
        }
    }
}

fn reducer(state: &mut FormState, action: FormAction) -> bool {
    match action {
        FormAction::FruitChanged(value) => {
            if state.fruit == value {
                return false;
            }
            state.fruit = value;
            true
        }
    }
}

fn fruit() -> Vec<SelectOption<u32>> {
    vec![
        SelectOption::new("Apple", 1),
        SelectOption::new("Banana", 2),
        SelectOption::new("Cherry", 3),
    ]
}

fn props<'a>(
    options: &'a [SelectOption<u32>],
    state: &'a FormState,
) -> SelectFieldProps<'a, SelectOption<u32>, FormAction> {
    SelectFieldProps::new(options, &state.fruit, FormAction::FruitChanged).focused(true)
}

#[test]
fn test_multi_select_round_trips_through_store() {
    let options = fruit();
    let mut harness = TestHarness::<FormState, FormAction>::new(FormState {
        fruit: Selection::empty(true),
    });
    let mut field = SelectField::new();
    let mut render = RenderHarness::new(30, 12);

    let draw = |field: &mut SelectField<SelectOption<u32>>,
                render: &mut RenderHarness,
                state: &FormState| {
        render.render_to_string_plain(|frame| {
            field.render(frame, frame.area(), props(&options, state).multiple(true));
        })
    };

    draw(&mut field, &mut render, &harness.state);
    let multi = props(&options, &harness.state).multiple(true);
    harness.emit_all(field.handle_event(&click(2, 1), multi));
    assert!(harness.reduce_emitted(reducer).is_empty());

    // Apple, then Banana
    for row in [4, 5] {
        draw(&mut field, &mut render, &harness.state);
        let multi = props(&options, &harness.state).multiple(true);
        harness.emit_all(field.handle_event(&click(2, row), multi));
        let actions = harness.reduce_emitted(reducer);
        assert_emitted!(actions, FormAction::FruitChanged(Selection::Multiple(_)));
    }

    assert_eq!(
        harness.state.fruit,
        Selection::Multiple(vec![SelectOption::new("Apple", 1), SelectOption::new("Banana", 2)])
    );
    let output = draw(&mut field, &mut render, &harness.state);
    let control = output.lines().nth(1).unwrap_or_default();
    assert!(control.contains("Apple ×"));
    assert!(control.contains("Banana ×"));

    // Remove Apple through its chip; the menu stays as it was
    let multi = props(&options, &harness.state).multiple(true);
    harness.emit_all(field.handle_event(&click(8, 1), multi));
    let actions = harness.reduce_emitted(reducer);
    assert_eq!(
        actions,
        vec![FormAction::FruitChanged(Selection::Multiple(vec![
            SelectOption::new("Banana", 2)
        ]))]
    );
    assert!(field.is_open());
}

#[test]
fn test_single_select_through_store() {
    let options = fruit();
    let mut store = Store::new(
        FormState {
            fruit: Selection::Single(None),
        },
        reducer,
    );
    let mut field = SelectField::new();
    let mut render = RenderHarness::new(30, 12);

    render.render(|frame| field.render(frame, frame.area(), props(&options, store.state())));
    let actions: Vec<_> = field
        .handle_event(&click(2, 1), props(&options, store.state()))
        .into_iter()
        .collect();
    assert_not_emitted!(actions, FormAction::FruitChanged(_));

    render.render(|frame| field.render(frame, frame.area(), props(&options, store.state())));
    let actions: Vec<_> = field
        .handle_event(&click(2, 6), props(&options, store.state()))
        .into_iter()
        .collect();
    assert_eq!(actions.len(), 1);
    for action in actions {
        assert!(store.dispatch(action));
    }

    assert_eq!(store.state().fruit.single().map(|o| o.value), Some(3));
    assert!(!field.is_open());
    let output = render.render_to_string_plain(|frame| {
        field.render(frame, frame.area(), props(&options, store.state()));
    });
    assert!(output.lines().nth(1).unwrap_or_default().contains("Cherry"));
}

#[test]
fn test_toggles_loaded_from_json_enable_search() {
    let toggles: FeatureToggles =
        serde_json::from_str(r#"{ "searchable": true, "dark_mode": true }"#).unwrap();
    assert_eq!(toggles.lookup(toggle::SEARCHABLE), Some(true));

    let options = fruit();
    let state = FormState {
        fruit: Selection::Single(None),
    };
    let mut field = SelectField::new();
    let mut render = RenderHarness::new(30, 12);
    let toggled = || props(&options, &state).feature_toggles(&toggles);

    render.render(|frame| field.render(frame, frame.area(), toggled()));
    let _: Vec<_> = field.handle_event(&click(2, 1), toggled()).into_iter().collect();
    for event in type_text("err") {
        let _: Vec<_> = field.handle_event(&event, toggled()).into_iter().collect();
    }

    let output =
        render.render_to_string_plain(|frame| field.render(frame, frame.area(), toggled()));
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[4].contains("err"));
    assert!(lines[5].contains("Cherry"));
    assert!(!output.contains("Apple"));
}

#[test]
fn test_portal_menu_covers_content_below() {
    let options = fruit();
    let state = FormState {
        fruit: Selection::Single(None),
    };
    let mut field = SelectField::new();
    let mut render = RenderHarness::new(30, 10);
    let control = Rect::new(0, 0, 30, 3);

    let mut draw = |field: &mut SelectField<SelectOption<u32>>| {
        render.render_to_string_plain(|frame| {
            let filler = vec![Line::from("x".repeat(30)); 10];
            frame.render_widget(Paragraph::new(filler), frame.area());

            let mut layers = LayerStack::new();
            field.render(
                frame,
                control,
                props(&options, &state).use_portal(true).portal(&mut layers),
            );
            layers.flush(frame);
        })
    };

    draw(&mut field);
    let _: Vec<_> = field
        .handle_event(&click(2, 1), props(&options, &state).use_portal(true))
        .into_iter()
        .collect();

    let output = draw(&mut field);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[4], "│Apple                       │");
    assert_eq!(lines[6], "│Cherry                      │");
    assert_eq!(lines[8], "x".repeat(30));
}

#[test]
fn test_portal_menu_flips_above_at_bottom_edge() {
    let options = fruit();
    let state = FormState {
        fruit: Selection::Single(None),
    };
    let mut field = SelectField::new();
    let mut render = RenderHarness::new(30, 10);
    let control = Rect::new(0, 7, 30, 3);

    let mut draw = |field: &mut SelectField<SelectOption<u32>>| {
        render.render_to_string_plain(|frame| {
            let mut layers = LayerStack::new();
            field.render(
                frame,
                control,
                props(&options, &state).use_portal(true).portal(&mut layers),
            );
            layers.flush(frame);
        })
    };

    draw(&mut field);
    let _: Vec<_> = field
        .handle_event(&click(2, 8), props(&options, &state).use_portal(true))
        .into_iter()
        .collect();

    let output = draw(&mut field);
    let lines: Vec<&str> = output.lines().collect();
    // Menu occupies rows 2..7, directly above the control
    assert!(lines[3].contains("Apple"));
    assert!(lines[5].contains("Cherry"));

    let actions: Vec<_> = field
        .handle_event(&click(2, 4), props(&options, &state).use_portal(true))
        .into_iter()
        .collect();
    assert_eq!(
        actions,
        vec![FormAction::FruitChanged(Selection::Single(Some(SelectOption::new("Banana", 2))))]
    );
}

#[tokio::test(start_paused = true)]
async fn test_focus_moving_to_another_field_closes_menu() {
    const FIRST: ComponentId = ComponentId(0);
    const SECOND: ComponentId = ComponentId(1);

    let options = fruit();
    let first_state = FormState {
        fruit: Selection::Single(None),
    };
    let second_state = FormState {
        fruit: Selection::Single(None),
    };
    let mut first = SelectField::new();
    let mut second = SelectField::new();
    let mut ctx = EventContext::new();
    let mut render = RenderHarness::new(30, 14);
    let first_area = Rect::new(0, 0, 30, 10);
    let second_area = Rect::new(0, 10, 30, 3);
    ctx.set_component_area(FIRST, first_area);
    ctx.set_component_area(SECOND, second_area);

    let mut step = |event: EventKind,
                    first: &mut SelectField<SelectOption<u32>>,
                    second: &mut SelectField<SelectOption<u32>>,
                    ctx: &mut EventContext| {
        if let Some(pos) = event.left_click() {
            ctx.focus_at(pos.x, pos.y);
        }
        let first_props = || props(&options, &first_state).focused(ctx.is_focused(FIRST));
        let second_props = || props(&options, &second_state).focused(ctx.is_focused(SECOND));

        let a: Vec<_> = first.handle_event(&event, first_props()).into_iter().collect();
        let b: Vec<_> = second.handle_event(&event, second_props()).into_iter().collect();
        render.render(|frame| {
            first.render(frame, first_area, first_props());
            second.render(frame, second_area, second_props());
        });
        assert!(a.is_empty() && b.is_empty());
    };

    step(EventKind::Tick, &mut first, &mut second, &mut ctx);
    step(click(2, 1), &mut first, &mut second, &mut ctx);
    assert!(first.is_open());

    // Clicking the second control focuses it and opens its menu
    step(click(2, 11), &mut first, &mut second, &mut ctx);
    assert!(second.is_open());
    assert!(first.is_open());
    assert!(first.is_close_pending());

    tokio::time::advance(BLUR_CLOSE_DELAY - Duration::from_millis(1)).await;
    step(EventKind::Tick, &mut first, &mut second, &mut ctx);
    assert!(first.is_open());

    tokio::time::advance(Duration::from_millis(1)).await;
    step(EventKind::Tick, &mut first, &mut second, &mut ctx);
    assert!(!first.is_open());
    assert!(second.is_open());
}
