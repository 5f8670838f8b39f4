use std::ops::Deref;
use std::rc::Rc;

use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use shared::{
    SaveMode, Standard, StandardForm, StandardFormField, DEFAULT_FEE_DUE_DAY, DEFAULT_PROGRAM_FEE,
};

/// The record being edited, compared by identity rather than by value.
///
/// Handing the modal a new `SelectedStandard` re-seeds the form even when the
/// values are identical to the previous one.
#[derive(Debug, Clone)]
pub struct SelectedStandard(Rc<Standard>);

impl SelectedStandard {
    pub fn new(standard: Standard) -> Self {
        Self(Rc::new(standard))
    }
}

impl PartialEq for SelectedStandard {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SelectedStandard {
    type Target = Standard;

    fn deref(&self) -> &Standard {
        &self.0
    }
}

#[derive(Properties, PartialEq)]
pub struct EditStandardModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_save: Callback<StandardForm>,
    #[prop_or_default]
    pub selected_standard: Option<SelectedStandard>,
}

#[function_component(EditStandardModal)]
pub fn edit_standard_modal(props: &EditStandardModalProps) -> Html {
    let form = use_state(StandardForm::default);

    // Re-seed whenever a different record is handed in
    use_effect_with(props.selected_standard.clone(), {
        let form = form.clone();
        move |selected: &Option<SelectedStandard>| {
            if let Some(selected) = selected {
                form.set(StandardForm::from(selected.deref()));
            }
            || ()
        }
    });

    let on_field_change = {
        let form = form.clone();
        Callback::from(move |(field, value): (StandardFormField, String)| {
            form.set(form.with_field(field, value));
        })
    };

    let field_input = |field: StandardFormField| {
        let on_field_change = on_field_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field_change.emit((field, input.value()));
        })
    };

    let submit = {
        let form = form.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |mode: SaveMode| {
            let mut next = (*form).clone();
            if let Some(snapshot) = next.submit(mode) {
                on_save.emit(snapshot);
                if mode.resets_form() {
                    form.set(next);
                }
            }
        })
    };

    let on_save_click = {
        let submit = submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(SaveMode::Save))
    };

    let on_save_and_continue_click = {
        let submit = submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(SaveMode::SaveAndContinue))
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="edit-standard-modal-backdrop" onclick={on_backdrop_click}>
            <div class="edit-standard-modal" onclick={on_modal_click}>
                <div class="edit-standard-modal-header">
                    <h3 class="edit-standard-title">{"Edit Standard"}</h3>
                    <button
                        type="button"
                        class="edit-standard-close"
                        aria-label="Close"
                        onclick={on_close_click}
                    >
                        {"×"}
                    </button>
                </div>

                <div class="edit-standard-form">
                    <div class="form-group">
                        <label for="edit-standard-standard">{StandardFormField::Standard.label()}</label>
                        <select
                            id="edit-standard-standard"
                            class="edit-standard-select"
                            disabled=true
                        >
                            <option value={form.standard.clone()} selected=true>
                                {form.standard.clone()}
                            </option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="edit-standard-program-fee">{StandardFormField::ProgramFee.label()}</label>
                        <input
                            id="edit-standard-program-fee"
                            type="number"
                            class="edit-standard-input"
                            placeholder={DEFAULT_PROGRAM_FEE}
                            value={form.program_fee.clone()}
                            oninput={field_input(StandardFormField::ProgramFee)}
                            step="0.01"
                        />
                    </div>

                    <div class="form-group">
                        <label for="edit-standard-fee-due-day">{StandardFormField::FeeDueDay.label()}</label>
                        <input
                            id="edit-standard-fee-due-day"
                            type="number"
                            class="edit-standard-input"
                            placeholder={DEFAULT_FEE_DUE_DAY}
                            value={form.fee_due_day.clone()}
                            oninput={field_input(StandardFormField::FeeDueDay)}
                            step="1"
                        />
                    </div>

                    <div class="edit-standard-buttons">
                        <button
                            type="button"
                            class="btn btn-primary edit-standard-save"
                            onclick={on_save_click}
                        >
                            {SaveMode::Save.label()}
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary edit-standard-save-continue"
                            onclick={on_save_and_continue_click}
                        >
                            {SaveMode::SaveAndContinue.label()}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlElement, HtmlSelectElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(props: EditStandardModalProps) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        yew::Renderer::<EditStandardModal>::with_root_and_props(root.clone(), props).render();
        root
    }

    async fn settle() {
        yew::platform::time::sleep(Duration::from_millis(50)).await;
    }

    fn input_value(root: &Element, selector: &str) -> String {
        root.query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap()
            .value()
    }

    fn select_value(root: &Element) -> String {
        root.query_selector("#edit-standard-standard")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlSelectElement>()
            .unwrap()
            .value()
    }

    fn click(root: &Element, selector: &str) {
        root.query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
    }

    fn type_into(root: &Element, selector: &str, value: &str) {
        let input = root
            .query_selector(selector)
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlInputElement>()
            .unwrap();
        input.set_value(value);

        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let event = web_sys::Event::new_with_event_init_dict("input", &init).unwrap();
        input.dispatch_event(&event).unwrap();
    }

    type SelectHandle = Rc<RefCell<Option<Callback<SelectedStandard>>>>;

    #[derive(Properties, PartialEq)]
    struct SelectingHostProps {
        initial: SelectedStandard,
        select: SelectHandle,
    }

    /// Owns the selection the way a page would, so tests can hand in new records
    #[function_component(SelectingHost)]
    fn selecting_host(props: &SelectingHostProps) -> Html {
        let selected = use_state(|| props.initial.clone());

        *props.select.borrow_mut() = Some({
            let selected = selected.clone();
            Callback::from(move |next: SelectedStandard| selected.set(next))
        });

        html! {
            <EditStandardModal
                is_open=true
                on_close={Callback::noop()}
                on_save={Callback::noop()}
                selected_standard={Some((*selected).clone())}
            />
        }
    }

    #[wasm_bindgen_test]
    async fn test_new_record_identity_reseeds_edited_form() {
        let initial = grade_five(Some("15"));
        let select: SelectHandle = Rc::new(RefCell::new(None));

        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        yew::Renderer::<SelectingHost>::with_root_and_props(
            root.clone(),
            SelectingHostProps {
                initial: initial.clone(),
                select: select.clone(),
            },
        )
        .render();
        settle().await;

        type_into(&root, "#edit-standard-program-fee", "200");
        type_into(&root, "#edit-standard-fee-due-day", "20");
        settle().await;
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "200");

        // Same record again: edits survive the re-render
        let set_selected = select.borrow().clone().unwrap();
        set_selected.emit(initial.clone());
        settle().await;
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "200");
        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "20");

        // Equal values, new object: form is overwritten
        let set_selected = select.borrow().clone().unwrap();
        set_selected.emit(grade_five(Some("15")));
        settle().await;
        assert_eq!(select_value(&root), "Grade 5");
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "150");
        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "15");
    }

    #[wasm_bindgen_test]
    async fn test_editing_fee_leaves_other_fields() {
        let saved = Rc::new(RefCell::new(Vec::<StandardForm>::new()));
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: {
                let saved = saved.clone();
                Callback::from(move |form: StandardForm| saved.borrow_mut().push(form))
            },
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        type_into(&root, "#edit-standard-program-fee", "200");
        settle().await;

        assert_eq!(select_value(&root), "Grade 5");
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "200");
        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "15");

        click(&root, ".edit-standard-save-continue");
        settle().await;

        assert_eq!(
            *saved.borrow(),
            vec![StandardForm {
                standard: "Grade 5".to_string(),
                program_fee: "200".to_string(),
                fee_due_day: "15".to_string(),
            }]
        );
    }

    fn grade_five(fee_due_day: Option<&str>) -> SelectedStandard {
        SelectedStandard::new(Standard {
            standard: "Grade 5".to_string(),
            program_fee: 150.0,
            fee_due_day: fee_due_day.map(str::to_string),
        })
    }

    #[wasm_bindgen_test]
    async fn test_closed_modal_renders_nothing() {
        let root = mount(EditStandardModalProps {
            is_open: false,
            on_close: Callback::noop(),
            on_save: Callback::noop(),
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        assert!(root.query_selector(".edit-standard-modal").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    async fn test_fields_seeded_from_selected_standard() {
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: Callback::noop(),
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        assert!(root.text_content().unwrap_or_default().contains("Edit Standard"));
        assert_eq!(select_value(&root), "Grade 5");
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "150");
        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "15");
    }

    #[wasm_bindgen_test]
    async fn test_missing_fee_due_day_shows_default() {
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: Callback::noop(),
            selected_standard: Some(grade_five(None)),
        });
        settle().await;

        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "10");
    }

    #[wasm_bindgen_test]
    async fn test_save_emits_form_then_resets() {
        let saved = Rc::new(RefCell::new(Vec::<StandardForm>::new()));
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: {
                let saved = saved.clone();
                Callback::from(move |form: StandardForm| saved.borrow_mut().push(form))
            },
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        click(&root, ".edit-standard-save");
        settle().await;

        assert_eq!(saved.borrow().len(), 1);
        assert_eq!(saved.borrow()[0].program_fee, "150");
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "0.0");
        assert_eq!(input_value(&root, "#edit-standard-fee-due-day"), "10");
    }

    #[wasm_bindgen_test]
    async fn test_save_and_continue_keeps_values() {
        let saved = Rc::new(RefCell::new(Vec::<StandardForm>::new()));
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: {
                let saved = saved.clone();
                Callback::from(move |form: StandardForm| saved.borrow_mut().push(form))
            },
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        click(&root, ".edit-standard-save-continue");
        settle().await;

        assert_eq!(saved.borrow().len(), 1);
        assert_eq!(input_value(&root, "#edit-standard-program-fee"), "150");
        assert_eq!(select_value(&root), "Grade 5");
    }

    #[wasm_bindgen_test]
    async fn test_save_without_selection_is_blocked() {
        let saves = Rc::new(Cell::new(0));
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: Callback::noop(),
            on_save: {
                let saves = saves.clone();
                Callback::from(move |_: StandardForm| saves.set(saves.get() + 1))
            },
            selected_standard: None,
        });
        settle().await;

        click(&root, ".edit-standard-save");
        click(&root, ".edit-standard-save-continue");
        settle().await;

        assert_eq!(saves.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn test_dismiss_calls_close_only() {
        let closes = Rc::new(Cell::new(0));
        let saves = Rc::new(Cell::new(0));
        let root = mount(EditStandardModalProps {
            is_open: true,
            on_close: {
                let closes = closes.clone();
                Callback::from(move |_: ()| closes.set(closes.get() + 1))
            },
            on_save: {
                let saves = saves.clone();
                Callback::from(move |_: StandardForm| saves.set(saves.get() + 1))
            },
            selected_standard: Some(grade_five(Some("15"))),
        });
        settle().await;

        click(&root, ".edit-standard-close");
        settle().await;

        assert_eq!(closes.get(), 1);
        assert_eq!(saves.get(), 0);
    }
}
