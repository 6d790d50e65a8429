//! Document store mutation tests: structural operations, property edits,
//! and the invariants that must hold after every one of them.

use pagecraft_editor::{DocumentStore, PropsPatch, SectionFilter, SectionType};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Bijection between order and key set, and order fields 0..n in order
/// sequence.
fn assert_invariants(store: &DocumentStore) {
    let doc = store.document();

    let order_set: HashSet<&String> = doc.section_order.iter().collect();
    assert_eq!(
        order_set.len(),
        doc.section_order.len(),
        "duplicate ids in section order"
    );
    let key_set: HashSet<&String> = doc.sections.keys().collect();
    assert_eq!(order_set, key_set, "order/sections bijection broken");

    for (index, id) in doc.section_order.iter().enumerate() {
        assert_eq!(doc.sections[id].order, index, "stale order field for {id}");
    }
}

#[test]
fn add_section_appends_merges_defaults_and_selects() {
    let mut store = DocumentStore::new();
    let hero = store.add_section(SectionType::Hero, PropsPatch::default());
    let cta = store.add_section(SectionType::Cta, PropsPatch::default());

    assert_eq!(store.section_count(), 2);
    assert_eq!(store.selected_section_id(), Some(cta.as_str()));
    assert_eq!(store.document().position(&hero), Some(0));
    assert_eq!(store.document().position(&cta), Some(1));

    // Type defaults are merged in.
    let hero_section = store.section(&hero).unwrap();
    assert_eq!(hero_section.props.title.as_deref(), Some("Welcome to Our Website"));
    assert_eq!(hero_section.props.background_color.as_deref(), Some("#000000"));

    assert_invariants(&store);
}

#[test]
fn add_section_sanitizes_caller_props() {
    let mut store = DocumentStore::new();
    let id = store.add_section(
        SectionType::Hero,
        PropsPatch {
            title: Some("<script>alert(1)</script>Launch".to_string()),
            background_color: Some("expression(alert(1))".to_string()),
            button_link: Some("javascript:alert(1)".to_string()),
            ..Default::default()
        },
    );

    let section = store.section(&id).unwrap();
    assert_eq!(section.props.title.as_deref(), Some("Launch"));
    assert_eq!(section.props.background_color.as_deref(), Some("#000000"));
    assert_eq!(section.props.button_link.as_deref(), Some(""));
}

#[test]
fn update_section_merges_partial_edit() {
    let mut store = DocumentStore::new();
    let id = store.add_section(SectionType::Cta, PropsPatch::default());

    store.update_section(
        &id,
        PropsPatch {
            title: Some("New headline".to_string()),
            ..Default::default()
        },
    );

    let section = store.section(&id).unwrap();
    assert_eq!(section.props.title.as_deref(), Some("New headline"));
    // Omitted fields keep the type default.
    assert_eq!(
        section.props.subtitle.as_deref(),
        Some("Join thousands of satisfied customers today")
    );
}

#[test]
fn update_missing_id_is_a_noop() {
    let mut store = DocumentStore::new();
    store.add_section(SectionType::Hero, PropsPatch::default());
    let before = store.document().clone();

    store.update_section(
        "ghost",
        PropsPatch {
            title: Some("nope".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(store.document(), &before);
}

#[test]
fn remove_section_clears_selection_and_renumbers() {
    let mut store = DocumentStore::new();
    let a = store.add_section(SectionType::Hero, PropsPatch::default());
    let b = store.add_section(SectionType::Cta, PropsPatch::default());
    let c = store.add_section(SectionType::Footer, PropsPatch::default());

    store.select_section(Some(b.clone()));
    store.remove_section(&b);

    assert_eq!(store.section_count(), 2);
    assert_eq!(store.selected_section_id(), None);
    assert_eq!(store.section(&a).unwrap().order, 0);
    assert_eq!(store.section(&c).unwrap().order, 1);
    assert_invariants(&store);
}

#[test]
fn remove_missing_id_is_a_noop() {
    let mut store = DocumentStore::new();
    store.add_section(SectionType::Hero, PropsPatch::default());

    store.remove_section("ghost");
    assert_eq!(store.section_count(), 1);
    assert_invariants(&store);
}

#[test]
fn duplicate_section_copies_props_under_fresh_id() {
    let mut store = DocumentStore::new();
    let original = store.add_section(
        SectionType::Hero,
        PropsPatch {
            title: Some("Keep me".to_string()),
            ..Default::default()
        },
    );

    let copy = store.duplicate_section(&original).unwrap();

    assert_ne!(copy, original);
    assert_eq!(store.section_count(), 2);
    assert_eq!(store.selected_section_id(), Some(copy.as_str()));
    assert_eq!(store.document().position(&copy), Some(1));

    let copied = store.section(&copy).unwrap();
    assert_eq!(copied.props.title.as_deref(), Some("Keep me"));
    assert_eq!(copied.props.id, copy);
    assert_invariants(&store);
}

#[test]
fn duplicate_missing_id_is_a_noop() {
    let mut store = DocumentStore::new();
    assert_eq!(store.duplicate_section("ghost"), None);
    assert_eq!(store.section_count(), 0);
}

#[test]
fn move_section_has_splice_semantics() {
    let mut store = DocumentStore::new();
    let a = store.add_section(SectionType::Hero, PropsPatch::default());
    let b = store.add_section(SectionType::Cta, PropsPatch::default());
    let c = store.add_section(SectionType::Footer, PropsPatch::default());

    // [A, B, C] -> remove A, reinsert at 2 -> [B, C, A], not a swap.
    store.move_section(0, 2);

    assert_eq!(store.document().section_order, vec![b, c, a]);
    assert_invariants(&store);
}

#[test]
fn move_section_out_of_bounds_is_a_noop() {
    let mut store = DocumentStore::new();
    store.add_section(SectionType::Hero, PropsPatch::default());
    let before = store.document().clone();

    store.move_section(5, 0);
    assert_eq!(store.document(), &before);
}

#[test]
fn move_up_and_down_swap_neighbors_and_stop_at_boundaries() {
    let mut store = DocumentStore::new();
    let a = store.add_section(SectionType::Hero, PropsPatch::default());
    let b = store.add_section(SectionType::Cta, PropsPatch::default());

    store.move_section_up(&a); // already at top
    assert_eq!(store.document().section_order, vec![a.clone(), b.clone()]);

    store.move_section_down(&a);
    assert_eq!(store.document().section_order, vec![b.clone(), a.clone()]);

    store.move_section_down(&a); // already at bottom
    assert_eq!(store.document().section_order, vec![b, a]);
    assert_invariants(&store);
}

#[test]
fn reorder_sections_recomputes_order_fields() {
    let mut store = DocumentStore::new();
    let a = store.add_section(SectionType::Hero, PropsPatch::default());
    let b = store.add_section(SectionType::Cta, PropsPatch::default());
    let c = store.add_section(SectionType::Footer, PropsPatch::default());

    store.reorder_sections(vec![c.clone(), a.clone(), b.clone()]);

    assert_eq!(store.document().section_order, vec![c.clone(), a.clone(), b.clone()]);
    assert_eq!(store.section(&c).unwrap().order, 0);
    assert_eq!(store.section(&a).unwrap().order, 1);
    assert_eq!(store.section(&b).unwrap().order, 2);
    assert_invariants(&store);
}

#[test]
fn reorder_skips_unknown_ids_and_keeps_omitted_ones() {
    let mut store = DocumentStore::new();
    let a = store.add_section(SectionType::Hero, PropsPatch::default());
    let b = store.add_section(SectionType::Cta, PropsPatch::default());

    // Unknown id ignored; omitted `a` retained at the end.
    store.reorder_sections(vec!["ghost".to_string(), b.clone()]);

    assert_eq!(store.document().section_order, vec![b, a]);
    assert_invariants(&store);
}

#[test]
fn clear_all_sections_resets_to_empty() {
    let mut store = DocumentStore::new();
    store.add_section(SectionType::Hero, PropsPatch::default());
    store.add_section(SectionType::Footer, PropsPatch::default());

    store.clear_all_sections();

    assert_eq!(store.section_count(), 0);
    assert_eq!(store.selected_section_id(), None);
    assert_invariants(&store);
}

#[test]
fn filtered_sections_respect_the_view_filter() {
    let mut store = DocumentStore::new();
    store.add_section(SectionType::Hero, PropsPatch::default());
    store.add_section(SectionType::Cta, PropsPatch::default());
    store.add_section(SectionType::Hero, PropsPatch::default());

    store.set_section_filter(SectionFilter::Hero);
    assert_eq!(store.filtered_sections().len(), 2);

    store.set_section_filter(SectionFilter::Footer);
    assert_eq!(store.filtered_sections().len(), 0);

    store.set_section_filter(SectionFilter::All);
    assert_eq!(store.filtered_sections().len(), 3);
}

#[test]
fn listeners_fire_on_commits_only() {
    let mut store = DocumentStore::new();
    let calls = Rc::new(RefCell::new(0usize));
    let observed = Rc::clone(&calls);
    store.subscribe(move |_doc| {
        *observed.borrow_mut() += 1;
    });

    let id = store.add_section(SectionType::Hero, PropsPatch::default());
    assert_eq!(*calls.borrow(), 1);

    // Presentation-state changes do not notify.
    store.select_section(None);
    store.set_section_filter(SectionFilter::Cta);
    assert_eq!(*calls.borrow(), 1);

    // Neither do no-op mutations.
    store.update_section(&id, PropsPatch::default());
    store.remove_section("ghost");
    assert_eq!(*calls.borrow(), 1);

    store.remove_section(&id);
    assert_eq!(*calls.borrow(), 2);
}
