// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the Thicket state machines through scripted sessions and prints
//! what a host would render after each step.
//!
//! Set `RUST_LOG=trace` to see every transition.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use thicket_aria::{Key, KeyEvent, Props, SequentialIds};
use thicket_combobox::{
    ComboboxButton, ComboboxConfig, ComboboxEvent, ComboboxHandle, ComboboxInput, ComboboxLabel,
    ComboboxOption, ComboboxOptions, OptionData, Value,
};
use thicket_disclosure::{Popover, PopoverConfig, Tabs, TabsConfig};

const PEOPLE: [&str; 5] = [
    "Wade Cooper",
    "Arlene Mccoy",
    "Devon Webb",
    "Tom Cook",
    "Tanya Fox",
];

fn render(props: &Props) -> String {
    props
        .iter()
        .map(|attr| format!("{}=\"{}\"", attr.name(), attr.value()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn combobox_session() -> Result<(), thicket_aria::MissingAncestor> {
    println!("== combobox ==");
    let mut ids = SequentialIds::new("demo");
    let combobox: ComboboxHandle<&'static str> = Rc::new(RefCell::new(
        thicket_combobox::Combobox::new(
            ComboboxConfig::default().with_nullable(true),
            Value::Single(None),
            &mut ids,
        ),
    ));

    let _label = ComboboxLabel::new(Some(&combobox), &mut ids)?;
    let input = ComboboxInput::new(Some(&combobox))?;
    let button = ComboboxButton::new(Some(&combobox))?;
    let list = ComboboxOptions::new(Some(&combobox))?;
    let options = PEOPLE
        .iter()
        .map(|&name| {
            ComboboxOption::new(
                Some(&combobox),
                OptionData::new(name).with_label(name),
                &mut ids,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let show = |step: &str, options: &[ComboboxOption<&'static str>]| {
        println!("-- {step}");
        println!("<input {} value=\"{}\">", render(&input.props()), input.text());
        println!("<button {}>", render(&button.props()));
        if list.is_visible() {
            println!("<ul {}>", render(&list.props()));
            for option in options {
                if let Some(props) = option.props() {
                    println!("  <li {}>", render(&props));
                }
            }
        }
        for event in combobox.borrow_mut().take_events() {
            match event {
                ComboboxEvent::Change(value) => println!("   change -> {value:?}"),
                ComboboxEvent::QueryChange(query) => println!("   query -> {query:?}"),
                ComboboxEvent::Focus(part) => println!("   focus -> {part:?}"),
            }
        }
    };

    show("initial", &options);

    if input.keydown(Key::ArrowDown.into()).is_handled() {
        combobox.borrow_mut().run_deferred();
    }
    show("ArrowDown opens and highlights the first person", &options);

    for (time, ch) in [(0, 't'), (80, 'a')] {
        list.keydown(KeyEvent::new(Key::Character(ch)).at(time));
    }
    show("typing \"ta\" jumps to Tanya Fox", &options);

    input.keydown(Key::Enter.into());
    show("Enter commits", &options);

    input.change("");
    show("clearing the text clears the nullable value", &options);

    options[2].pointer_move();
    options[2].click();
    show("pointer picks Devon Webb", &options);

    drop(options);
    show("options unmounted", &[]);
    Ok(())
}

fn tabs_session() {
    println!("== tabs ==");
    let mut ids = SequentialIds::new("demo");
    let mut tabs = Tabs::new(TabsConfig::default(), &mut ids);
    for disabled in [false, true, false] {
        tabs.add_tab(disabled, &mut ids);
    }
    tabs.tab_keydown(0, Key::ArrowRight.into());
    println!("ArrowRight skips the disabled tab: {:?}", tabs.selected_index());
    tabs.tab_keydown(2, Key::ArrowRight.into());
    println!("and wraps around: {:?}", tabs.selected_index());
    println!("events: {:?}", tabs.take_events());
}

fn popover_session() {
    println!("== popover ==");
    let mut popover = Popover::new(PopoverConfig::default(), &mut SequentialIds::new("demo"));
    popover.set_button_rect(Some(Rect::new(10.0, 10.0, 90.0, 34.0)));
    popover.set_panel_rect(Some(Rect::new(10.0, 40.0, 310.0, 240.0)));
    popover.button_click();
    println!("open: {}", popover.is_open());
    popover.pointer_down(Point::new(100.0, 100.0));
    println!("press inside panel, open: {}", popover.is_open());
    popover.pointer_down(Point::new(500.0, 20.0));
    println!("press outside, open: {}", popover.is_open());
    println!("events: {:?}", popover.take_events());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(err) = combobox_session() {
        tracing::error!(%err, "combobox demo aborted");
    }
    tabs_session();
    popover_session();
}
