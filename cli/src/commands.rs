//! Line commands understood by the driver and their effect on the session.

use std::fmt::Write as _;

use anyhow::{Result, anyhow, bail};
use medalliance_engine::App;
use medalliance_types::{FieldKey, FilterCategory, FilterValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Toggle(FilterCategory),
    Options,
    Select(String),
    Clear,
    Edit(FieldKey),
    Set(FieldKey, String),
    Blur,
    Save,
    Cancel,
    Dismiss,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open | close              show or hide the filter panel
  toggle <category>         expand or collapse a filter row
  options                   list options for the expanded row
  select <label>            pick an option for the active row
  clear                     reset every filter
  edit <field>              open a profile field
  set <field> <text>        type into a field
  blur | save               commit the open field
  cancel                    abandon the open edit
  dismiss                   clear the error banner
  status                    print the session state
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb.to_ascii_lowercase().as_str() {
            "open" => Command::Open,
            "close" => Command::Close,
            "toggle" => Command::Toggle(parse_category(rest)?),
            "options" => Command::Options,
            "select" => {
                if rest.is_empty() {
                    bail!("select needs an option label");
                }
                Command::Select(rest.to_string())
            }
            "clear" => Command::Clear,
            "edit" => Command::Edit(parse_field(rest)?),
            "set" => {
                let (field, text) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, text)| (field, text.trim()));
                Command::Set(parse_field(field)?, text.to_string())
            }
            "blur" => Command::Blur,
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "dismiss" => Command::Dismiss,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command `{other}` (try `help`)"),
        };
        Ok(command)
    }
}

fn parse_category(raw: &str) -> Result<FilterCategory> {
    FilterCategory::parse(raw).ok_or_else(|| anyhow!("unknown filter category `{raw}`"))
}

fn parse_field(raw: &str) -> Result<FieldKey> {
    FieldKey::parse(raw).ok_or_else(|| anyhow!("unknown profile field `{raw}`"))
}

/// Apply `command` to the session and return the text to print.
pub async fn execute(app: &mut App, command: Command) -> String {
    match command {
        Command::Open => {
            app.open_filters();
            "filter panel open".to_string()
        }
        Command::Close => {
            app.close_filters();
            "filter panel closed".to_string()
        }
        Command::Toggle(category) => {
            app.expand_category(category).await;
            match app.filters().expansion().expanded_category() {
                Some(expanded) => format!("{} expanded", expanded.label()),
                None => format!("{} collapsed", category.label()),
            }
        }
        Command::Options => render_options(app),
        Command::Select(label) => {
            app.select_option(&label);
            render_filters(app)
        }
        Command::Clear => {
            app.clear_filters();
            "filters cleared".to_string()
        }
        Command::Edit(field) => {
            if app.open_field(field).await {
                render_field(app, field)
            } else {
                render_status(app)
            }
        }
        Command::Set(field, text) => {
            app.set_field_value(field, text);
            render_field(app, field)
        }
        Command::Blur => {
            app.blur().await;
            render_status(app)
        }
        Command::Save => {
            app.save().await;
            render_status(app)
        }
        Command::Cancel => {
            app.cancel_edit();
            render_status(app)
        }
        Command::Dismiss => {
            app.clear_error();
            render_status(app)
        }
        Command::Status => render_status(app),
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}

fn render_options(app: &mut App) -> String {
    let current = FilterValue::new(app.selection().current_value());
    let options = app.options();
    if options.is_empty() {
        return "no options".to_string();
    }
    let mut out = String::new();
    for label in options {
        let marker = if current.matches_label(label) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} {label}");
    }
    out.trim_end().to_string()
}

fn render_filters(app: &App) -> String {
    let criteria = app.filters().criteria();
    let active: Vec<String> = criteria
        .active()
        .map(|(category, value)| format!("{category}={}", value.as_str()))
        .collect();
    if active.is_empty() {
        "filters: none".to_string()
    } else {
        format!("filters: {}", active.join(", "))
    }
}

fn render_field(app: &App, field: FieldKey) -> String {
    let mut out = format!("{}: {}", field.label(), app.form().value(field));
    if let Some(error) = app.form().error(field) {
        let _ = write!(out, "  [{error}]");
    }
    let choices = app.picker_options(field);
    if !choices.is_empty() {
        let labels: Vec<&str> = choices.iter().collect();
        let _ = write!(out, "\n  choices: {}", labels.join(", "));
    }
    out
}

pub fn render_status(app: &App) -> String {
    let filters = app.filters();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "panel: {}",
        if filters.is_panel_open() { "open" } else { "closed" }
    );
    if let Some(category) = filters.expansion().expanded_category() {
        let _ = writeln!(out, "expanded: {}", category.label());
    }
    let _ = writeln!(out, "active filters: {}", filters.active_filter_count());
    let _ = writeln!(out, "{}", render_filters(app));
    match app.active_field() {
        Some(field) => {
            let _ = writeln!(out, "editing {}", render_field(app, field));
        }
        None => {
            let _ = writeln!(out, "editing: nothing");
        }
    }
    for (field, message) in app.form().errors() {
        let _ = writeln!(out, "invalid {field}: {message}");
    }
    if let Some(error) = app.error() {
        let _ = writeln!(out, "error: {error}");
    }
    if let Some(message) = app.success_message() {
        let _ = writeln!(out, "{message}");
    }
    out.trim_end().to_string()
}
