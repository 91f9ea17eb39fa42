//! Interactive lab session
//!
//! A `Session` owns the data set being edited, the file it persists to and
//! the analysis configuration. The menu loop borrows it for every action;
//! there is no other session state.
//!
//! Input and output are generic so the whole loop can be driven from tests.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::plot::{PlotKind, PlotSeries};
use crate::record::MeasurementRecord;
use crate::record_set::RecordSet;
use crate::report::{gravity_text, record_rows, records_text, FitReport};
use crate::table::TableStore;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

const BANNER: &str = "----Pendulum Lab Data Processing Tool----";

const MENU: &str = "Choose the following options: \n\
1 - Add new data \n\
21 - Plot current data set with l vs T \n\
22 - Plot current data set with sqrt(l) vs T \n\
3 - Save the data set and exit \n\
4 - List records \n\
5 - Fit and chi-squared report \n\
6 - Confidence interval for g \n\
7 - Delete a record \n\
8 - Sort records by length \n\
0 - Exit without saving \n\
Your choice: ";

/// The data set being edited and where it is saved
#[derive(Debug)]
pub struct Session {
    records: RecordSet,
    store: TableStore,
    config: AnalysisConfig,
}

impl Session {
    /// Start an empty data set named `name` stored in `data_dir`
    pub fn create(name: &str, data_dir: &Path, config: AnalysisConfig) -> Self {
        let store = TableStore::for_data_set(data_dir, name, config.precision);
        info!(data_set = name, path = %store.path().display(), "created data set");
        Self {
            records: RecordSet::new(name),
            store,
            config,
        }
    }

    /// Load the data set `name` from `data_dir`
    pub fn open(name: &str, data_dir: &Path, config: AnalysisConfig) -> Result<Self> {
        let store = TableStore::for_data_set(data_dir, name, config.precision);
        let records = store.load(name)?;
        Ok(Self {
            records,
            store,
            config,
        })
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordSet {
        &mut self.records
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.records)
    }
}

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddData,
    PlotLengthVsPeriod,
    PlotSqrtLengthVsPeriod,
    SaveAndExit,
    ListRecords,
    FitReport,
    GravityInterval,
    DeleteRecord,
    SortByLength,
    QuitWithoutSaving,
}

impl MenuAction {
    /// Parse the menu code typed by the user
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuAction::AddData),
            "21" => Some(MenuAction::PlotLengthVsPeriod),
            "22" => Some(MenuAction::PlotSqrtLengthVsPeriod),
            "3" => Some(MenuAction::SaveAndExit),
            "4" => Some(MenuAction::ListRecords),
            "5" => Some(MenuAction::FitReport),
            "6" => Some(MenuAction::GravityInterval),
            "7" => Some(MenuAction::DeleteRecord),
            "8" => Some(MenuAction::SortByLength),
            "0" => Some(MenuAction::QuitWithoutSaving),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(SessionOutcome),
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved,
    Discarded,
}

/// Line-oriented prompt/response channel
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `text` and read one line; `None` at end of input
    pub fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Ask whether to create or open a data set, as the legacy tool did
///
/// Returns `None` if input ends before a data set is chosen.
pub fn start_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_dir: &Path,
    config: &AnalysisConfig,
) -> io::Result<Option<Session>> {
    console.say(BANNER)?;

    loop {
        let choice = match console.prompt(
            "Choose the following options: \n1 - Create a new data set \n2 - Open an existing data set \nYour choice: ",
        )? {
            Some(choice) => choice,
            None => return Ok(None),
        };

        match choice.as_str() {
            "1" => {
                let Some(name) = prompt_name(console, "Name the new data set: ")? else {
                    return Ok(None);
                };
                let session = Session::create(&name, data_dir, config.clone());
                console.say(&format!("You created a new data set called {}", name))?;
                return Ok(Some(session));
            }
            "2" => {
                let Some(name) =
                    prompt_name(console, "Enter the name of the existing data set: ")?
                else {
                    return Ok(None);
                };
                match Session::open(&name, data_dir, config.clone()) {
                    Ok(session) => {
                        console
                            .say("The data set has been successfully loaded from CSV file.")?;
                        return Ok(Some(session));
                    }
                    Err(e) => {
                        warn!(data_set = %name, error = %e, "failed to open data set");
                        console.say(&format!("Could not open data set '{}': {}", name, e))?;
                    }
                }
            }
            other => console.say(&format!("Unknown option '{}'", other))?,
        }
    }
}

fn prompt_name<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    text: &str,
) -> io::Result<Option<String>> {
    loop {
        match console.prompt(text)? {
            None => return Ok(None),
            Some(name) if name.is_empty() => console.say("The name cannot be empty.")?,
            Some(name) => return Ok(Some(name)),
        }
    }
}

/// Run the menu until the user saves, quits, or input ends
pub fn run_menu<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> io::Result<SessionOutcome> {
    loop {
        let Some(choice) = console.prompt(MENU)? else {
            return Ok(SessionOutcome::Discarded);
        };

        let Some(action) = MenuAction::parse(&choice) else {
            console.say(&format!("Unknown option '{}'", choice))?;
            continue;
        };

        if let Flow::Exit(outcome) = perform(action, session, console)? {
            return Ok(outcome);
        }
    }
}

/// Carry out one menu action
///
/// Failures of the action itself are reported and the session continues;
/// only console I/O errors are returned.
pub fn perform<R: BufRead, W: Write>(
    action: MenuAction,
    session: &mut Session,
    console: &mut Console<R, W>,
) -> io::Result<Flow> {
    match action {
        MenuAction::AddData => add_data(session, console)?,
        MenuAction::PlotLengthVsPeriod => show_plot(session, console, PlotKind::LengthVsPeriod)?,
        MenuAction::PlotSqrtLengthVsPeriod => {
            show_plot(session, console, PlotKind::SqrtLengthVsPeriod)?
        }
        MenuAction::SaveAndExit => match session.save() {
            Ok(()) => {
                console.say("File has been successfully saved.")?;
                return Ok(Flow::Exit(SessionOutcome::Saved));
            }
            Err(e) => {
                warn!(path = %session.store().path().display(), error = %e, "save failed");
                console.say(&format!("Could not save data set: {}", e))?;
            }
        },
        MenuAction::ListRecords => {
            console.say(records_text(&record_rows(session.records())).trim_end())?
        }
        MenuAction::FitReport => match FitReport::build(session.records(), session.config()) {
            Ok(report) => console.say(report.to_text().trim_end())?,
            Err(e) => console.say(&format!("Fit unavailable: {}", e))?,
        },
        MenuAction::GravityInterval => {
            let level = session.config().confidence_level;
            match session.records().g_confidence_interval(level) {
                Ok(estimate) => console.say(gravity_text(&estimate).trim_end())?,
                Err(e) => console.say(&format!("g interval unavailable: {}", e))?,
            }
        }
        MenuAction::DeleteRecord => delete_record(session, console)?,
        MenuAction::SortByLength => {
            session.records_mut().sort_by_length();
            console.say("Records sorted by length.")?;
        }
        MenuAction::QuitWithoutSaving => {
            console.say("Exiting without saving.")?;
            return Ok(Flow::Exit(SessionOutcome::Discarded));
        }
    }
    Ok(Flow::Continue)
}

/// Parse a positive-or-zero finite number typed by the user
fn parse_input_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse a strictly positive finite number typed by the user
fn parse_input_positive(text: &str) -> Option<f64> {
    parse_input_number(text).filter(|v| *v > 0.0)
}

/// Parse comma-separated trial readings
fn parse_input_trials(text: &str) -> Option<Vec<f64>> {
    text.split(',').map(parse_input_number).collect()
}

fn add_data<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    console.say("You initiated a new data.")?;

    let Some(length) = console.prompt("Enter the length in cm: ")? else {
        return Ok(());
    };
    let Some(length) = parse_input_positive(&length) else {
        return console.say(&format!("Invalid length '{}'. Data not saved.", length));
    };

    let Some(trials) = console.prompt("Enter the trials in s, separate by \",\": ")? else {
        return Ok(());
    };
    let Some(trials) = parse_input_trials(&trials) else {
        return console.say(&format!("Invalid trials '{}'. Data not saved.", trials));
    };

    let Some(periods) = console.prompt("Enter the number of periods: ")? else {
        return Ok(());
    };
    let Some(period_count) = parse_input_positive(&periods) else {
        return console.say(&format!("Invalid number of periods '{}'. Data not saved.", periods));
    };

    let confirm = console.prompt("Do you want to add this data? (y/n) ")?;
    if confirm.as_deref() == Some("y") {
        session
            .records_mut()
            .push(MeasurementRecord::new(length, trials, period_count));
        info!(length, period_count, records = session.records().len(), "record added");
        console.say("Data has been saved.")
    } else {
        console.say("Data not saved.")
    }
}

fn delete_record<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    if session.records().is_empty() {
        return console.say("No records to delete.");
    }

    let Some(input) = console.prompt("Enter the record number to delete: ")? else {
        return Ok(());
    };

    let removed = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| session.records_mut().remove(index));

    match removed {
        Some(record) => console.say(&format!(
            "Deleted record {} (length {} cm).",
            input, record.length
        )),
        None => console.say(&format!("No record numbered '{}'.", input)),
    }
}

fn show_plot<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    kind: PlotKind,
) -> io::Result<()> {
    let series = PlotSeries::from_records(session.records(), kind);
    if series.is_empty() {
        return console.say("No records to plot.");
    }
    console.say(series.to_table_string().trim_end())?;
    console.say("The plot series has been generated.")
}
