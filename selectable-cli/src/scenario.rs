//! Canned walkthroughs that print every notification the engine emits.

use clap::ValueEnum;
use log::{info, warn};
use selectable::prelude::*;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    Single,
    Multi,
    Shared,
    Reset,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Scenario {
    pub fn expand(self) -> Vec<Scenario> {
        match self {
            Scenario::All => vec![
                Scenario::Single,
                Scenario::Multi,
                Scenario::Shared,
                Scenario::Reset,
            ],
            one => vec![one],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Scenario::Single => "single",
            Scenario::Multi => "multi",
            Scenario::Shared => "shared",
            Scenario::Reset => "reset",
            Scenario::All => "all",
        }
    }

    pub fn run(self, output: Output) -> Result<(), CliError> {
        let mut script = Script::new(output);
        script.heading(self.name());
        match self {
            Scenario::Single => single(&mut script)?,
            Scenario::Multi => multi(&mut script)?,
            Scenario::Shared => shared(&mut script)?,
            Scenario::Reset => reset(&mut script)?,
            Scenario::All => {
                for scenario in self.expand() {
                    scenario.run(output)?;
                }
            }
        }
        script.engine.check_invariants()?;
        Ok(())
    }
}

/// An engine whose notifications are printed as they happen.
struct Script {
    engine: Engine,
    output: Output,
}

impl Script {
    fn new(output: Output) -> Self {
        Self {
            engine: Engine::new(),
            output,
        }
    }

    fn heading(&self, name: &str) {
        info!("scenario {name}");
        if self.output == Output::Text {
            println!("== {name} ==");
        }
    }

    fn watch(&mut self, source: impl Into<Source>) -> Result<(), CliError> {
        let output = self.output;
        self.engine.subscribe_all(source, move |n| print(output, n))?;
        Ok(())
    }

    fn item(&mut self) -> Result<ItemId, CliError> {
        let item = self.engine.create_item();
        self.watch(item)?;
        Ok(item)
    }

    fn host(&mut self, config: HostConfig) -> Result<HostId, CliError> {
        let host = self.engine.create_host(config);
        self.watch(host)?;
        Ok(host)
    }

    fn step<F>(&mut self, label: &str, op: F) -> Result<(), CliError>
    where
        F: FnOnce(&mut Engine) -> Result<(), SelectError>,
    {
        info!("> {label}");
        if self.output == Output::Text {
            println!("> {label}");
        }
        op(&mut self.engine)?;
        Ok(())
    }
}

fn print(output: Output, notification: &Notification) {
    match output {
        Output::Text => println!("  {notification}"),
        Output::Json => match serde_json::to_string(notification) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("failed to encode {}: {}", notification.kind, e),
        },
    }
}

fn single(script: &mut Script) -> Result<(), CliError> {
    let host = script.host(HostConfig::single().label("colors"))?;
    let red = script.item()?;
    let green = script.item()?;
    for item in [red, green] {
        script.engine.add(host, item)?;
    }

    script.step("select red through the host", |e| e.select(host, red))?;
    script.step("select green through the host", |e| e.select(host, green))?;
    script.step("select green again", |e| e.select_item(green))?;
    script.step("deselect green", |e| e.deselect(host, green))
}

fn multi(script: &mut Script) -> Result<(), CliError> {
    let host = script.host(HostConfig::multi().label("files"))?;
    let mut files = Vec::new();
    for _ in 0..3 {
        let file = script.item()?;
        script.engine.add(host, file)?;
        files.push(file);
    }

    script.step("select the first file", |e| e.select(host, files[0]))?;
    script.step("select all", |e| e.select_all(host))?;
    script.step("deselect the second file", |e| e.deselect_item(files[1]))?;
    script.step("toggle select all", |e| e.toggle_select_all(host))?;
    script.step("toggle select all", |e| e.toggle_select_all(host))
}

fn shared(script: &mut Script) -> Result<(), CliError> {
    let focus = script.host(HostConfig::single().label("focus"))?;
    let marked = script.host(HostConfig::multi().label("marked"))?;
    let x = script.item()?;
    let y = script.item()?;
    for host in [focus, marked] {
        script.engine.add(host, x)?;
        script.engine.add(host, y)?;
    }

    script.step("select x in the multi-pick host", |e| e.select(marked, x))?;
    script.step("select all in the multi-pick host", |e| e.select_all(marked))?;
    script.step("deselect y in the single-pick host", |e| e.deselect(focus, y))
}

fn reset(script: &mut Script) -> Result<(), CliError> {
    let list = script.host(HostConfig::multi().label("list"))?;
    let old = script.item()?;
    script.engine.add(list, old)?;
    script.engine.select(list, old)?;

    let fresh = [script.item()?, script.item()?, script.item()?];
    script.engine.select_item(fresh[0])?;
    script.engine.select_item(fresh[2])?;
    script.step("reset the multi-pick host", |e| e.reset(list, fresh))?;

    let pick = script.host(HostConfig::single().label("pick"))?;
    script.step("reset the single-pick host", |e| e.reset(pick, fresh))?;
    script.step("remove the kept item", |e| e.remove(pick, fresh[2]))
}
