pub mod affordance;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod dates;
pub mod feed_form;
pub mod filter;
pub mod modal;
pub mod panels;
pub mod render;
pub mod script;
pub mod session;
pub mod share;
pub mod store;
pub mod timers;
pub mod view;

use std::ffi::OsString;
use std::fs;
use std::io::{
  self,
  Read,
  Write
};

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

use crate::render::Renderer;
use crate::script::ScriptLine;
use crate::session::Session;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting domino"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.rc_file.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let format = match cli.format {
    | Some(arg) => arg.into(),
    | None => cfg.output_format()?
  };

  let catalog =
    catalog::OptionCatalog::load(
      cfg.catalog_file().as_deref()
    )?;
  let mut session =
    Session::new(&cfg, &catalog)?;

  let text = match &cli.script {
    | Some(path) => {
      fs::read_to_string(path)
        .with_context(|| {
          format!(
            "failed to read script {}",
            path.display()
          )
        })?
    }
    | None => {
      let mut buf = String::new();
      io::stdin()
        .read_to_string(&mut buf)
        .context(
          "failed to read script from \
           stdin"
        )?;
      buf
    }
  };
  let lines = script::parse(&text)?;

  let renderer =
    Renderer::new(&cfg, format)?;
  let mut out = io::stdout().lock();
  let events = replay(
    &mut session,
    lines,
    &renderer,
    &mut out
  )?;

  info!(events, "done");
  Ok(())
}

/// Dispatches every event in order and writes the page on each `show`,
/// plus once more at the end unless the last line already showed it.
/// Returns the number of events dispatched.
pub fn replay<W: Write>(
  session: &mut Session,
  lines: Vec<ScriptLine>,
  renderer: &Renderer,
  mut writer: W
) -> anyhow::Result<usize> {
  let mut events = 0;
  let mut dirty = true;

  for line in lines {
    match line {
      | ScriptLine::Event(event) => {
        session.dispatch(event);
        events += 1;
        dirty = true;
      }
      | ScriptLine::Show => {
        renderer.write_page(
          &mut writer,
          &session.render()
        )?;
        dirty = false;
      }
    }
  }

  if dirty {
    renderer.write_page(
      &mut writer,
      &session.render()
    )?;
  }

  Ok(events)
}
