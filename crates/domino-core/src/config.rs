use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use chrono::NaiveDate;
use tracing::{
  debug,
  info,
  trace,
  warn
};

use crate::dates::parse_reference_date;
use crate::filter::GroupSize;

pub const RC_ENV_VAR: &str = "DOMINORC";
const RC_FILE_NAME: &str = ".dominorc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json
}

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      ("group_size.default", "2"),
      ("feed_name.max_chars", "50"),
      ("copy.feedback_ms", "2000"),
      ("settle.delay_ms", "50"),
      (
        "share.base_url",
        "https://example.com/feed"
      ),
      ("clipboard.available", "on"),
      ("output.format", "text"),
      ("color", "on")
    ] {
      map.insert(
        key.to_string(),
        value.to_string()
      );
    }
    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading dominorc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no dominorc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn set(
    &mut self,
    key: &str,
    value: &str
  ) {
    self.map.insert(
      key.to_string(),
      value.to_string()
    );
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn get_u64(
    &self,
    key: &str
  ) -> anyhow::Result<Option<u64>> {
    self
      .map
      .get(key)
      .map(|raw| {
        raw.trim().parse::<u64>().with_context(
          || {
            format!(
              "config key {key} must be \
               a non-negative integer, \
               got {raw:?}"
            )
          }
        )
      })
      .transpose()
  }

  /// `reference.date`, or local today when unset.
  pub fn reference_date(
    &self
  ) -> anyhow::Result<NaiveDate> {
    match self.map.get("reference.date")
    {
      | Some(raw) => {
        parse_reference_date(raw)
          .context(
            "config key reference.date"
          )
      }
      | None => {
        Ok(
          chrono::Local::now()
            .date_naive()
        )
      }
    }
  }

  pub fn default_group_size(
    &self
  ) -> anyhow::Result<GroupSize> {
    let raw = self
      .get_u64("group_size.default")?
      .unwrap_or(2);
    if raw == 0 {
      return Err(anyhow!(
        "group_size.default must be \
         at least 1"
      ));
    }
    let size = u32::try_from(raw)
      .context(
        "group_size.default is too \
         large"
      )?;
    Ok(GroupSize::new(size))
  }

  pub fn feed_name_max_chars(
    &self
  ) -> anyhow::Result<usize> {
    let raw = self
      .get_u64("feed_name.max_chars")?
      .unwrap_or(50);
    usize::try_from(raw).context(
      "feed_name.max_chars is too \
       large"
    )
  }

  pub fn copy_feedback_ms(
    &self
  ) -> anyhow::Result<u64> {
    Ok(
      self
        .get_u64("copy.feedback_ms")?
        .unwrap_or(2000)
    )
  }

  pub fn settle_delay_ms(
    &self
  ) -> anyhow::Result<u64> {
    Ok(
      self
        .get_u64("settle.delay_ms")?
        .unwrap_or(50)
    )
  }

  pub fn share_base_url(
    &self
  ) -> String {
    self
      .get("share.base_url")
      .unwrap_or_else(|| {
        "https://example.com/feed"
          .to_string()
      })
  }

  pub fn clipboard_available(
    &self
  ) -> bool {
    self
      .get_bool("clipboard.available")
      .unwrap_or(true)
  }

  pub fn catalog_file(
    &self
  ) -> Option<PathBuf> {
    self
      .get("catalog.file")
      .filter(|raw| {
        !raw.trim().is_empty()
      })
      .map(|raw| {
        expand_tilde(Path::new(
          raw.trim()
        ))
      })
  }

  pub fn output_format(
    &self
  ) -> anyhow::Result<OutputFormat> {
    let raw = self
      .get("output.format")
      .unwrap_or_else(|| {
        "text".to_string()
      });
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "text" => Ok(OutputFormat::Text),
      | "json" => Ok(OutputFormat::Json),
      | other => {
        Err(anyhow!(
          "invalid output.format: \
           {other}"
        ))
      }
    }
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV_VAR)
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping dominorc"
    );
    return Ok(None);
  };
  let candidate =
    home.join(RC_FILE_NAME);
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}
