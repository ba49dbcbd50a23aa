//! Orchestration: stream the catalog to the picker, act on the answer.

use crate::command::{self, Launcher};
use crate::config::Config;
use crate::picker::Picker;
use appmenu_apps::Catalog;
use appmenu_icons::Icons;
use image::imageops::FilterType;
use log::{debug, info, warn};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to start picker: {0}")]
    Spawn(io::Error),

    #[error("picker I/O failed: {0}")]
    Picker(io::Error),

    #[error("cannot exec command: {0}")]
    Exec(io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The selected command was handed to the launcher.
    Launched,
    /// The user cancelled or the picker gave no usable answer.
    Cancelled,
}

/// Run one selection round: stream every entry to the picker, read the
/// answer, expand the chosen entry's command and hand it to the launcher.
///
/// The answer is interpreted as an index into the catalog in the exact
/// order entries were streamed.
pub fn run(
    config: &Config,
    catalog: &Catalog,
    icons: &Icons,
    launcher: &mut dyn Launcher,
) -> Result<Outcome, DispatchError> {
    let mut picker =
        Picker::spawn(&config.picker, &config.picker_args).map_err(DispatchError::Spawn)?;

    if let Err(e) = stream_entries(&mut picker, catalog, icons, config) {
        // The picker may stop reading before the last entry.
        if e.kind() == io::ErrorKind::BrokenPipe {
            debug!("picker closed its input early");
        } else {
            return Err(DispatchError::Picker(e));
        }
    }
    picker.send_eof();

    let answer = picker.read_line().map_err(DispatchError::Picker)?;
    let status = picker.join().map_err(DispatchError::Picker)?;
    if status != 0 {
        info!("picker exited with status {}", status);
        return Ok(Outcome::Cancelled);
    }

    let Ok(index) = answer.trim().parse::<usize>() else {
        info!("no selection made");
        return Ok(Outcome::Cancelled);
    };
    let Some(entry) = catalog.get(index) else {
        warn!("picker answered with out-of-range index {}", index);
        return Ok(Outcome::Cancelled);
    };

    let expanded = command::expand_exec(&entry.exec, &entry.name, &entry.icon, &entry.path);
    let (program, args) = command::build_command(config, entry.terminal, expanded);
    info!("launching {} via {}", entry.name, program);
    launcher.launch(&program, &args).map_err(DispatchError::Exec)?;
    Ok(Outcome::Launched)
}

/// Write one line per entry: the display name, then an optional NUL
/// separator and escaped icon payload, then a newline.
fn stream_entries(
    picker: &mut Picker,
    catalog: &Catalog,
    icons: &Icons,
    config: &Config,
) -> io::Result<()> {
    for entry in catalog.iter() {
        picker.write_all(entry.name.as_bytes())?;
        if let Some(payload) = icon_payload(icons, &entry.icon, config) {
            picker.write_all(b"\0")?;
            picker.write_all(&payload)?;
        }
        picker.write_all(b"\n")?;
    }
    Ok(())
}

/// Resolve, decode and scale an entry's icon into escaped RGBA bytes.
/// Any failure along the way just drops the payload for that entry.
fn icon_payload(icons: &Icons, icon_name: &str, config: &Config) -> Option<Vec<u8>> {
    if icon_name.is_empty() {
        return None;
    }
    let icon = icons.resolve(icon_name, config.icon_size, config.theme.as_deref())?;

    let img = match image::open(&icon.path) {
        Ok(img) => img,
        Err(e) => {
            warn!("cannot decode icon {}: {}", icon.path.display(), e);
            return None;
        }
    };
    let scaled = img.resize_exact(config.icon_size, config.icon_size, FilterType::CatmullRom);
    Some(escape_payload(&scaled.to_rgba8().into_raw()))
}

/// Escape payload bytes that would break the line protocol: newline,
/// backslash and NUL become two-character sequences.
fn escape_payload(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &b in data {
        match b {
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\0' => out.extend_from_slice(b"\\0"),
            _ => out.push(b),
        }
    }
    out
}
