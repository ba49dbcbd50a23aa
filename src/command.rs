//! Exec-template expansion and final command assembly.

use crate::config::Config;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;

/// Expand the %-field codes of a desktop entry's exec template.
///
/// `%%` yields a literal percent; `%f %F %u %U` expand to nothing (the
/// launcher passes no files); `%i` inserts the icon flag, `%c` the display
/// name, `%k` the descriptor path. Any other code expands to nothing, and
/// a trailing `%` is dropped.
pub fn expand_exec(template: &str, name: &str, icon: &str, path: &Path) -> String {
    let mut out = String::with_capacity(template.len());
    let mut escape = false;

    for c in template.chars() {
        if !escape {
            if c == '%' {
                escape = true;
            } else {
                out.push(c);
            }
            continue;
        }

        match c {
            '%' => out.push('%'),
            'f' | 'F' | 'u' | 'U' => {}
            'i' => {
                out.push_str("--icon '");
                out.push_str(icon);
                out.push('\'');
            }
            'c' => out.push_str(name),
            'k' => out.push_str(&path.to_string_lossy()),
            _ => {}
        }
        escape = false;
    }

    out
}

/// Assemble the final program and argument list: the configured shell or
/// terminal plus its fixed arguments, with the expanded command appended
/// as the single trailing argument.
pub fn build_command(config: &Config, needs_terminal: bool, expanded: String) -> (String, Vec<String>) {
    let (program, base_args) = if needs_terminal {
        (&config.terminal, &config.terminal_args)
    } else {
        (&config.shell, &config.shell_args)
    };
    let mut args = base_args.clone();
    args.push(expanded);
    (program.clone(), args)
}

/// Capability to replace the current process image with a program.
///
/// The production implementation never returns on success; tests swap in
/// a double that records the intended command instead.
pub trait Launcher {
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<()>;
}

pub struct ExecLauncher;

impl Launcher for ExecLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<()> {
        Err(Command::new(program).args(args).exec())
    }
}
