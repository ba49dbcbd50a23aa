//! Child-process channel for the external menu picker.
//!
//! The picker reads candidate lines on its stdin until end-of-file and
//! answers with a single line on its stdout. Both pipes are owned here
//! and released on every exit path.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub struct Picker {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl Picker {
    /// Start the picker with its stdin and stdout attached to pipes.
    pub fn spawn(program: &str, args: &[String]) -> io::Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .ok_or_else(|| io::Error::other("picker stdout not captured"))?;

        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }

    /// Stream raw bytes to the picker's input; embedded NUL bytes pass
    /// through untouched.
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match &mut self.stdin {
            Some(stdin) => stdin.write_all(bytes),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "picker input already closed",
            )),
        }
    }

    /// Close the picker's input, signalling end-of-stream. Idempotent.
    pub fn send_eof(&mut self) {
        self.stdin.take();
    }

    /// Read one line of the picker's answer, without the trailing
    /// newline. Returns an empty string at end-of-file.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.stdout.read_line(&mut line)?;
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(line)
    }

    /// Wait for the picker to terminate and return its exit code.
    /// Death by signal counts as failure.
    pub fn join(mut self) -> io::Result<i32> {
        self.stdin.take();
        let status = self.child.wait()?;
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Picker {
        Picker::spawn("sh", &["-c".to_string(), script.to_string()]).unwrap()
    }

    #[test]
    fn test_echo_roundtrip_preserves_order() {
        let mut picker = Picker::spawn("cat", &[]).unwrap();
        picker.write_all(b"first\n").unwrap();
        picker.write_all(b"sec\0ond\n").unwrap();
        picker.write_all(b"third\n").unwrap();
        picker.send_eof();

        assert_eq!(picker.read_line().unwrap(), "first");
        assert_eq!(picker.read_line().unwrap(), "sec\0ond");
        assert_eq!(picker.read_line().unwrap(), "third");
        assert_eq!(picker.read_line().unwrap(), "");
        assert_eq!(picker.join().unwrap(), 0);
    }

    #[test]
    fn test_join_reports_exit_status() {
        let mut picker = sh("exit 17");
        picker.send_eof();
        assert_eq!(picker.join().unwrap(), 17);
    }

    #[test]
    fn test_read_line_at_eof_is_empty() {
        let mut picker = sh("exit 0");
        picker.send_eof();
        assert_eq!(picker.read_line().unwrap(), "");
        assert_eq!(picker.join().unwrap(), 0);
    }

    #[test]
    fn test_write_after_eof_fails() {
        let mut picker = Picker::spawn("cat", &[]).unwrap();
        picker.send_eof();
        let err = picker.write_all(b"late\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        picker.join().unwrap();
    }

    #[test]
    fn test_send_eof_is_idempotent() {
        let mut picker = Picker::spawn("cat", &[]).unwrap();
        picker.send_eof();
        picker.send_eof();
        assert_eq!(picker.join().unwrap(), 0);
    }
}
