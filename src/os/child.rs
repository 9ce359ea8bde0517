// src/os/child.rs

//! The interpreter child process behind nonblocking pipes.
//!
//! The interpreter writes at its own rhythm: a burst after a command, then
//! silence until the next one, with occasional pauses mid-burst while it
//! paginates. `PipeChild` therefore never blocks on a read; it polls the
//! child's stdout with a bounded timeout and reports "nothing yet" as a
//! normal outcome. End-of-file is an error, because the simulator cannot
//! outlive its interpreter.

use std::io::{Read, Write};
use std::os::fd::AsFd;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::{debug, trace, warn};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

/// What the output pump needs from a child: bounded-wait reads and line
/// writes. Tests substitute a scripted double.
pub trait ChildProcess {
    /// Waits up to `timeout` for output. `Ok(Some(bytes))` is a nonempty
    /// read, `Ok(None)` means nothing arrived in time, and `Err` means the
    /// child is gone.
    fn read_available(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>>;

    /// Writes one line to the child's stdin, newline appended.
    fn send_line(&mut self, line: &str) -> Result<()>;
}

/// A real child process connected over stdio pipes.
pub struct PipeChild {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

impl PipeChild {
    /// Spawns `program` with `args`, piping stdin and stdout and silencing
    /// stderr. The stdout pipe is switched to nonblocking mode so short
    /// reads never stall the pacing loop.
    pub fn spawn(program: &str, args: &[String]) -> Result<Self> {
        debug!("spawning interpreter: {program} {args:?}");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn interpreter '{program}'"))?;

        let stdin = child.stdin.take().context("child stdin not piped")?;
        let stdout = child.stdout.take().context("child stdout not piped")?;

        let flags = fcntl(stdout.as_fd(), FcntlArg::F_GETFL)
            .context("reading stdout pipe flags")?;
        let flags = OFlag::from_bits_retain(flags) | OFlag::O_NONBLOCK;
        fcntl(stdout.as_fd(), FcntlArg::F_SETFL(flags))
            .context("setting stdout pipe nonblocking")?;

        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }
}

impl ChildProcess for PipeChild {
    fn read_available(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let millis = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
        let mut fds = [PollFd::new(self.stdout.as_fd(), PollFlags::POLLIN)];
        let ready = poll(&mut fds, PollTimeout::from(millis))
            .context("polling interpreter stdout")?;
        if ready == 0 {
            return Ok(None);
        }

        let mut buf = [0u8; 65536];
        match self.stdout.read(&mut buf) {
            Ok(0) => bail!("interpreter closed its output"),
            Ok(n) => {
                trace!("read {n} bytes from interpreter");
                Ok(Some(buf[..n].to_vec()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e).context("reading interpreter stdout"),
        }
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        trace!("sending line: {line:?}");
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|()| self.stdin.write_all(b"\n"))
            .and_then(|()| self.stdin.flush())
            .context("writing to interpreter stdin")
    }
}

impl Drop for PipeChild {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            warn!("failed to kill interpreter child: {e}");
        }
        let _ = self.child.wait();
    }
}
