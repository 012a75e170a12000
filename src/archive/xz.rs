use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use super::{MemberSource, TarSource};
use crate::error::DecodeError;

/// Tar enumeration over the stdout of an external `xz -dc` process.
///
/// The child is always reaped: after a full walk in `for_each_name`, or by
/// `Drop` (pipe closed, process killed, then waited on) when the source is
/// abandoned early.
pub struct XzSource {
    program: String,
    child: Child,
    stdout: Option<ChildStdout>,
    reaped: bool,
}

impl XzSource {
    pub fn spawn(program: &OsStr, path: &Path) -> Result<Self, DecodeError> {
        let program_name = program.to_string_lossy().into_owned();
        let mut child = Command::new(program)
            .arg("-dc")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DecodeError::DecoderSpawn {
                program: program_name.clone(),
                source,
            })?;
        tracing::debug!(program = %program_name, pid = child.id(), "spawned xz decoder");

        let stdout = child.stdout.take();
        Ok(Self {
            program: program_name,
            child,
            stdout,
            reaped: false,
        })
    }

    fn wait(&mut self) -> Result<(), DecodeError> {
        let status = self.child.wait()?;
        self.reaped = true;
        if status.success() {
            return Ok(());
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }
        Err(DecodeError::DecoderFailed {
            program: self.program.clone(),
            status,
            stderr: stderr.trim().to_string(),
        })
    }
}

impl MemberSource for XzSource {
    fn format_name(&self) -> &'static str {
        "tar.xz"
    }

    fn for_each_name(&mut self, visit: &mut dyn FnMut(&str)) -> Result<(), DecodeError> {
        let stdout = self
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "decoder output already consumed"))?;

        let mut tar = TarSource::new(stdout, "tar.xz");
        let walked = tar.for_each_name(visit);

        // Read past the end-of-archive blocks so the decoder never sees a
        // closed pipe and its exit status reflects the xz stream itself.
        let mut stdout = tar.into_inner();
        let drained = io::copy(&mut stdout, &mut io::sink());
        drop(stdout);

        // A failing decoder explains a failed walk better than the walk does.
        self.wait()?;
        walked?;
        drained?;
        Ok(())
    }
}

impl Drop for XzSource {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        drop(self.stdout.take());
        if let Err(e) = self.child.kill() {
            tracing::debug!(program = %self.program, "kill failed: {e}");
        }
        if let Err(e) = self.child.wait() {
            tracing::warn!(program = %self.program, "unable to reap decoder: {e}");
        }
    }
}
