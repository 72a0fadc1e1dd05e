use std::path::Path;
use std::process::Command;

/// Error type for delegating a ticket file to the OS default opener
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("could not launch file opener: {0}")]
    Launch(#[from] std::io::Error),
    #[error("file opener failed:\n{output}")]
    Opener { output: String },
}

/// Open a ticket file with the operating system's default mechanism for
/// `.txt` files. On failure the combined stdout/stderr text of the opener
/// is returned for display.
pub fn open_ticket(path: &Path) -> Result<(), OpenError> {
    let output = opener_command(path).output()?;
    if output.status.success() {
        return Ok(());
    }
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !combined.is_empty() {
            combined.push('\n');
        }
        combined.push_str(&stderr);
    }
    Err(OpenError::Opener {
        output: combined.trim_end().to_string(),
    })
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg("start").arg("").arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
