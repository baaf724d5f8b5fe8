use anyhow::Context;
use image::{DynamicImage, ImageFormat};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

const SPOOL_FILE_NAME: &str = "image-viewer-print.png";

pub fn spool_path() -> PathBuf {
    std::env::temp_dir().join(SPOOL_FILE_NAME)
}

/// Write `image` to the spool file and hand it to the platform print command
pub fn print_image(image: &DynamicImage) -> anyhow::Result<()> {
    let path = spool_path();
    if path.exists() {
        eapp_utils::capture_error!(
            err => log::warn!("remove stale print spool '{}' fails: {err}", path.display()),
            std::fs::remove_file(&path)?
        );
    }

    image
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("write print spool '{}'", path.display()))?;

    // the spooler outlives this call, nothing to wait for
    #[allow(clippy::zombie_processes)]
    print_command(&path)
        .spawn()
        .with_context(|| format!("start print command for '{}'", path.display()))?;

    log::info!("sent '{}' to the printer", path.display());
    Ok(())
}

fn print_command(path: &Path) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("mspaint");
        cmd.arg("/p").arg(path);
        cmd
    }

    #[cfg(not(target_os = "windows"))]
    {
        let mut cmd = Command::new("lp");
        cmd.arg(path);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_command_targets_the_spool_file() {
        let path = spool_path();
        let cmd = print_command(&path);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().copied(), Some(path.as_os_str()));

        #[cfg(not(target_os = "windows"))]
        assert_eq!(cmd.get_program(), "lp");
        #[cfg(target_os = "windows")]
        assert_eq!(args.first().copied(), Some(std::ffi::OsStr::new("/p")));
    }

    #[test]
    fn spool_lives_in_temp_dir() {
        assert!(spool_path().starts_with(std::env::temp_dir()));
        assert_eq!(
            spool_path().extension().and_then(|ext| ext.to_str()),
            Some("png")
        );
    }
}
