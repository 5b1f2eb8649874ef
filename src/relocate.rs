use crate::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Destination for `file` inside `dest_dir`, keeping only the file name.
pub fn destination_for(file: &Path, dest_dir: &Path) -> Result<PathBuf, Error> {
    let name = file
        .file_name()
        .ok_or(Error::InvalidArgs("target path has no file name"))?;
    Ok(dest_dir.join(name))
}

/// Move `file` into `dest_dir` and return the new path.
///
/// The destination directory must already exist and must not contain a file
/// of the same name. The file is linked under its new name before the old
/// name is removed, so an existing destination is never replaced.
pub fn move_into(file: &Path, dest_dir: &Path) -> Result<PathBuf, Error> {
    let dest = destination_for(file, dest_dir)?;

    match fs::hard_link(file, &dest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(Error::WouldOverwrite(dest)),
        Err(e) if is_cross_device(&e) || link_unsupported(&e) => {
            tracing::debug!(from = %file.display(), to = %dest.display(), error = %e, "cannot link, copying");
            copy_to_new(file, &dest)?;
        }
        Err(e) => return Err(Error::file("move file to", &dest)(e)),
    }
    fs::remove_file(file).map_err(Error::file("remove moved file", file))?;
    Ok(dest)
}

/// Copy `file` to a `dest` that must not exist yet. A failed copy removes
/// whatever part of `dest` was written.
fn copy_to_new(file: &Path, dest: &Path) -> Result<(), Error> {
    let mut src = File::open(file).map_err(Error::file("read", file))?;
    let mut out = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::WouldOverwrite(dest.to_path_buf()))
        }
        Err(e) => return Err(Error::file("copy file to", dest)(e)),
    };

    let copied = io::copy(&mut src, &mut out).and_then(|_| out.sync_all());
    drop(out);
    if let Err(e) = copied {
        let _ = fs::remove_file(dest);
        return Err(Error::file("copy file to", dest)(e));
    }
    Ok(())
}

// FAT-style volumes reject links with EPERM or ENOTSUP.
fn link_unsupported(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Unsupported | io::ErrorKind::PermissionDenied
    )
}

fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        return err.raw_os_error() == Some(libc::EXDEV);
    }
    #[cfg(windows)]
    {
        use windows_sys::Win32::Foundation::ERROR_NOT_SAME_DEVICE;
        return err.raw_os_error() == Some(ERROR_NOT_SAME_DEVICE as i32);
    }
    #[cfg(not(any(windows, unix)))]
    {
        let _ = err;
        false
    }
}
