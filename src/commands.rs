use crate::error::Error;
use crate::format;
use crate::ini::{Ini, DEFAULT_SECTION};
use crate::journal::Journal;
use crate::mac;
use crate::relocate;
use crate::settings::Settings;
use std::fs;
use std::path::{Path, PathBuf};

pub const KEY_ENTRY: &str = "Key";
pub const PATH_ENTRY: &str = "Path";

pub const MSG_NO_PATH: &str = "no file path specified";
pub const MSG_EMPTY_DEST: &str = "empty relocation path configured, file left in place";

#[derive(Debug)]
pub struct Stamped {
    pub digest: String,
    /// Where the stamped file ended up.
    pub location: PathBuf,
}

/// Process one invocation and record its outcome in the journal.
///
/// Failures of the stamping itself are journaled and swallowed; only a
/// journal that cannot be written is returned as an error.
pub fn run(settings: &Settings, target: Option<&Path>) -> Result<Option<Stamped>, Error> {
    let journal = Journal::new(settings.log_path());
    let Some(target) = target else {
        journal.append(MSG_NO_PATH)?;
        return Ok(None);
    };

    match stamp(settings, target, &journal) {
        Ok(stamped) => Ok(Some(stamped)),
        Err(err) => {
            tracing::debug!(file = %target.display(), error = %err, "stamping failed");
            journal.append(&err.to_string())?;
            Ok(None)
        }
    }
}

/// Overwrite `target` with its stamped form, then relocate it if configured.
///
/// A failure after the write leaves the stamped file where it was.
pub fn stamp(settings: &Settings, target: &Path, journal: &Journal) -> Result<Stamped, Error> {
    let content = fs::read(target).map_err(Error::file("read", target))?;
    let ini = Ini::load(settings.config_path())?;

    let digest = mac::digest_hex(&content, ini.value(KEY_ENTRY))?;
    let message = format::assemble(&content, &digest);
    tracing::debug!(
        file = %target.display(),
        input_len = content.len(),
        output_len = message.len(),
        "message assembled"
    );

    fs::write(target, &message).map_err(Error::file("write", target))?;
    journal.append(&format!("hash computed for file '{}'", target.display()))?;

    let mut location = target.to_path_buf();
    if ini.contains_key(DEFAULT_SECTION, PATH_ENTRY) {
        let dest_dir = ini.value(PATH_ENTRY);
        if dest_dir.is_empty() {
            journal.append(MSG_EMPTY_DEST)?;
        } else {
            location = relocate::move_into(target, Path::new(dest_dir))?;
            journal.append(&format!("file moved to '{}'", location.display()))?;
        }
    }

    Ok(Stamped { digest, location })
}
