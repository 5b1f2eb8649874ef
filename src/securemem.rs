use std::io;
use std::ops::Deref;
use zeroize::Zeroizing;

/// Key bytes for the lifetime of one MAC computation.
///
/// The buffer is zeroed on drop. While alive it is also pinned in RAM where
/// the OS allows it (`mlock`/`VirtualLock`); pinning may fail due to OS
/// limits and is then skipped. This covers only this copy of the key: the
/// config text it came from is wiped separately and the HMAC state keeps
/// its own key-derived pads.
pub struct MemoryLock {
    bytes: Zeroizing<Vec<u8>>,
    locked: bool,
}

impl MemoryLock {
    pub fn new(bytes: Zeroizing<Vec<u8>>) -> Self {
        let locked = match pin(&bytes, true) {
            Ok(()) => !bytes.is_empty(),
            Err(e) => {
                tracing::debug!(error = %e, "memory locking unavailable, continuing without it");
                false
            }
        };
        Self { bytes, locked }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Deref for MemoryLock {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for MemoryLock {
    fn drop(&mut self) {
        if self.locked {
            let _ = pin(&self.bytes, false);
        }
    }
}

/// Lock (`lock = true`) or unlock the pages backing `bytes`.
fn pin(bytes: &[u8], lock: bool) -> io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    let addr = bytes.as_ptr() as *const core::ffi::c_void;
    let len = bytes.len();

    #[cfg(unix)]
    {
        // SAFETY: addr/len describe a live, initialised slice.
        let rc = unsafe {
            if lock {
                libc::mlock(addr, len)
            } else {
                libc::munlock(addr, len)
            }
        };
        return if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        };
    }
    #[cfg(windows)]
    {
        use windows_sys::Win32::System::Memory::{VirtualLock, VirtualUnlock};
        // SAFETY: addr/len describe a live, initialised slice.
        let ok = unsafe {
            if lock {
                VirtualLock(addr, len)
            } else {
                VirtualUnlock(addr, len)
            }
        };
        return if ok != 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        };
    }
    #[cfg(not(any(windows, unix)))]
    {
        let _ = (addr, len, lock);
        Err(io::Error::new(io::ErrorKind::Unsupported, "memory locking unsupported"))
    }
}
